use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use folio_core::domain::{
    About, Author, Feature, NewAbout, NewAuthor, NewFeature, NewProject, Project, Record,
    RecordId, newest_first,
};
use folio_core::ports::Repository;
use folio_core::RepoError;

use super::tables::{Table, Tables};

/// Record types stored in their own id-keyed table.
pub(crate) trait StoredRecord: Record<Key = RecordId> {
    fn table(tables: &Tables) -> &Table<Self>;

    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;

    fn from_draft(id: RecordId, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    fn apply(&mut self, changes: Self::Changes);

    /// Remove rows that depend on the record being deleted.
    fn cascade_delete(_tables: &mut Tables, _id: RecordId) {}
}

impl StoredRecord for Author {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.authors
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.authors
    }

    fn from_draft(id: RecordId, draft: NewAuthor, now: DateTime<Utc>) -> Self {
        Author {
            id,
            fullname: draft.fullname,
            description: draft.description,
            thumbnail: draft.thumbnail,
            created_at: now,
        }
    }

    fn apply(&mut self, changes: Self::Changes) {
        changes.apply_to(self);
    }

    fn cascade_delete(tables: &mut Tables, id: RecordId) {
        let before = tables.posts.rows.len();
        tables.posts.rows.retain(|_, post| post.author_id != id);
        let removed = before - tables.posts.rows.len();
        if removed > 0 {
            tracing::debug!(author_id = id, removed, "Cascaded author delete to posts");
        }
    }
}

impl StoredRecord for Feature {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.features
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.features
    }

    fn from_draft(id: RecordId, draft: NewFeature, now: DateTime<Utc>) -> Self {
        Feature {
            id,
            name: draft.name,
            title: draft.title,
            url: draft.url,
            created_at: now,
        }
    }

    fn apply(&mut self, changes: Self::Changes) {
        changes.apply_to(self);
    }
}

impl StoredRecord for Project {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.projects
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.projects
    }

    fn from_draft(id: RecordId, draft: NewProject, now: DateTime<Utc>) -> Self {
        Project {
            id,
            title: draft.title,
            description: draft.description,
            created_at: now,
            thumbnail: draft.thumbnail,
        }
    }

    fn apply(&mut self, changes: Self::Changes) {
        changes.apply_to(self);
    }
}

impl StoredRecord for About {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.about
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.about
    }

    fn from_draft(id: RecordId, draft: NewAbout, now: DateTime<Utc>) -> Self {
        About {
            id,
            title: draft.title,
            description: draft.description,
            mission: draft.mission,
            created_at: now,
            thumbnail: draft.thumbnail,
        }
    }

    fn apply(&mut self, changes: Self::Changes) {
        changes.apply_to(self);
    }
}

/// In-memory repository for an id-keyed record type.
pub(crate) struct InMemoryRepository<R> {
    tables: Arc<RwLock<Tables>>,
    _record: PhantomData<fn() -> R>,
}

impl<R> InMemoryRepository<R> {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self {
            tables,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<R: StoredRecord> Repository<R> for InMemoryRepository<R> {
    async fn list(&self) -> Result<Vec<R>, RepoError> {
        let tables = self.tables.read().await;
        let mut records: Vec<R> = R::table(&tables).rows.values().cloned().collect();
        newest_first(&mut records);
        Ok(records)
    }

    async fn get(&self, key: &RecordId) -> Result<Option<R>, RepoError> {
        let tables = self.tables.read().await;
        Ok(R::table(&tables).rows.get(key).cloned())
    }

    async fn create(&self, draft: R::Draft) -> Result<R, RepoError> {
        let mut tables = self.tables.write().await;
        let table = R::table_mut(&mut tables);
        let id = table.allocate_id();
        let record = R::from_draft(id, draft, Utc::now());
        table.rows.insert(id, record.clone());
        tracing::debug!(entity = R::ENTITY, id, "Inserted record");
        Ok(record)
    }

    async fn update(&self, key: &RecordId, changes: R::Changes) -> Result<R, RepoError> {
        let mut tables = self.tables.write().await;
        let record = R::table_mut(&mut tables)
            .rows
            .get_mut(key)
            .ok_or(RepoError::NotFound)?;
        record.apply(changes);
        Ok(record.clone())
    }

    async fn delete(&self, key: &RecordId) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if R::table_mut(&mut tables).rows.remove(key).is_none() {
            return Err(RepoError::NotFound);
        }
        R::cascade_delete(&mut tables, *key);
        Ok(())
    }
}
