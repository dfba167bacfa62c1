use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use folio_core::RepoError;
use folio_core::domain::{NewPost, Post, PostChanges, newest_first};
use folio_core::ports::Repository;

use super::tables::{PostRow, Tables};

/// In-memory post repository, keyed by slug.
pub(crate) struct InMemoryPostRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryPostRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

fn duplicate_slug(slug: &str) -> RepoError {
    RepoError::Constraint(format!("posts.slug: duplicate key value {slug:?}"))
}

#[async_trait]
impl Repository<Post> for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts = tables
            .posts
            .rows
            .values()
            .map(|row| tables.join_post(row))
            .collect::<Result<Vec<_>, _>>()?;
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn get(&self, slug: &String) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        tables
            .post_by_slug(slug)
            .map(|row| tables.join_post(row))
            .transpose()
    }

    async fn create(&self, draft: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        tables.require_author(draft.author_id)?;
        if tables.post_by_slug(&draft.slug).is_some() {
            return Err(duplicate_slug(&draft.slug));
        }

        let now = Utc::now();
        let id = tables.posts.allocate_id();
        let row = PostRow {
            id,
            title: draft.title,
            slug: draft.slug,
            description: draft.description,
            created_at: now,
            updated_at: now,
            author_id: draft.author_id,
        };
        tables.posts.rows.insert(id, row.clone());
        tracing::debug!(id, slug = %row.slug, "Inserted post");

        tables.join_post(&row)
    }

    async fn update(&self, slug: &String, changes: PostChanges) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let id = tables.post_by_slug(slug).ok_or(RepoError::NotFound)?.id;

        if let Some(new_slug) = &changes.slug {
            if tables
                .post_by_slug(new_slug)
                .is_some_and(|other| other.id != id)
            {
                return Err(duplicate_slug(new_slug));
            }
        }
        if let Some(author_id) = changes.author_id {
            tables.require_author(author_id)?;
        }

        let row = tables.posts.rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        if let Some(title) = changes.title {
            row.title = title;
        }
        if let Some(new_slug) = changes.slug {
            row.slug = new_slug;
        }
        if let Some(description) = changes.description {
            row.description = description;
        }
        if let Some(author_id) = changes.author_id {
            row.author_id = author_id;
        }
        row.updated_at = Utc::now();

        let row = row.clone();
        tables.join_post(&row)
    }

    async fn delete(&self, slug: &String) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let id = tables.post_by_slug(slug).ok_or(RepoError::NotFound)?.id;
        tables.posts.rows.remove(&id);
        Ok(())
    }
}
