use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use folio_core::RepoError;
use folio_core::domain::{About, Author, AuthorId, Feature, Post, Project, RecordId};

/// Rows of one record type plus its id sequence.
pub(crate) struct Table<R> {
    pub(crate) rows: BTreeMap<RecordId, R>,
    next_id: RecordId,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<R> Table<R> {
    pub(crate) fn allocate_id(&mut self) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// A stored post references its author by id, like the `posts` table does.
#[derive(Debug, Clone)]
pub(crate) struct PostRow {
    pub(crate) id: RecordId,
    pub(crate) title: String,
    pub(crate) slug: String,
    pub(crate) description: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) author_id: AuthorId,
}

#[derive(Default)]
pub(crate) struct Tables {
    pub(crate) authors: Table<Author>,
    pub(crate) posts: Table<PostRow>,
    pub(crate) features: Table<Feature>,
    pub(crate) projects: Table<Project>,
    pub(crate) about: Table<About>,
}

impl Tables {
    pub(crate) fn join_post(&self, row: &PostRow) -> Result<Post, RepoError> {
        let author = self.authors.rows.get(&row.author_id).ok_or_else(|| {
            RepoError::Query(format!(
                "post {} references missing author {}",
                row.id, row.author_id
            ))
        })?;

        Ok(Post {
            id: row.id,
            title: row.title.clone(),
            slug: row.slug.clone(),
            description: row.description.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            author: author.clone(),
        })
    }

    pub(crate) fn post_by_slug(&self, slug: &str) -> Option<&PostRow> {
        self.posts.rows.values().find(|row| row.slug == slug)
    }

    pub(crate) fn require_author(&self, author_id: AuthorId) -> Result<(), RepoError> {
        if self.authors.rows.contains_key(&author_id) {
            Ok(())
        } else {
            Err(RepoError::Constraint(format!(
                "posts.author_id: author {author_id} does not exist"
            )))
        }
    }
}
