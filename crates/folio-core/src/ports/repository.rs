use async_trait::async_trait;

use crate::domain::{About, Author, Feature, Post, Project, Record};
use crate::error::RepoError;

/// Storage for one record type.
///
/// Every record type gets the same five operations; the key is whatever the
/// record is addressed by in its detail route.
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// All records, newest first.
    async fn list(&self) -> Result<Vec<R>, RepoError>;

    async fn get(&self, key: &R::Key) -> Result<Option<R>, RepoError>;

    async fn create(&self, draft: R::Draft) -> Result<R, RepoError>;

    /// Apply `changes` to the record at `key`. Fails with `RepoError::NotFound`
    /// when no such record exists.
    async fn update(&self, key: &R::Key, changes: R::Changes) -> Result<R, RepoError>;

    /// Fails with `RepoError::NotFound` when no such record exists.
    async fn delete(&self, key: &R::Key) -> Result<(), RepoError>;
}

/// Deleting an author also deletes its posts.
pub type AuthorRepository = dyn Repository<Author>;

pub type PostRepository = dyn Repository<Post>;

pub type FeatureRepository = dyn Repository<Feature>;

pub type ProjectRepository = dyn Repository<Project>;

pub type AboutRepository = dyn Repository<About>;
