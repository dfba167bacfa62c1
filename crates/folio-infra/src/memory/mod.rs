//! In-memory storage - used when no database is configured.
//!
//! Mirrors the relational schema: per-table id sequences, a unique post slug,
//! and posts deleted together with their author.
//! Note: Data is lost on process restart.

mod posts;
mod records;
mod tables;

use std::sync::Arc;

use tokio::sync::RwLock;

use folio_core::domain::{About, Author, Feature, Project};
use folio_core::ports::{
    AboutRepository, AuthorRepository, FeatureRepository, PostRepository, ProjectRepository,
};

use posts::InMemoryPostRepository;
use records::InMemoryRepository;

use tables::Tables;

/// Handle to a set of in-memory tables. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authors(&self) -> Arc<AuthorRepository> {
        Arc::new(InMemoryRepository::<Author>::new(self.tables.clone()))
    }

    pub fn posts(&self) -> Arc<PostRepository> {
        Arc::new(InMemoryPostRepository::new(self.tables.clone()))
    }

    pub fn features(&self) -> Arc<FeatureRepository> {
        Arc::new(InMemoryRepository::<Feature>::new(self.tables.clone()))
    }

    pub fn projects(&self) -> Arc<ProjectRepository> {
        Arc::new(InMemoryRepository::<Project>::new(self.tables.clone()))
    }

    pub fn about(&self) -> Arc<AboutRepository> {
        Arc::new(InMemoryRepository::<About>::new(self.tables.clone()))
    }
}
