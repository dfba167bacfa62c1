//! Application state - shared across all handlers.

use std::sync::Arc;

use folio_core::ports::{
    AboutRepository, AuthorRepository, FeatureRepository, PostRepository, ProjectRepository,
    TokenService,
};
use folio_infra::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
use folio_infra::{
    DatabaseConnections, PostgresAboutRepository, PostgresAuthorRepository,
    PostgresFeatureRepository, PostgresPostRepository, PostgresProjectRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authors: Arc<AuthorRepository>,
    pub posts: Arc<PostRepository>,
    pub features: Arc<FeatureRepository>,
    pub projects: Arc<ProjectRepository>,
    pub about: Arc<AboutRepository>,
    pub tokens: Arc<dyn TokenService>,
    /// Name of the storage backend, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state, preferring PostgreSQL when configured.
    pub async fn new(db_config: Option<&DatabaseConfig>, tokens: Arc<dyn TokenService>) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self::postgres(connections, tokens);
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
            tracing::info!("Running without postgres feature - using in-memory repositories");
        }

        tracing::info!("Application state initialized (memory)");
        Self::in_memory(tokens)
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(tokens: Arc<dyn TokenService>) -> Self {
        let store = InMemoryStore::new();
        Self {
            authors: store.authors(),
            posts: store.posts(),
            features: store.features(),
            projects: store.projects(),
            about: store.about(),
            tokens,
            storage: "memory",
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: DatabaseConnections, tokens: Arc<dyn TokenService>) -> Self {
        let db = Arc::new(connections.main);
        Self {
            authors: Arc::new(PostgresAuthorRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            features: Arc::new(PostgresFeatureRepository::new(db.clone())),
            projects: Arc::new(PostgresProjectRepository::new(db.clone())),
            about: Arc::new(PostgresAboutRepository::new(db)),
            tokens,
            storage: "postgres",
        }
    }
}
