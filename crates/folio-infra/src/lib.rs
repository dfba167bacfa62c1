//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`:
//! record storage and bearer-token handling.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM
//! - `minimal` - in-memory storage only

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{JwtConfig, JwtTokenService};
pub use database::DatabaseConfig;
pub use memory::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConnections, PostgresAboutRepository, PostgresAuthorRepository,
    PostgresFeatureRepository, PostgresPostRepository, PostgresProjectRepository,
};
