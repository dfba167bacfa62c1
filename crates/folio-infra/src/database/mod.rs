//! Relational storage through SeaORM.
//!
//! Repositories hold the connection behind an `Arc`, so one pool can back all
//! of them.

mod connections;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
mod postgres_posts;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;
#[cfg(feature = "postgres")]
pub use postgres_base::{PostgresBaseRepository, RecordEntity};
#[cfg(feature = "postgres")]
pub use postgres_posts::PostgresPostRepository;

#[cfg(feature = "postgres")]
pub type PostgresAuthorRepository = PostgresBaseRepository<entity::author::Entity>;
#[cfg(feature = "postgres")]
pub type PostgresFeatureRepository = PostgresBaseRepository<entity::feature::Entity>;
#[cfg(feature = "postgres")]
pub type PostgresProjectRepository = PostgresBaseRepository<entity::project::Entity>;
#[cfg(feature = "postgres")]
pub type PostgresAboutRepository = PostgresBaseRepository<entity::about::Entity>;

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
