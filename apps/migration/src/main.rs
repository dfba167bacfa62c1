//! Apply or roll back the Folio schema.
//!
//! Wraps the SeaORM migration CLI (`up`, `down`, `fresh`, `status`, ...). The
//! target database comes from `DATABASE_URL`, read from `.env` when present.

use sea_orm_migration::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sea_orm_migration=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    cli::run_cli(migration::Migrator).await;
}
