//! # Folio API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::HttpServer;

use folio_infra::JwtTokenService;

mod app;
mod config;
mod handlers;
mod middleware;
mod serializers;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        service = %config.telemetry.service_name,
        "Starting Folio API Server on {}:{}",
        config.host,
        config.port
    );

    let tokens = Arc::new(JwtTokenService::new(config.jwt.clone()));
    let state = AppState::new(config.database.as_ref(), tokens).await;

    HttpServer::new(move || app::build(state.clone()))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
