//! Liveness and storage reachability.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub storage: &'static str,
}

/// GET /health/
///
/// Probes storage with a point lookup; a failing backend turns the response
/// into a 503 with status `degraded`.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let reachable = match state.authors.get(&0).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(storage = state.storage, error = %e, "Storage health probe failed");
            false
        }
    };

    let body = HealthResponse {
        status: if reachable { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        storage: state.storage,
    };

    if reachable {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
