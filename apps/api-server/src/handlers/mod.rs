//! HTTP handlers and route configuration.

mod health;
pub mod resource;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, web};

use folio_core::permission::IsAdminOrReadOnly;

use crate::middleware::error::{AppError, AppResult};
use crate::serializers::{
    AboutSerializer, AuthorSerializer, FeatureSerializer, PostSerializer, ProjectSerializer,
};
use crate::state::AppState;
use resource::{Endpoint, register};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.route("/health/", web::get().to(health::health_check));

    register(
        cfg,
        "/authors",
        Endpoint::new(state.authors.clone(), AuthorSerializer, IsAdminOrReadOnly),
    );
    register(
        cfg,
        "/posts",
        Endpoint::new(
            state.posts.clone(),
            PostSerializer::new(state.authors.clone(), state.posts.clone()),
            IsAdminOrReadOnly,
        ),
    );
    register(
        cfg,
        "/features",
        Endpoint::new(state.features.clone(), FeatureSerializer, IsAdminOrReadOnly),
    );
    register(
        cfg,
        "/projects",
        Endpoint::new(state.projects.clone(), ProjectSerializer, IsAdminOrReadOnly),
    );
    register(
        cfg,
        "/about",
        Endpoint::new(state.about.clone(), AboutSerializer, IsAdminOrReadOnly),
    );
}

/// Fallback for unmatched paths.
pub async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("Not found.".to_string()))
}
