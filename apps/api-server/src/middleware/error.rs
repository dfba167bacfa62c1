//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header},
};
use std::fmt;

use folio_core::{DomainError, RepoError, ValidationErrors};
use folio_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Validation(ValidationErrors),
    Unauthorized(String),
    Forbidden,
    /// `allow` lists the methods the resource does route, when known.
    MethodNotAllowed {
        method: String,
        allow: Option<&'static str>,
    },
    Internal(String),
}

impl AppError {
    /// A 400 carrying a single `non_field_errors` message.
    pub fn non_field(message: impl Into<String>) -> Self {
        AppError::Validation(ValidationErrors::single(
            ValidationErrors::NON_FIELD,
            message,
        ))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {}", errors),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::MethodNotAllowed { method, .. } => write!(f, "Method not allowed: {}", method),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Validation(errors) => ErrorResponse::validation(errors.clone().into_inner()),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized(detail),
            AppError::Forbidden => ErrorResponse::forbidden(),
            AppError::MethodNotAllowed { method, .. } => ErrorResponse::method_not_allowed(method),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        let mut response = HttpResponse::build(self.status_code());
        if let AppError::MethodNotAllowed {
            allow: Some(allow), ..
        } = self
        {
            response.insert_header((header::ALLOW, *allow));
        }
        response.json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::PermissionDenied => AppError::Forbidden,
            DomainError::Repo(repo) => repo.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Not found.".to_string()),
            // A uniqueness or reference check lost a race with another write.
            RepoError::Constraint(msg) => AppError::non_field(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: AppError) -> serde_json::Value {
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[actix_web::test]
    async fn validation_errors_render_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "This field is required.");
        let err = AppError::from(DomainError::Validation(errors));

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = body_of(err).await;
        assert_eq!(body["status"], 400);
        assert_eq!(body["errors"]["title"][0], "This field is required.");
    }

    #[actix_web::test]
    async fn constraint_violation_is_a_client_error() {
        let err = AppError::from(RepoError::Constraint("duplicate slug".into()));

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = body_of(err).await;
        assert_eq!(body["errors"]["non_field_errors"][0], "duplicate slug");
    }

    #[actix_web::test]
    async fn storage_failures_hide_their_cause() {
        let err = AppError::from(DomainError::Repo(RepoError::Query(
            "relation \"posts\" does not exist".into(),
        )));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(err).await;
        assert_eq!(body["title"], "Internal Server Error");
        assert!(body.get("detail").is_none());
    }

    #[test]
    fn not_found_names_the_lookup() {
        let err = AppError::from(DomainError::NotFound {
            entity_type: "Post",
            lookup: "slug",
            key: "missing".into(),
        });

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Not found: No Post found with slug missing");
    }
}
