//! Principal extraction from bearer tokens.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use folio_core::Principal;
use folio_core::ports::AuthError;

use super::error::AppError;
use crate::state::AppState;

/// The principal behind a request.
///
/// Requests without an `Authorization` header are anonymous. A header that is
/// present but does not carry a valid bearer token is rejected with 401 rather
/// than downgraded to anonymous.
#[derive(Debug, Clone)]
pub struct Caller(pub Principal);

fn rejection(err: AuthError) -> AppError {
    let detail = match err {
        AuthError::TokenExpired => {
            "Your authentication token has expired. Please request a new one.".to_string()
        }
        AuthError::InvalidToken(msg) => msg,
        AuthError::Signing(msg) => {
            return AppError::Internal(format!("token service misconfigured: {msg}"));
        }
    };
    AppError::Unauthorized(detail)
}

fn extract(req: &HttpRequest) -> Result<Principal, AppError> {
    let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(Principal::Anonymous);
    };

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("AppState not found in app data".to_string()))?;

    let token = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Expected Bearer token".to_string()))?;

    let claims = state.tokens.validate_token(token.trim()).map_err(rejection)?;
    Ok(Principal::from(claims))
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req).map(Caller))
    }
}
