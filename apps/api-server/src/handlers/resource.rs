//! Generic list-create and retrieve-update-destroy handlers.
//!
//! Every content type is served by the same handlers, configured per type
//! through an [`Endpoint`]: which repository to use, how to (de)serialize, and
//! which access policy applies.

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, http, http::header, web};
use serde_json::Value;

use folio_core::ports::Repository;
use folio_core::{DomainError, Method, Permission, Principal, Record};

use crate::middleware::auth::Caller;
use crate::middleware::error::{AppError, AppResult};
use crate::serializers::Serializer;

const LIST_METHODS: &str = "GET, POST, HEAD, OPTIONS";
const DETAIL_METHODS: &str = "GET, PUT, PATCH, DELETE, HEAD, OPTIONS";

/// Per-type handler configuration.
pub struct Endpoint<S: Serializer> {
    repository: Arc<dyn Repository<S::Record>>,
    serializer: S,
    permission: Arc<dyn Permission<S::Record>>,
}

impl<S: Serializer> Endpoint<S> {
    pub fn new(
        repository: Arc<dyn Repository<S::Record>>,
        serializer: S,
        permission: impl Permission<S::Record> + 'static,
    ) -> Self {
        Self {
            repository,
            serializer,
            permission: Arc::new(permission),
        }
    }

    /// Request-level policy check. Runs before any data access.
    fn authorize(&self, req: &HttpRequest, principal: &Principal) -> AppResult<Method> {
        let method: Method = req
            .method()
            .as_str()
            .parse()
            .map_err(|_| AppError::MethodNotAllowed {
                method: req.method().to_string(),
                allow: None,
            })?;

        if !self.permission.has_permission(method, principal) {
            tracing::debug!(
                entity = <S::Record as Record>::ENTITY,
                %method,
                authenticated = principal.is_authenticated(),
                "Permission denied"
            );
            return Err(DomainError::PermissionDenied.into());
        }
        Ok(method)
    }

    /// Record-level policy check. Runs after fetching, before mutating.
    fn authorize_object(
        &self,
        method: Method,
        principal: &Principal,
        record: &S::Record,
    ) -> AppResult<()> {
        if !self.permission.has_object_permission(method, principal, record) {
            tracing::debug!(
                entity = <S::Record as Record>::ENTITY,
                id = record.id(),
                %method,
                "Object permission denied"
            );
            return Err(DomainError::PermissionDenied.into());
        }
        Ok(())
    }

    /// Look up the record addressed by a path segment. Segments that do not
    /// parse as a key are treated like keys that match nothing.
    async fn fetch(&self, raw_key: &str) -> AppResult<S::Record> {
        let not_found = || DomainError::NotFound {
            entity_type: <S::Record as Record>::ENTITY,
            lookup: <S::Record as Record>::LOOKUP_FIELD,
            key: raw_key.to_string(),
        };

        let key = raw_key
            .parse::<<S::Record as Record>::Key>()
            .map_err(|_| not_found())?;

        Ok(self.repository.get(&key).await?.ok_or_else(not_found)?)
    }

    fn render(&self, record: &S::Record) -> S::Output {
        self.serializer.to_representation(record)
    }
}

/// Decode a request body. An empty body reads as an empty object so that the
/// serializer reports the missing fields.
fn parse_body(body: &[u8]) -> AppResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|e| AppError::non_field(format!("JSON parse error - {e}")))
}

/// GET/HEAD on a collection.
pub async fn list<S: Serializer>(
    req: HttpRequest,
    Caller(principal): Caller,
    endpoint: web::Data<Endpoint<S>>,
) -> AppResult<HttpResponse> {
    endpoint.authorize(&req, &principal)?;

    let records = endpoint.repository.list().await?;
    let body: Vec<S::Output> = records.iter().map(|r| endpoint.render(r)).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST on a collection.
pub async fn create<S: Serializer>(
    req: HttpRequest,
    Caller(principal): Caller,
    endpoint: web::Data<Endpoint<S>>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    endpoint.authorize(&req, &principal)?;

    let data = parse_body(&body)?;
    let draft = endpoint.serializer.validate_create(&data).await?;
    let record = endpoint.repository.create(draft).await?;

    tracing::info!(
        entity = <S::Record as Record>::ENTITY,
        id = record.id(),
        key = %record.lookup_key(),
        "Record created"
    );

    Ok(HttpResponse::Created().json(endpoint.render(&record)))
}

/// GET/HEAD on a single record.
pub async fn retrieve<S: Serializer>(
    req: HttpRequest,
    Caller(principal): Caller,
    endpoint: web::Data<Endpoint<S>>,
    key: web::Path<String>,
) -> AppResult<HttpResponse> {
    let method = endpoint.authorize(&req, &principal)?;
    let record = endpoint.fetch(&key).await?;
    endpoint.authorize_object(method, &principal, &record)?;

    Ok(HttpResponse::Ok().json(endpoint.render(&record)))
}

/// PUT (full) or PATCH (partial) on a single record.
pub async fn update<S: Serializer>(
    req: HttpRequest,
    Caller(principal): Caller,
    endpoint: web::Data<Endpoint<S>>,
    key: web::Path<String>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let method = endpoint.authorize(&req, &principal)?;
    let record = endpoint.fetch(&key).await?;
    endpoint.authorize_object(method, &principal, &record)?;

    let data = parse_body(&body)?;
    let partial = method == Method::Patch;
    let changes = endpoint
        .serializer
        .validate_update(&record, &data, partial)
        .await?;
    let updated = endpoint
        .repository
        .update(&record.lookup_key(), changes)
        .await?;

    tracing::info!(
        entity = <S::Record as Record>::ENTITY,
        id = updated.id(),
        partial,
        "Record updated"
    );

    Ok(HttpResponse::Ok().json(endpoint.render(&updated)))
}

/// DELETE on a single record.
pub async fn destroy<S: Serializer>(
    req: HttpRequest,
    Caller(principal): Caller,
    endpoint: web::Data<Endpoint<S>>,
    key: web::Path<String>,
) -> AppResult<HttpResponse> {
    let method = endpoint.authorize(&req, &principal)?;
    let record = endpoint.fetch(&key).await?;
    endpoint.authorize_object(method, &principal, &record)?;

    endpoint.repository.delete(&record.lookup_key()).await?;

    tracing::info!(entity = <S::Record as Record>::ENTITY, id = record.id(), "Record deleted");

    Ok(HttpResponse::NoContent().finish())
}

async fn options<S: Serializer>(
    req: HttpRequest,
    principal: &Principal,
    endpoint: &Endpoint<S>,
    allow: &'static str,
) -> AppResult<HttpResponse> {
    endpoint.authorize(&req, principal)?;
    Ok(HttpResponse::Ok()
        .insert_header((header::ALLOW, allow))
        .finish())
}

pub async fn list_options<S: Serializer>(
    req: HttpRequest,
    Caller(principal): Caller,
    endpoint: web::Data<Endpoint<S>>,
) -> AppResult<HttpResponse> {
    options(req, &principal, &endpoint, LIST_METHODS).await
}

pub async fn detail_options<S: Serializer>(
    req: HttpRequest,
    Caller(principal): Caller,
    endpoint: web::Data<Endpoint<S>>,
) -> AppResult<HttpResponse> {
    options(req, &principal, &endpoint, DETAIL_METHODS).await
}

async fn method_not_allowed(req: HttpRequest, allow: &'static str) -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed {
        method: req.method().to_string(),
        allow: Some(allow),
    })
}

/// Mount the collection route `{prefix}/` and the detail route
/// `{prefix}/{key}/` for one content type.
pub fn register<S: Serializer>(cfg: &mut web::ServiceConfig, prefix: &str, endpoint: Endpoint<S>) {
    let endpoint = web::Data::new(endpoint);

    cfg.service(
        web::resource(format!("{prefix}/"))
            .app_data(endpoint.clone())
            .route(web::get().to(list::<S>))
            .route(web::head().to(list::<S>))
            .route(web::post().to(create::<S>))
            .route(web::method(http::Method::OPTIONS).to(list_options::<S>))
            .default_service(web::to(|req: HttpRequest| method_not_allowed(req, LIST_METHODS))),
    )
    .service(
        web::resource(format!("{prefix}/{{key}}/"))
            .app_data(endpoint)
            .route(web::get().to(retrieve::<S>))
            .route(web::head().to(retrieve::<S>))
            .route(web::put().to(update::<S>))
            .route(web::patch().to(update::<S>))
            .route(web::delete().to(destroy::<S>))
            .route(web::method(http::Method::OPTIONS).to(detail_options::<S>))
            .default_service(web::to(|req: HttpRequest| method_not_allowed(req, DETAIL_METHODS))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_reads_as_empty_object() {
        assert_eq!(parse_body(b"").unwrap(), serde_json::json!({}));
        assert_eq!(parse_body(b" \n").unwrap(), serde_json::json!({}));
    }

    #[test]
    fn malformed_json_is_a_non_field_error() {
        let Err(AppError::Validation(errors)) = parse_body(b"{\"title\":") else {
            panic!("expected a validation error");
        };
        let messages = errors.get("non_field_errors").unwrap();
        assert!(messages[0].starts_with("JSON parse error - "));
    }
}
