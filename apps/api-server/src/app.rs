//! Application assembly shared by the server and the HTTP tests.

use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{NormalizePath, TrailingSlash},
    web,
};
use tracing_actix_web::TracingLogger;

use crate::handlers;
use crate::middleware::request_id::RequestIdMiddleware;
use crate::state::AppState;

/// Build the application around `state`.
pub fn build(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let routes = state.clone();

    App::new()
        .wrap(NormalizePath::new(TrailingSlash::Always))
        .wrap(TracingLogger::default())
        .wrap(RequestIdMiddleware)
        .app_data(web::Data::new(state))
        .configure(move |cfg| handlers::configure_routes(cfg, &routes))
        .default_service(web::to(handlers::not_found))
}
