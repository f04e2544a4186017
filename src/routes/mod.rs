//! Route tables and the assembled application router.

mod common;
mod company;
mod invoice;

pub use common::common_routes;
pub use company::company_routes;
pub use invoice::invoice_routes;

use crate::error::{error_body, AppError};
use crate::state::AppState;
use axum::{
    http::header,
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

async fn fallback() -> AppError {
    AppError::NotFound("Not Found".into())
}

/// Rewrite error responses produced outside the handlers (405, 413, ...)
/// into the JSON error envelope. Handler errors are already JSON and pass through.
async fn envelope_bare_errors(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    if is_json {
        return response;
    }
    let message = status.canonical_reason().unwrap_or("Error");
    let mut enveloped = (status, Json(error_body(status, message))).into_response();
    if let Some(allow) = response.headers().get(header::ALLOW) {
        enveloped.headers_mut().insert(header::ALLOW, allow.clone());
    }
    enveloped
}

/// Full API: operational routes, `/companies`, `/invoices`, and the error envelope for
/// unknown paths, unsupported methods and oversized bodies.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(company_routes(state.clone()))
        .merge(invoice_routes(state))
        .fallback(fallback)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::map_response(envelope_bare_errors)),
        )
}
