//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and `ProductService` construction
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: error body shapes
//! - `errors.rs`: failure -> status code + JSON body translation
//! - `docs.rs`: generated OpenAPI document

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod docs;
pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .merge(routes::router())
        .fallback(routes::system::no_route)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(Extension(services)),
        )
}
