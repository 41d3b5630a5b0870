use axum::Router;

pub mod products;
pub mod system;

/// Router for the resource endpoints.
pub fn router() -> Router {
    Router::new().nest("/products", products::router())
}
