//! Generated OpenAPI document.

use axum::Json;
use utoipa::OpenApi;

use catalog_products::ProductView;

use crate::app::dto::{ErrorBody, ValidationErrorBody};
use crate::app::routes::products;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        description = "REST API for managing products",
        version = "1.0.0"
    ),
    servers((url = "http://localhost:8080", description = "Development server")),
    paths(
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        products::list_products,
    ),
    components(schemas(ProductView, ErrorBody, ValidationErrorBody)),
    tags((name = "products", description = "Product management"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_product_operation() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = &doc["paths"];
        for method in ["get", "post"] {
            assert!(paths["/products"][method].is_object(), "missing {method} /products");
        }
        for method in ["get", "put", "delete"] {
            assert!(paths["/products/{id}"][method].is_object(), "missing {method} /products/{{id}}");
        }
        let schemas = &doc["components"]["schemas"];
        assert!(schemas["ProductView"].is_object());
        assert!(schemas["ValidationErrorBody"].is_object());
        assert!(schemas["ErrorBody"].is_object());
    }
}
