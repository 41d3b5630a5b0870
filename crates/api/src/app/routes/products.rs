use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};

use catalog_core::ProductId;
use catalog_products::{ProductView, validate};

use crate::app::dto::{ErrorBody, ValidationErrorBody};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

type PathId = Result<Path<ProductId>, PathRejection>;
type JsonBody = Result<Json<ProductView>, JsonRejection>;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Create a new product and return it with its assigned id.
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = ProductView,
    responses(
        (status = 201, description = "Product created", body = ProductView),
        (status = 400, description = "Invalid input data", body = ValidationErrorBody),
    )
)]
pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: JsonBody,
) -> Result<(StatusCode, Json<ProductView>), ApiError> {
    let Json(body) = body?;
    let input = validate(&body)?;
    let created = services.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductView),
        (status = 404, description = "Product not found", body = ErrorBody),
    )
)]
pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    id: PathId,
) -> Result<Json<ProductView>, ApiError> {
    let Path(id) = id?;
    Ok(Json(services.products.find_by_id(id).await?))
}

/// Replace every field of a product except its id.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductView,
    responses(
        (status = 200, description = "Product updated", body = ProductView),
        (status = 400, description = "Invalid input data", body = ValidationErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    )
)]
pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    id: PathId,
    body: JsonBody,
) -> Result<Json<ProductView>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let input = validate(&body)?;
    Ok(Json(services.products.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorBody),
    )
)]
pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    id: PathId,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    services.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// All products, cheapest first.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "Products ordered by price ascending", body = [ProductView]),
    )
)]
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    Ok(Json(services.products.list_ordered_by_price().await?))
}
