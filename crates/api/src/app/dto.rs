use serde::Serialize;
use utoipa::ToSchema;

use catalog_core::Violations;

/// Body for not-found, bad-request and internal failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = 404)]
    pub status: u16,
    #[schema(example = "2025-04-24T12:34:56.000Z")]
    pub timestamp: String,
    #[schema(example = "Product not found with id: 7")]
    pub message: String,
}

/// Body for field validation failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    #[schema(example = 400)]
    pub status: u16,
    #[schema(example = "2025-04-24T14:58:20.149Z")]
    pub timestamp: String,
    /// Field name -> message of the first rule it violated.
    #[schema(value_type = std::collections::HashMap<String, String>, example = json!({
        "name": "Name is required",
        "price": "Price must be greater than 0",
        "stock": "Stock cannot be negative"
    }))]
    pub errors: Violations,
}
