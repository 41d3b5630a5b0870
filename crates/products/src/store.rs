//! Data store collaborator used by [`crate::ProductService`].

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::ProductId;

use crate::product::Product;

/// Column a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

impl Sort {
    pub const fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Ascending,
        }
    }

    pub const fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Descending,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("row could not be decoded: {0}")]
    Decode(String),

    /// An update targeted a row that no longer exists.
    #[error("product {0} vanished before it could be written")]
    Missing(ProductId),
}

impl StoreError {
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

/// Persistence primitives the service relies on.
///
/// `save` inserts when the product has no id (assigning one) and overwrites
/// the existing row otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;
    async fn save(&self, product: Product) -> Result<Product, StoreError>;
    async fn delete(&self, product: &Product) -> Result<(), StoreError>;
    async fn find_all(&self, sort: Sort) -> Result<Vec<Product>, StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        (**self).save(product).await
    }

    async fn delete(&self, product: &Product) -> Result<(), StoreError> {
        (**self).delete(product).await
    }

    async fn find_all(&self, sort: Sort) -> Result<Vec<Product>, StoreError> {
        (**self).find_all(sort).await
    }
}
