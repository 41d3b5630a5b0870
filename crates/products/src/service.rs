//! Product use cases: lookup, create, update, delete, sorted listing.
//!
//! Update and delete read the row and then write it in two separate store
//! calls. A concurrent writer can slip in between; last write wins.

use catalog_core::{DomainError, DomainResult, ProductId};

use crate::mapper;
use crate::product::{Product, ProductView, ValidProduct};
use crate::store::{ProductStore, Sort, SortField, StoreError};

#[derive(Debug, Clone)]
pub struct ProductService<S> {
    store: S,
}

impl<S> ProductService<S>
where
    S: ProductStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn find_by_id(&self, id: ProductId) -> DomainResult<ProductView> {
        let product = self.require(id).await?;
        Ok(mapper::to_view(&product))
    }

    /// Persist a new product. Any id carried by `input` is discarded.
    pub async fn create(&self, input: ValidProduct) -> DomainResult<ProductView> {
        let mut product = mapper::to_entity(input);
        product.id = None;

        let saved = self.store.save(product).await.map_err(store_failure)?;
        tracing::info!(product_id = ?saved.id, "product created");
        Ok(mapper::to_view(&saved))
    }

    pub async fn update(&self, id: ProductId, input: ValidProduct) -> DomainResult<ProductView> {
        let mut product = self.require(id).await?;
        mapper::apply_update(input, &mut product);

        let saved = self.store.save(product).await.map_err(store_failure)?;
        tracing::info!(product_id = %id, "product updated");
        Ok(mapper::to_view(&saved))
    }

    pub async fn delete(&self, id: ProductId) -> DomainResult<()> {
        let product = self.require(id).await?;
        self.store.delete(&product).await.map_err(store_failure)?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    /// All products, cheapest first. Ties keep whatever order the store yields.
    pub async fn list_ordered_by_price(&self) -> DomainResult<Vec<ProductView>> {
        let products = self
            .store
            .find_all(Sort::ascending(SortField::Price))
            .await
            .map_err(store_failure)?;
        Ok(mapper::to_view_list(&products))
    }

    async fn require(&self, id: ProductId) -> DomainResult<Product> {
        self.store
            .find_by_id(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| DomainError::not_found(Product::ENTITY, id))
    }
}

fn store_failure(err: StoreError) -> DomainError {
    tracing::error!(error = %err, "product store failure");
    DomainError::unexpected(err.to_string())
}
