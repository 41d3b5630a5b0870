use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use catalog_core::ProductId;
use catalog_products::{Direction, Product, ProductStore, Sort, SortField, StoreError};

/// In-memory product store for tests/dev.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryProductStore {
    rows: RwLock<BTreeMap<ProductId, Product>>,
    next_id: AtomicI64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.rows.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::backend("in-memory product table lock poisoned")
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.get(&id).cloned())
    }

    async fn save(&self, mut product: Product) -> Result<Product, StoreError> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        let id = match product.id {
            Some(id) if rows.contains_key(&id) => id,
            Some(id) => return Err(StoreError::Missing(id)),
            None => ProductId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
        };
        product.id = Some(id);
        rows.insert(id, product.clone());
        Ok(product)
    }

    async fn delete(&self, product: &Product) -> Result<(), StoreError> {
        let Some(id) = product.id else {
            return Ok(());
        };
        let mut rows = self.rows.write().map_err(poisoned)?;
        rows.remove(&id);
        Ok(())
    }

    async fn find_all(&self, sort: Sort) -> Result<Vec<Product>, StoreError> {
        let rows = self.rows.read().map_err(poisoned)?;
        // Rows come out in id order; the stable sort keeps that order among ties.
        let mut products: Vec<Product> = rows.values().cloned().collect();
        products.sort_by(|a, b| {
            let ord = match sort.field {
                SortField::Id => a.id.cmp(&b.id),
                SortField::Name => a.name.cmp(&b.name),
                SortField::Price => a.price.cmp(&b.price),
            };
            match sort.direction {
                Direction::Ascending => ord,
                Direction::Descending => ord.reverse(),
            }
        });
        Ok(products)
    }
}
