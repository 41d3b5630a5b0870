//! Postgres-backed product store.
//!
//! Rows live in the `products` table created by [`crate::db::ensure_schema`].
//! `id` is a `BIGSERIAL`, so inserts let Postgres assign the identifier and
//! read it back through `RETURNING`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use catalog_core::ProductId;
use catalog_products::{Direction, Product, ProductStore, Sort, SortField, StoreError};

const FIND_PRODUCT_SQL: &str = include_str!("sql/find_product.sql");
const INSERT_PRODUCT_SQL: &str = include_str!("sql/insert_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");

/// Postgres-backed `ProductStore`.
///
/// The pool is cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: Some(ProductId::new(row.try_get::<i64, _>("id")?)),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get::<Decimal, _>("price")?,
        stock: row.try_get("stock")?,
    })
}

fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { index, source } => {
            StoreError::Decode(format!("column {index}: {source}"))
        }
        sqlx::Error::ColumnNotFound(column) => StoreError::Decode(format!("missing column {column}")),
        other => StoreError::backend(other),
    }
}

/// `ORDER BY` clause for a sort. Columns come from a fixed whitelist; `id` breaks ties.
fn order_by(sort: Sort) -> &'static str {
    match (sort.field, sort.direction) {
        (SortField::Id, Direction::Ascending) => "ORDER BY id ASC",
        (SortField::Id, Direction::Descending) => "ORDER BY id DESC",
        (SortField::Name, Direction::Ascending) => "ORDER BY name ASC, id ASC",
        (SortField::Name, Direction::Descending) => "ORDER BY name DESC, id ASC",
        (SortField::Price, Direction::Ascending) => "ORDER BY price ASC, id ASC",
        (SortField::Price, Direction::Descending) => "ORDER BY price DESC, id ASC",
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(FIND_PRODUCT_SQL)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        row.as_ref()
            .map(product_from_row)
            .transpose()
            .map_err(store_error)
    }

    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        let row = match product.id {
            None => sqlx::query(INSERT_PRODUCT_SQL)
                .bind(&product.name)
                .bind(&product.description)
                .bind(product.price)
                .bind(product.stock)
                .fetch_one(&self.pool)
                .await
                .map_err(store_error)?,
            Some(id) => sqlx::query(UPDATE_PRODUCT_SQL)
                .bind(id.get())
                .bind(&product.name)
                .bind(&product.description)
                .bind(product.price)
                .bind(product.stock)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error)?
                .ok_or(StoreError::Missing(id))?,
        };

        let saved = product_from_row(&row).map_err(store_error)?;
        tracing::debug!(product_id = ?saved.id, "product row written");
        Ok(saved)
    }

    async fn delete(&self, product: &Product) -> Result<(), StoreError> {
        let Some(id) = product.id else {
            return Ok(());
        };

        let result = sqlx::query(DELETE_PRODUCT_SQL)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        tracing::debug!(product_id = %id, rows = result.rows_affected(), "product row deleted");
        Ok(())
    }

    async fn find_all(&self, sort: Sort) -> Result<Vec<Product>, StoreError> {
        let sql = format!("{} {}", LIST_PRODUCTS_SQL.trim_end(), order_by(sort));
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        rows.iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(store_error)
    }
}
