use std::sync::Arc;

use anyhow::Context;

use catalog_infra::{InMemoryProductStore, PostgresProductStore, db};
use catalog_products::{ProductService, ProductStore};

use crate::config::{ServerConfig, StoreBackend};

/// Store handle shared by every request.
pub type SharedProductStore = Arc<dyn ProductStore>;

/// Services handed to the handlers.
#[derive(Clone)]
pub struct AppServices {
    pub products: ProductService<SharedProductStore>,
}

impl AppServices {
    pub fn new(store: SharedProductStore) -> Self {
        Self {
            products: ProductService::new(store),
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductStore::new()))
    }
}

/// Wire the configured store backend into the services.
///
/// # Errors
///
/// Fails when the postgres backend is selected without `DATABASE_URL`, or
/// when the database cannot be reached or prepared.
pub async fn build_services(config: &ServerConfig) -> anyhow::Result<AppServices> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory product store; data is lost on restart");
            Ok(AppServices::in_memory())
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when PRODUCT_STORE=postgres")?;
            let pool = db::connect(url, config.max_connections)
                .await
                .context("failed to connect to Postgres")?;
            db::ensure_schema(&pool)
                .await
                .context("failed to create products schema")?;
            tracing::info!("using postgres product store");
            Ok(AppServices::new(Arc::new(PostgresProductStore::new(pool))))
        }
    }
}
