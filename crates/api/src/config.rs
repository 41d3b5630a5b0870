//! Server configuration.

use clap::{Parser, ValueEnum};

use catalog_observability::LogFormat;

/// Which `ProductStore` backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// Process-local map; contents are lost on restart.
    Memory,
    /// `PostgreSQL` via `DATABASE_URL`.
    Postgres,
}

/// Catalog API server configuration.
#[derive(Debug, Parser)]
#[command(name = "catalog-api", about = "Product catalog REST API", long_about = None)]
pub struct ServerConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Product store backend
    #[arg(long, env = "PRODUCT_STORE", value_enum, default_value_t = StoreBackend::Memory)]
    pub store: StoreBackend,

    /// `PostgreSQL` connection string (required for the postgres store)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Log output format (json or pretty)
    #[arg(long, env = "LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
