//! Infrastructure layer: data store adapters and database wiring.

pub mod db;
pub mod store;

pub use store::{InMemoryProductStore, PostgresProductStore};
