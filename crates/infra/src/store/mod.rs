//! `ProductStore` implementations.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;
