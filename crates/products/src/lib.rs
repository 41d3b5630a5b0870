//! Products domain module.
//!
//! Business rules for the product catalog: the entity, its transfer shape,
//! field validation, entity/view mapping and the service that orchestrates
//! the data store collaborator. No HTTP and no concrete storage live here.

pub mod mapper;
pub mod product;
pub mod service;
pub mod store;

pub use product::{Product, ProductView, ValidProduct, validate};
pub use service::ProductService;
pub use store::{Direction, ProductStore, Sort, SortField, StoreError};
