//! Catalog domain module: result entities, filter options and the
//! `CatalogService` boundary.

pub mod model;
pub mod service;

pub use model::{Car, FilterOptions};
pub use service::CatalogService;
