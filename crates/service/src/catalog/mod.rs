//! Product catalog: record types, the file-backed manager and the trait the
//! HTTP layer depends on.

pub mod manager;
pub mod product;
pub mod repository;

pub use manager::CatalogManager;
pub use product::{NewProduct, Product, ProductPatch};
pub use repository::ProductCatalog;
