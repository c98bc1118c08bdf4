use async_trait::async_trait;

use crate::catalog::product::{NewProduct, Product, ProductPatch};
use crate::errors::ServiceError;

/// Trait abstraction over catalog storage.
/// The HTTP layer only sees this, not the file-backed manager.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get_by_id(&self, id: u64) -> Result<Product, ServiceError>;
    async fn add(&self, input: NewProduct) -> Result<Product, ServiceError>;
    async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError>;
    async fn delete_all(&self) -> Result<usize, ServiceError>;
    async fn delete_one(&self, id: u64) -> Result<Product, ServiceError>;
}
