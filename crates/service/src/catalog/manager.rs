use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::catalog::product::{NewProduct, Product, ProductPatch};
use crate::catalog::repository::ProductCatalog;
use crate::errors::ServiceError;
use crate::storage::json_list_store::JsonListStore;

/// File-backed product catalog.
///
/// Disk is the source of truth: every lookup and mutation reloads the list
/// before acting on it, and the in-memory copy only lives for the duration of
/// one operation. The mutex serialises operations on this instance so a
/// read-modify-write cannot interleave with another one.
pub struct CatalogManager {
    store: JsonListStore<Product>,
    products: Mutex<Vec<Product>>,
}

fn rejected(e: ServiceError) -> ServiceError {
    warn!(error = %e, "catalog operation rejected");
    e
}

fn next_id(products: &[Product]) -> u64 {
    products.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}

impl CatalogManager {
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self {
            store: JsonListStore::new(path),
            products: Mutex::new(Vec::new()),
        })
    }

    pub fn store(&self) -> &JsonListStore<Product> {
        &self.store
    }

    /// Reload `products` from disk and return a copy of the record with `id`.
    async fn lookup(
        &self,
        products: &mut Vec<Product>,
        id: u64,
    ) -> Result<Product, ServiceError> {
        if !self.store.exists().await? {
            return Err(ServiceError::NoData);
        }
        *products = self.store.load().await?;
        products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ServiceError::NotFound(id))
    }

    /// All products on disk; empty when the backing file is absent.
    pub async fn get_all(&self) -> Result<Vec<Product>, ServiceError> {
        self.store.load().await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Product, ServiceError> {
        let mut products = self.products.lock().await;
        self.lookup(&mut products, id).await.map_err(rejected)
    }

    /// Validate and append a product, assigning the next id.
    pub async fn add(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let mut products = self.products.lock().await;
        *products = self.store.load().await?;

        let product = input.into_product(next_id(&products)).map_err(rejected)?;
        if products.iter().any(|p| p.code == product.code) {
            return Err(rejected(ServiceError::DuplicateCode(product.code)));
        }

        products.push(product.clone());
        self.store.save(&products).await?;
        info!(id = product.id, code = %product.code, "product added");
        Ok(product)
    }

    /// Merge `patch` into the product with `id` and persist.
    pub async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError> {
        let mut products = self.products.lock().await;
        let current = self.lookup(&mut products, id).await.map_err(rejected)?;
        patch.validate().map_err(rejected)?;

        let updated = patch.apply(&current);
        let code_taken = products.iter().any(|p| p.id != id && p.code == updated.code);
        if patch.is_provided_code() && code_taken {
            return Err(rejected(ServiceError::DuplicateCode(updated.code)));
        }

        for slot in products.iter_mut().filter(|p| p.id == id) {
            *slot = updated.clone();
        }
        self.store.save(&products).await?;
        info!(id, "product updated");
        Ok(updated)
    }

    /// Drop every product and the backing file. Returns how many were removed;
    /// an absent file is a no-op.
    pub async fn delete_all(&self) -> Result<usize, ServiceError> {
        let mut products = self.products.lock().await;
        if !self.store.exists().await? {
            info!("no products exist; nothing to delete");
            return Ok(0);
        }

        // the count is informational; a malformed file is removed all the same
        let removed = self.store.load().await.map(|p| p.len()).unwrap_or_default();
        products.clear();
        self.store.remove().await?;
        info!(removed, "all products deleted");
        Ok(removed)
    }

    /// Remove the product with `id`. Removing the last product deletes the
    /// backing file instead of writing an empty array.
    pub async fn delete_one(&self, id: u64) -> Result<Product, ServiceError> {
        let mut products = self.products.lock().await;
        let removed = self.lookup(&mut products, id).await.map_err(rejected)?;

        products.retain(|p| p.id != id);
        if products.is_empty() {
            self.store.remove().await?;
            info!(id, "last product deleted; backing file removed");
        } else {
            self.store.save(&products).await?;
            info!(id, "product deleted");
        }
        Ok(removed)
    }
}

#[async_trait]
impl ProductCatalog for CatalogManager {
    async fn get_all(&self) -> Result<Vec<Product>, ServiceError> {
        self.get_all().await
    }

    async fn get_by_id(&self, id: u64) -> Result<Product, ServiceError> {
        self.get_by_id(id).await
    }

    async fn add(&self, input: NewProduct) -> Result<Product, ServiceError> {
        self.add(input).await
    }

    async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError> {
        self.update(id, patch).await
    }

    async fn delete_all(&self) -> Result<usize, ServiceError> {
        self.delete_all().await
    }

    async fn delete_one(&self, id: u64) -> Result<Product, ServiceError> {
        self.delete_one(id).await
    }
}
