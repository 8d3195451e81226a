use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Pagination, Product, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product and return the stored record
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Total number of products
    async fn count(&self) -> ProductResult<u64>;

    /// List products in stored order. `None` pagination fields are not applied.
    async fn list(&self, page: Pagination) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Get a product by its unique name
    async fn get_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    /// Merge the present fields into an existing product
    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product, returning its last state
    async fn delete(&self, id: i32) -> ProductResult<Product>;
}

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    products: BTreeMap<i32, Product>,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        // Mirrors the unique constraint on the name column
        if store.products.values().any(|p| p.name == input.name) {
            return Err(ProductError::Database(format!(
                "duplicate key value violates unique constraint on name '{}'",
                input.name
            )));
        }

        store.last_id += 1;
        let product = Product::new(store.last_id, input);
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn count(&self) -> ProductResult<u64> {
        let store = self.store.read().await;
        Ok(store.products.len() as u64)
    }

    async fn list(&self, page: Pagination) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;

        let skip = page.skip.unwrap_or(0) as usize;
        let take = page.take.map_or(usize::MAX, |t| t as usize);

        Ok(store
            .products
            .values()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().find(|p| p.name == name).cloned())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        if let Some(ref new_name) = input.name {
            let taken = store
                .products
                .values()
                .any(|p| p.id != id && &p.name == new_name);
            if taken {
                return Err(ProductError::Database(format!(
                    "duplicate key value violates unique constraint on name '{}'",
                    new_name
                )));
            }
        }

        let product = store
            .products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let removed = store
            .products
            .remove(&id)
            .ok_or(ProductError::NotFound(id))?;

        tracing::info!(product_id = id, "Deleted product");
        Ok(removed)
    }
}
