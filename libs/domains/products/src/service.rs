//! Product Service - orchestrates repository calls

use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Pagination, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service dispatching each operation to the repository.
///
/// Existence and uniqueness checks belong to the handlers; the only shaping
/// done here is deciding which pagination clauses reach the repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Persist a new product as given
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> ProductResult<u64> {
        self.repository.count().await
    }

    /// List products.
    ///
    /// A missing or negative `skip` is dropped and only `take` is applied;
    /// any valid `skip`, zero included, is passed along with `take`.
    /// A missing `take` means no limit.
    #[instrument(skip(self))]
    pub async fn get_many(
        &self,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> ProductResult<Vec<Product>> {
        let take = take.and_then(|t| u64::try_from(t).ok());
        let page = match skip.and_then(|s| u64::try_from(s).ok()) {
            Some(skip) => Pagination::skip_take(skip, take),
            None => Pagination::take(take),
        };
        self.repository.list(page).await
    }

    /// Look up a product by id; a miss is `Ok(None)`
    #[instrument(skip(self))]
    pub async fn find_one(&self, id: i32) -> ProductResult<Option<Product>> {
        self.repository.get_by_id(id).await
    }

    /// Look up a product by its unique name; a miss is `Ok(None)`
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        self.repository.get_by_name(name).await
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        self.repository.update(id, input).await
    }

    /// Delete a product, returning its last state
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i32) -> ProductResult<Product> {
        self.repository.delete(id).await
    }
}
