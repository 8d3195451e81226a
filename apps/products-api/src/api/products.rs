//! Products API routes

use axum::Router;
use domain_products::{
    InMemoryProductRepository, PgProductRepository, ProductResult, ProductService, handlers,
};

use crate::state::Storage;

/// Build the products router over the configured backend
pub fn router(storage: &Storage) -> Router {
    match storage {
        Storage::Postgres(db) => {
            handlers::router(ProductService::new(PgProductRepository::new(db.clone())))
        }
        Storage::Memory => handlers::router(ProductService::new(InMemoryProductRepository::new())),
    }
}

/// Create the `products` table when running on Postgres
pub async fn init_schema(storage: &Storage) -> ProductResult<()> {
    match storage {
        Storage::Postgres(db) => PgProductRepository::new(db.clone()).init_schema().await,
        Storage::Memory => Ok(()),
    }
}
