//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::server::{create_router, health_router};
use std::io;

use crate::config::Config;
use crate::openapi::ApiDoc;
use crate::state::Storage;

/// Application routes; products live under `/products`
pub fn routes(storage: &Storage) -> Router {
    Router::new().nest("/products", products::router(storage))
}

/// Full service router: docs, middleware, product routes and probes.
pub fn app(config: &Config, storage: &Storage) -> io::Result<Router> {
    Ok(create_router::<ApiDoc>(routes(storage), &config.server)?
        .merge(health_router(config.app))
        .merge(health::router(storage.clone())))
}
