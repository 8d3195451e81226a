//! Storage backend selected at startup

use database::postgres::DatabaseConnection;
use tracing::info;

/// Live storage handle shared by the product routes and the readiness probe.
#[derive(Clone)]
pub enum Storage {
    Postgres(DatabaseConnection),
    Memory,
}

impl Storage {
    /// Release pooled connections. Called from the shutdown cleanup.
    pub async fn close(self) {
        match self {
            Storage::Postgres(db) => {
                info!("Shutting down: closing PostgreSQL pool");
                match db.close().await {
                    Ok(()) => info!("PostgreSQL pool closed"),
                    Err(e) => tracing::warn!("Failed to close PostgreSQL pool: {}", e),
                }
            }
            Storage::Memory => {}
        }
    }
}
