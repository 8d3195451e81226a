use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, RetryConfig, retry_with_backoff};

/// Connect with explicit options.
///
/// ```ignore
/// let db = database::postgres::connect(ConnectOptions::new(url)).await?;
/// ```
pub async fn connect(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect(config.into_connect_options()).await
}

/// Connect, retrying with exponential backoff while the database comes up.
///
/// # Example
/// ```ignore
/// use core_config::FromEnv;
///
/// let config = PostgresConfig::from_env()?;
/// let db = connect_from_config_with_retry(config, RetryConfig::default()).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry: RetryConfig,
) -> Result<DatabaseConnection, DatabaseError> {
    let options = config.into_connect_options();
    let attempts = retry.max_retries + 1;

    retry_with_backoff(|| connect(options.clone()), retry)
        .await
        .map_err(|e| {
            DatabaseError::ConnectionFailed(format!(
                "PostgreSQL unreachable after {} attempts: {}",
                attempts, e
            ))
        })
}
