//! Configuration for Products API

use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig,
};
use database::postgres::PostgresConfig;
use std::str::FromStr;
use std::time::Duration;

pub use core_config::Environment;

/// Where products are persisted, from `PRODUCTS_STORAGE`.
#[derive(Clone, Debug)]
pub enum StorageConfig {
    Postgres(PostgresConfig),
    /// Process-local store, lost on restart
    Memory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StorageKind {
    Postgres,
    Memory,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected 'postgres' or 'memory', got '{}'", other)),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    /// Budget for closing the pool after a shutdown signal
    pub shutdown_timeout: Duration,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        let storage = match env_parse("PRODUCTS_STORAGE", StorageKind::Postgres)? {
            StorageKind::Postgres => StorageConfig::Postgres(PostgresConfig::from_env()?),
            StorageKind::Memory => StorageConfig::Memory,
        };

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            storage,
            shutdown_timeout: Duration::from_secs(env_parse("SHUTDOWN_TIMEOUT_SECS", 30)?),
        })
    }
}

impl StorageConfig {
    pub fn name(&self) -> &'static str {
        match self {
            StorageConfig::Postgres(_) => "postgres",
            StorageConfig::Memory => "memory",
        }
    }
}
