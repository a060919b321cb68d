use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use products_core::{ConfigProvider, EnvConfigProvider, MapConfigProvider, PRODUCTS_TABLE_NAME};

use crate::logging::LogFormat;
use crate::network::NetworkConfig;
use crate::storage::{StorageConfig, StorageEngineKind};

/// Process-level configuration for the products server.
///
/// Every flag falls back to an environment variable, then to its default.
#[derive(Debug, Clone, Parser)]
#[command(name = "products-server", version, about = "Products HTTP server")]
pub struct ServerConfig {
    /// Bind address.
    #[arg(long, env = "PRODUCTS_HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Listen port. 0 means OS-assigned.
    #[arg(long, env = "PRODUCTS_PORT", default_value_t = 8080)]
    pub port: u16,
    /// Maximum request processing time in seconds.
    #[arg(long, env = "PRODUCTS_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
    /// Allowed CORS origins, comma separated. `*` allows any origin.
    #[arg(long, env = "PRODUCTS_CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub cors_origins: Vec<String>,
    /// Storage engine backing the products table.
    #[arg(long, value_enum, env = "PRODUCTS_STORAGE_ENGINE", default_value_t = StorageEngineKind::Memory)]
    pub storage_engine: StorageEngineKind,
    /// Database file for the `redb` engine.
    #[arg(long, env = "PRODUCTS_REDB_PATH", default_value = "products.redb")]
    pub redb_path: PathBuf,
    /// Products table name. When unset, it is looked up in the environment
    /// on every write.
    #[arg(long, env = "PRODUCTS_TABLE_NAME")]
    pub products_table_name: Option<String>,
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, env = "PRODUCTS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    /// Log output format.
    #[arg(long, value_enum, env = "PRODUCTS_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    #[must_use]
    pub fn network(&self) -> NetworkConfig {
        NetworkConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    #[must_use]
    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            engine: self.storage_engine,
            redb_path: self.redb_path.clone(),
        }
    }

    /// Provider the persistence gateway resolves the table name from.
    ///
    /// A table name given on the command line is pinned; otherwise the
    /// environment is consulted at call time.
    #[must_use]
    pub fn config_provider(&self) -> Arc<dyn ConfigProvider> {
        match &self.products_table_name {
            Some(name) => Arc::new(MapConfigProvider::new().with(PRODUCTS_TABLE_NAME, name.clone())),
            None => Arc::new(EnvConfigProvider),
        }
    }
}
