//! Builds the configured [`StorageClient`].

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::client::StorageClient;
use super::engines::MemoryStorageClient;

/// Which storage engine backs the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StorageEngineKind {
    /// Process-local `DashMap`. Contents are lost on exit.
    #[default]
    Memory,
    /// Single-file `redb` database.
    Redb,
}

/// Storage engine selection and its settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Engine to build.
    pub engine: StorageEngineKind,
    /// Database file for the `redb` engine.
    pub redb_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            engine: StorageEngineKind::Memory,
            redb_path: PathBuf::from("products.redb"),
        }
    }
}

/// Builds the storage client described by `config`.
///
/// # Errors
///
/// Returns an error if the `redb` database cannot be opened, or if the
/// `redb` engine is requested in a build without the `redb` feature.
pub fn build_client(config: &StorageConfig) -> anyhow::Result<Arc<dyn StorageClient>> {
    match config.engine {
        StorageEngineKind::Memory => {
            info!("Using in-memory storage engine");
            Ok(Arc::new(MemoryStorageClient::new()))
        }
        StorageEngineKind::Redb => build_redb(config),
    }
}

#[cfg(feature = "redb")]
fn build_redb(config: &StorageConfig) -> anyhow::Result<Arc<dyn StorageClient>> {
    info!(path = %config.redb_path.display(), "Using redb storage engine");
    Ok(Arc::new(super::engines::RedbStorageClient::open(
        &config.redb_path,
    )?))
}

#[cfg(not(feature = "redb"))]
fn build_redb(_config: &StorageConfig) -> anyhow::Result<Arc<dyn StorageClient>> {
    anyhow::bail!("redb storage engine requires the `redb` feature")
}
