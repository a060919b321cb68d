//! Concrete [`StorageClient`](super::StorageClient) implementations.

pub mod memory;
#[cfg(feature = "redb")]
pub mod redb;

pub use memory::MemoryStorageClient;
#[cfg(feature = "redb")]
pub use self::redb::RedbStorageClient;
