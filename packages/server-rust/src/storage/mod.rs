//! Product persistence.
//!
//! Layered from the engine up:
//!
//! - [`StorageClient`]: key-value engine seam ([`engines`] holds the
//!   in-memory and `redb` implementations, [`build_client`] picks one)
//! - [`ProductMapper`]: `ProductDto` to storage item and back
//! - [`ProductGateway`]: table-name resolution, create and get

pub mod client;
pub mod engines;
pub mod factory;
pub mod gateway;
pub mod mapper;

pub use client::{StorageClient, KEY_ATTRIBUTE};
pub use factory::{build_client, StorageConfig, StorageEngineKind};
pub use gateway::{PersistenceError, ProductGateway, StorageProductGateway};
pub use mapper::{MapperError, ProductItemMapper, ProductMapper};
