//! Products Core — product records, storage values, clock and configuration seams.

pub mod clock;
pub mod config;
pub mod product;
pub mod types;

pub use clock::{ClockSource, ManualClock, SystemClock};
pub use config::{ConfigProvider, EnvConfigProvider, MapConfigProvider, PRODUCTS_TABLE_NAME};
pub use product::{ProductAttributes, ProductDto, Request};
pub use types::{Item, Value};
