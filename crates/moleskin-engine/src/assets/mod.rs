//! Bounded caching of expensive-to-load resources.
//!
//! [`AssetCache`] is a byte-budgeted LRU keyed by resource path. Capacities
//! are written as size expressions (`"64MiB"`, `"500kb"`) or raw byte counts
//! and are usually read from the environment through [`AssetConfig`].

mod cache;
mod config;
mod size;

pub use cache::{AssetCache, ImageCache, ImageLoader, Loader, Weigh};
pub use config::{AssetConfig, DEFAULT_CAPACITY_VAR};
pub use size::{parse_size, ByteSize};
