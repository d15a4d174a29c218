//! Moleskin engine crate.
//!
//! Backend-independent primitives used by the UI layer: integer geometry,
//! colors and pixel formats, the rendering surface contract (plus a software
//! canvas), font resolution, the bounded asset cache and logger setup.

pub mod assets;
pub mod coords;
pub mod error;
pub mod logging;
pub mod paint;
pub mod surface;
pub mod text;

pub use error::ConfigError;
