//! Font resolution, text measurement and rasterization.

mod font_system;

pub use font_system::{FontHandle, FontSystem};
