//! Integer geometry shared by surfaces, layouts and components.
//!
//! Canonical space:
//! - Pixels
//! - Origin top-left
//! - +X right, +Y down

mod point;
mod rect;

pub use point::{Position, Size};
pub use rect::Rect;
