//! Color values and pixel-format handling.
//!
//! `Color` is what templates put into forms; `pixels` turns decoded images
//! and raw byte buffers into the RGBA layout every [`Surface`](crate::surface::Surface)
//! accepts.

mod color;
pub mod pixels;

pub use color::Color;
pub use pixels::PixelFormat;
