//! Background artists. Every component draws exactly one.

mod color;
mod image;

pub use color::{BackgroundColor, ColorForm};
pub use self::image::{BackgroundImage, ImageForm};
