//! Rendering surface contract.
//!
//! Components draw through [`Surface`] only, so the tree never depends on a
//! particular backend. [`Canvas`] is the bundled software implementation.

mod canvas;

pub use canvas::{Canvas, CanvasRegion};

use image::RgbaImage;

use crate::coords::{Position, Rect, Size};
use crate::paint::Color;

/// A drawable pixel region.
///
/// Coordinates passed to a surface are relative to its own top-left corner.
/// Writes outside the region are clipped.
pub trait Surface {
    /// Region size in pixels.
    fn size(&self) -> Size;

    /// Overwrites every pixel of the region with `color`.
    fn fill(&mut self, color: Color);

    /// Alpha-blends `image` with its top-left corner at `offset`.
    fn blit(&mut self, image: &RgbaImage, offset: Position);

    /// A view onto `rect` of this surface, clipped to its bounds.
    fn subsurface(&mut self, rect: Rect) -> Box<dyn Surface + '_>;
}
