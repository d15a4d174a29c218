use image::RgbaImage;

use crate::coords::{Position, Rect, Size};
use crate::paint::Color;

use super::Surface;

/// Owned RGBA pixel buffer.
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    pub fn new(size: Size) -> Self {
        Self::filled(size, Color::transparent())
    }

    pub fn filled(size: Size, color: Color) -> Self {
        let w = size.width.max(0) as u32;
        let h = size.height.max(0) as u32;
        Self { pixels: RgbaImage::from_pixel(w, h, color.into()) }
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 {
            return None;
        }
        self.pixels.get_pixel_checked(x as u32, y as u32).map(|p| Color::from(*p))
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.pixels.width() as i32, self.pixels.height() as i32)
    }
}

impl Surface for Canvas {
    fn size(&self) -> Size {
        self.bounds().size
    }

    fn fill(&mut self, color: Color) {
        let bounds = self.bounds();
        fill_rect(&mut self.pixels, bounds, color);
    }

    fn blit(&mut self, image: &RgbaImage, offset: Position) {
        let bounds = self.bounds();
        blit_clipped(&mut self.pixels, bounds, image, offset);
    }

    fn subsurface(&mut self, rect: Rect) -> Box<dyn Surface + '_> {
        let bounds = self.bounds();
        Box::new(CanvasRegion::new(&mut self.pixels, bounds, rect))
    }
}

/// Borrowed window into a [`Canvas`].
///
/// `visible` is the part of the requested region that actually lies on the
/// canvas; `origin` is where the requested region starts, which may be off
/// the canvas when the region is partly clipped.
pub struct CanvasRegion<'a> {
    pixels: &'a mut RgbaImage,
    origin: Position,
    size: Size,
    visible: Option<Rect>,
}

impl<'a> CanvasRegion<'a> {
    fn new(pixels: &'a mut RgbaImage, parent_visible: Rect, requested: Rect) -> Self {
        Self {
            pixels,
            origin: requested.origin,
            size: requested.size,
            visible: parent_visible.intersect(requested),
        }
    }

    fn absolute(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

impl Surface for CanvasRegion<'_> {
    fn size(&self) -> Size {
        self.size
    }

    fn fill(&mut self, color: Color) {
        if let Some(visible) = self.visible {
            fill_rect(&mut *self.pixels, visible, color);
        }
    }

    fn blit(&mut self, image: &RgbaImage, offset: Position) {
        if let Some(visible) = self.visible {
            blit_clipped(&mut *self.pixels, visible, image, self.origin + offset);
        }
    }

    fn subsurface(&mut self, rect: Rect) -> Box<dyn Surface + '_> {
        let requested = rect.translated(self.origin);
        let parent_visible = self
            .visible
            .unwrap_or(Rect::from_origin_size(self.absolute().origin, Size::ZERO));
        Box::new(CanvasRegion::new(&mut *self.pixels, parent_visible, requested))
    }
}

fn fill_rect(pixels: &mut RgbaImage, rect: Rect, color: Color) {
    let px: image::Rgba<u8> = color.into();
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            pixels.put_pixel(x as u32, y as u32, px);
        }
    }
}

/// Blends `image` placed at absolute `at`, touching only pixels inside `clip`.
fn blit_clipped(pixels: &mut RgbaImage, clip: Rect, image: &RgbaImage, at: Position) {
    let placed = Rect::from_origin_size(at, Size::new(image.width() as i32, image.height() as i32));
    let Some(area) = clip.intersect(placed) else {
        return;
    };
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let src = Color::from(*image.get_pixel((x - at.x) as u32, (y - at.y) as u32));
            let dst = Color::from(*pixels.get_pixel(x as u32, y as u32));
            pixels.put_pixel(x as u32, y as u32, src.blend_over(dst, 0xff).into());
        }
    }
}
