use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use image::RgbaImage;

use crate::coords::Size;
use crate::error::ConfigError;
use crate::paint::Color;

/// A font family at a fixed pixel size.
///
/// Cheap to clone; the parsed font is shared by every handle of the family.
#[derive(Clone)]
pub struct FontHandle {
    family: Rc<str>,
    font: Rc<fontdue::Font>,
    px: f32,
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("family", &self.family)
            .field("px", &self.px)
            .finish()
    }
}

impl FontHandle {
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn px(&self) -> f32 {
        self.px
    }

    fn layout(&self, text: &str) -> Layout<()> {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&*self.font], &TextStyle::new(text, self.px, 0));
        layout
    }

    /// Pixel extent of `text` rendered on a single line.
    #[must_use]
    pub fn size_of(&self, text: &str) -> Size {
        let layout = self.layout(text);
        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Size::new(0, (self.px * 1.2).ceil() as i32);
        }

        // Pen position after each glyph rather than the bitmap edge, so
        // trailing spaces still count towards the width.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = self.font.metrics_indexed(g.key.glyph_index, self.px);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = glyphs.iter().map(|g| g.y + g.height as f32).fold(self.px, f32::max);
        Size::new(w.ceil() as i32, h.ceil() as i32)
    }

    /// Rasterizes `text` into an image exactly [`size_of`](Self::size_of) large.
    ///
    /// Without `antialias`, glyph coverage is thresholded to fully on or off.
    /// `background` fills the image first; `None` leaves it transparent.
    pub fn render(&self, text: &str, antialias: bool, color: Color, background: Option<Color>) -> RgbaImage {
        let size = self.size_of(text);
        let fill = background.unwrap_or(Color::transparent());
        let (w, h) = (size.width.max(0) as u32, size.height.max(0) as u32);
        let mut image = RgbaImage::from_pixel(w, h, fill.into());

        let layout = self.layout(text);
        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (metrics, coverage) = self.font.rasterize_config(glyph.key);
            let gx = glyph.x.round() as i32;
            let gy = glyph.y.round() as i32;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let mut cov = coverage[row * metrics.width + col];
                    if !antialias {
                        cov = if cov >= 0x80 { 0xff } else { 0 };
                    }
                    let (x, y) = (gx + col as i32, gy + row as i32);
                    if x < 0 || y < 0 || x >= size.width || y >= size.height {
                        continue;
                    }
                    let dst = Color::from(*image.get_pixel(x as u32, y as u32));
                    image.put_pixel(x as u32, y as u32, color.blend_over(dst, cov).into());
                }
            }
        }
        image
    }
}

/// Registry of font families and resolved handles.
///
/// Families are registered from TrueType/OpenType bytes. Resolution is
/// memoized per family name: the first `resolve` of a family fixes its pixel
/// size for every later caller.
#[derive(Default)]
pub struct FontSystem {
    families: HashMap<String, Rc<fontdue::Font>>,
    resolved: HashMap<String, FontHandle>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Family names match case-insensitively and ignore spaces.
    fn normalize(name: &str) -> String {
        name.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase).collect()
    }

    /// Parses `bytes` and registers them under `name`.
    ///
    /// Re-registering a family drops any handle already resolved for it.
    pub fn register_family(&mut self, name: &str, bytes: &[u8]) -> Result<(), ConfigError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| ConfigError::FontLoad(format!("{name}: {e}")))?;
        let key = Self::normalize(name);
        self.resolved.remove(&key);
        self.families.insert(key, Rc::new(font));
        log::debug!("registered font family '{name}'");
        Ok(())
    }

    pub fn has_family(&self, name: &str) -> bool {
        self.families.contains_key(&Self::normalize(name))
    }

    /// Handle for `name` at `px`, or the handle resolved earlier for `name`.
    pub fn resolve(&mut self, name: &str, px: f32) -> Result<FontHandle, ConfigError> {
        let key = Self::normalize(name);
        if let Some(handle) = self.resolved.get(&key) {
            return Ok(handle.clone());
        }

        let font = self
            .families
            .get(&key)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownFontFamily(name.to_string()))?;
        let handle = FontHandle { family: Rc::from(key.as_str()), font, px };
        self.resolved.insert(key, handle.clone());
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEJAVU_SANS: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");

    fn dejavu() -> FontSystem {
        let mut fonts = FontSystem::new();
        fonts.register_family("DejaVu Sans", DEJAVU_SANS).unwrap();
        fonts
    }

    fn alphas(image: &RgbaImage) -> Vec<u8> {
        image.pixels().map(|p| p.0[3]).collect()
    }

    // ── resolution ────────────────────────────────────────────────────────

    #[test]
    fn unknown_family_is_a_config_error() {
        let mut fonts = FontSystem::new();
        let err = fonts.resolve("dejavusans", 11.0).unwrap_err();
        assert_eq!(err, ConfigError::UnknownFontFamily("dejavusans".into()));
    }

    #[test]
    fn garbage_bytes_fail_to_register() {
        let mut fonts = FontSystem::new();
        let err = fonts.register_family("broken", b"not a font").unwrap_err();
        assert!(matches!(err, ConfigError::FontLoad(ref msg) if msg.starts_with("broken")));
        assert!(!fonts.has_family("broken"));
    }

    #[test]
    fn family_names_are_normalized() {
        assert_eq!(FontSystem::normalize("DejaVu Sans"), "dejavusans");
    }

    #[test]
    fn first_resolved_size_wins() {
        let mut fonts = dejavu();
        assert!(fonts.has_family("dejavusans"));

        let first = fonts.resolve("DejaVu Sans", 11.0).unwrap();
        let second = fonts.resolve("dejavusans", 30.0).unwrap();
        assert_eq!(first.px(), 11.0);
        assert_eq!(second.px(), 11.0);
        assert_eq!(second.family(), "dejavusans");
    }

    #[test]
    fn reregistering_forgets_resolved_size() {
        let mut fonts = dejavu();
        fonts.resolve("dejavusans", 11.0).unwrap();
        fonts.register_family("DejaVu Sans", DEJAVU_SANS).unwrap();
        assert_eq!(fonts.resolve("dejavusans", 20.0).unwrap().px(), 20.0);
    }

    // ── measuring ─────────────────────────────────────────────────────────

    #[test]
    fn text_has_positive_extent() {
        let font = dejavu().resolve("dejavusans", 11.0).unwrap();
        let size = font.size_of("Hello");
        assert!(size.width > 0);
        assert!(size.height >= 11);
        assert!(font.size_of("Hello, world").width > size.width);
    }

    #[test]
    fn empty_text_is_one_line_tall() {
        let font = dejavu().resolve("dejavusans", 10.0).unwrap();
        assert_eq!(font.size_of(""), Size::new(0, 12));
    }

    // ── rasterizing ───────────────────────────────────────────────────────

    #[test]
    fn render_matches_measured_size() {
        let font = dejavu().resolve("dejavusans", 14.0).unwrap();
        let image = font.render("Hello", true, Color::black(), None);
        let size = font.size_of("Hello");
        assert_eq!((image.width() as i32, image.height() as i32), (size.width, size.height));
    }

    #[test]
    fn aliased_text_is_fully_on_or_off() {
        let font = dejavu().resolve("dejavusans", 14.0).unwrap();
        let alphas = alphas(&font.render("Hello", false, Color::black(), None));
        assert!(alphas.iter().any(|&a| a == 0xff));
        assert!(alphas.iter().all(|&a| a == 0 || a == 0xff));
    }

    #[test]
    fn antialiased_text_has_partial_coverage() {
        let font = dejavu().resolve("dejavusans", 14.0).unwrap();
        let alphas = alphas(&font.render("Hello", true, Color::black(), None));
        assert!(alphas.iter().any(|&a| a > 0 && a < 0xff));
    }

    #[test]
    fn background_fills_behind_glyphs() {
        let font = dejavu().resolve("dejavusans", 14.0).unwrap();
        let image = font.render("Hi", false, Color::black(), Some(Color::white()));
        let colors: Vec<Color> = image.pixels().map(|p| Color::from(*p)).collect();
        assert!(colors.iter().all(|c| *c == Color::white() || *c == Color::black()));
        assert!(colors.contains(&Color::white()));
        assert!(colors.contains(&Color::black()));
    }
}
