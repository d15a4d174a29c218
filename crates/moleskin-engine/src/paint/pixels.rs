//! Pixel formats accepted when turning image data into surface pixels.

use std::fmt;
use std::str::FromStr;

use image::{ColorType, DynamicImage, RgbaImage};

use crate::coords::Size;
use crate::error::ConfigError;

/// Source layouts a surface can blit from.
///
/// `P` is 8-bit indexed; without an explicit palette the indices are read as
/// gray levels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    P,
    Rgb,
    Rgbx,
    Rgba,
    Argb,
    Bgra,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 6] = [
        PixelFormat::P,
        PixelFormat::Rgb,
        PixelFormat::Rgbx,
        PixelFormat::Rgba,
        PixelFormat::Argb,
        PixelFormat::Bgra,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::P => "P",
            PixelFormat::Rgb => "RGB",
            PixelFormat::Rgbx => "RGBX",
            PixelFormat::Rgba => "RGBA",
            PixelFormat::Argb => "ARGB",
            PixelFormat::Bgra => "BGRA",
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::P => 1,
            PixelFormat::Rgb => 3,
            _ => 4,
        }
    }

    /// Format of a decoded image, or an error naming its color type.
    pub fn of_image(image: &DynamicImage) -> Result<Self, ConfigError> {
        match image.color() {
            ColorType::Rgb8 => Ok(PixelFormat::Rgb),
            ColorType::Rgba8 => Ok(PixelFormat::Rgba),
            other => Err(ConfigError::UnsupportedPixelFormat(format!("{other:?}"))),
        }
    }

    fn decode(self, px: &[u8]) -> [u8; 4] {
        match self {
            PixelFormat::P => [px[0], px[0], px[0], 0xff],
            PixelFormat::Rgb | PixelFormat::Rgbx => [px[0], px[1], px[2], 0xff],
            PixelFormat::Rgba => [px[0], px[1], px[2], px[3]],
            PixelFormat::Argb => [px[1], px[2], px[3], px[0]],
            PixelFormat::Bgra => [px[2], px[1], px[0], px[3]],
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| ConfigError::UnsupportedPixelFormat(s.to_string()))
    }
}

/// Converts a decoded image into surface pixels.
///
/// Fails with [`ConfigError::UnsupportedPixelFormat`] for anything other than
/// 8-bit RGB / RGBA.
pub fn to_surface_pixels(image: &DynamicImage) -> Result<RgbaImage, ConfigError> {
    PixelFormat::of_image(image)?;
    Ok(image.to_rgba8())
}

/// Converts a raw byte buffer in `format` into surface pixels.
pub fn convert(bytes: &[u8], size: Size, format: PixelFormat) -> anyhow::Result<RgbaImage> {
    anyhow::ensure!(size.width >= 0 && size.height >= 0, "negative image size {size:?}");
    let (w, h) = (size.width as u32, size.height as u32);
    let expected = w as usize * h as usize * format.bytes_per_pixel();
    anyhow::ensure!(
        bytes.len() == expected,
        "{format} buffer of {} bytes does not match {w}x{h} ({expected} bytes)",
        bytes.len()
    );

    let mut out = Vec::with_capacity(w as usize * h as usize * 4);
    for px in bytes.chunks_exact(format.bytes_per_pixel()) {
        out.extend_from_slice(&format.decode(px));
    }
    RgbaImage::from_raw(w, h, out).ok_or_else(|| anyhow::anyhow!("pixel buffer too small for {w}x{h}"))
}
