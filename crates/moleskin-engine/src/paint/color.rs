use std::str::FromStr;

use crate::error::ConfigError;

/// Straight-alpha RGBA color, one byte per channel.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xff)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::rgb(0xff, 0xff, 0xff)
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Parses `RRGGBB` or `RRGGBBAA`, with or without `#`.
    ///
    /// Six digits yield an opaque color. Any other digit count, or a non-hex
    /// digit, is a [`ConfigError::InvalidHexColor`] naming the input.
    pub fn from_hex(hexcode: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidHexColor(hexcode.to_string());

        let digits = hexcode.replace('#', "");
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |n: usize| u8::from_str_radix(&digits[2 * n..2 * (n + 1)], 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(1)?, channel(2)?)),
            8 => Ok(Self::rgba(channel(0)?, channel(1)?, channel(2)?, channel(3)?)),
            _ => Err(invalid()),
        }
    }

    /// Source-over blend of `self` onto `dst`, with `coverage` scaling the
    /// source alpha (255 = fully covered).
    #[inline]
    pub fn blend_over(self, dst: Color, coverage: u8) -> Color {
        let sa = self.a as u32 * coverage as u32 / 255;
        if sa == 0 {
            return dst;
        }
        if sa == 255 {
            return self;
        }
        let da = dst.a as u32 * (255 - sa) / 255;
        let out_a = sa + da;
        let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da) / out_a) as u8;
        Color::rgba(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b), out_a as u8)
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Color> for image::Rgba<u8> {
    #[inline]
    fn from(c: Color) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<image::Rgba<u8>> for Color {
    #[inline]
    fn from(p: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = p.0;
        Color::rgba(r, g, b, a)
    }
}
