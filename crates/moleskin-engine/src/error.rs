use std::fmt;

/// A configuration problem detected while building a tree or its resources.
///
/// These are fail-fast: they surface at construction time and are never
/// retried or recovered internally. Every variant carries the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Hex color string is not `RRGGBB` / `RRGGBBAA` (optionally `#`-prefixed).
    InvalidHexColor(String),
    /// Pixel format outside `{P, RGB, RGBX, RGBA, ARGB, BGRA}`.
    UnsupportedPixelFormat(String),
    /// Cache capacity expression does not match `<int> <unit>`.
    InvalidSizeExpression(String),
    /// Font family was never registered with the [`FontSystem`](crate::text::FontSystem).
    UnknownFontFamily(String),
    /// Font bytes could not be parsed.
    FontLoad(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHexColor(s) => write!(f, "invalid hexcode '{s}'"),
            ConfigError::UnsupportedPixelFormat(s) => write!(f, "unsupported image format {s}"),
            ConfigError::InvalidSizeExpression(s) => write!(f, "illegal size expression '{s}'"),
            ConfigError::UnknownFontFamily(s) => write!(f, "unknown font family '{s}'"),
            ConfigError::FontLoad(s) => write!(f, "font load error: {s}"),
        }
    }
}

impl std::error::Error for ConfigError {}
