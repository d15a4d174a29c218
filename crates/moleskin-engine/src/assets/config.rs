use std::env;

use crate::error::ConfigError;

use super::cache::ImageCache;
use super::size::ByteSize;

/// Environment variable consulted by [`AssetConfig::from_default_env`].
pub const DEFAULT_CAPACITY_VAR: &str = "MOLESKIN_IMAGE_CACHE_SIZE";

/// Asset cache configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    pub capacity: ByteSize,
}

impl AssetConfig {
    pub fn new(capacity: impl Into<ByteSize>) -> Self {
        Self { capacity: capacity.into() }
    }

    /// Reads the capacity from environment variable `var`.
    ///
    /// An unset variable yields `Ok(None)`; choosing a fallback is up to the
    /// caller.
    pub fn from_env(var: &str) -> Result<Option<Self>, ConfigError> {
        match env::var_os(var) {
            None => Ok(None),
            Some(value) => Self::from_value(&value.to_string_lossy()).map(Some),
        }
    }

    pub fn from_default_env() -> Result<Option<Self>, ConfigError> {
        Self::from_env(DEFAULT_CAPACITY_VAR)
    }

    /// Parses a raw byte count or a size expression.
    pub fn from_value(value: &str) -> Result<Self, ConfigError> {
        value.parse().map(|capacity| Self { capacity })
    }

    /// An empty image cache with this capacity.
    pub fn image_cache(&self) -> ImageCache {
        ImageCache::images(self.capacity.bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_is_none() {
        let config = AssetConfig::from_env("MOLESKIN_TEST_SURELY_UNSET_VARIABLE").unwrap();
        assert_eq!(config, None);
    }

    #[test]
    fn value_accepts_expression_and_raw_count() {
        assert_eq!(AssetConfig::from_value("64MiB").unwrap().capacity, ByteSize(67_108_864));
        assert_eq!(AssetConfig::from_value("4096").unwrap().capacity, ByteSize(4096));
    }

    #[test]
    fn malformed_value_is_a_config_error() {
        assert_eq!(
            AssetConfig::from_value("lots").unwrap_err(),
            ConfigError::InvalidSizeExpression("lots".into())
        );
    }

    #[test]
    fn image_cache_uses_configured_capacity() {
        let cache = AssetConfig::new(2048).image_cache();
        assert_eq!(cache.capacity(), 2048);
        assert_eq!(cache.available(), 2048);
    }
}
