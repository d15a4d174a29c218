use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;

/// `<digits> <unit>`, unit one of b, kb/kib … yb/yib, any case.
static SIZE_EXPR: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"(?i)^(\d+)\s*([kmgtpezy]i?)?b$") {
        Ok(regex) => regex,
        Err(err) => panic!("size expression regex is invalid: {err}"),
    });

const PREFIXES: &str = "kmgtpezy";

fn multiplier(unit: &str) -> Option<u64> {
    let mut chars = unit.chars();
    let Some(prefix) = chars.next() else {
        return Some(1);
    };
    let power = PREFIXES.find(prefix.to_ascii_lowercase())? as u32 + 1;
    let base: u64 = if chars.next().is_some() { 1024 } else { 1000 };
    base.checked_pow(power)
}

/// Parses a size expression into bytes.
///
/// `KB` scales by 1000, `KiB` by 1024, and so on up to `YB` / `YiB`. Units
/// too large for 64 bits (and anything not matching the grammar) are a
/// [`ConfigError::InvalidSizeExpression`].
pub fn parse_size(expr: &str) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::InvalidSizeExpression(expr.to_string());

    let caps = SIZE_EXPR.captures(expr.trim()).ok_or_else(invalid)?;
    let value: u64 = caps[1].parse().map_err(|_| invalid())?;
    let unit = caps.get(2).map_or("", |m| m.as_str());
    multiplier(unit)
        .and_then(|m| value.checked_mul(m))
        .ok_or_else(invalid)
}

/// A byte count given either raw (`"1048576"`) or as a size expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteSize(pub u64);

impl ByteSize {
    #[inline]
    pub fn bytes(self) -> u64 {
        self.0
    }
}

impl FromStr for ByteSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return trimmed
                .parse()
                .map(ByteSize)
                .map_err(|_| ConfigError::InvalidSizeExpression(s.to_string()));
        }
        parse_size(s).map(ByteSize)
    }
}

impl From<u64> for ByteSize {
    fn from(bytes: u64) -> Self {
        ByteSize(bytes)
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_size ────────────────────────────────────────────────────────

    #[test]
    fn decimal_megabytes() {
        assert_eq!(parse_size("64MB").unwrap(), 64_000_000);
    }

    #[test]
    fn binary_mebibytes() {
        assert_eq!(parse_size("64MiB").unwrap(), 67_108_864);
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert_eq!(parse_size("2 kib").unwrap(), 2048);
        assert_eq!(parse_size("3Kb").unwrap(), 3000);
        assert_eq!(parse_size("5GIB").unwrap(), 5 * (1 << 30));
    }

    #[test]
    fn plain_bytes() {
        assert_eq!(parse_size("512b").unwrap(), 512);
    }

    #[test]
    fn large_units_within_range() {
        assert_eq!(parse_size("1EB").unwrap(), 1_000_000_000_000_000_000);
        assert_eq!(parse_size("1EiB").unwrap(), 1 << 60);
    }

    #[test]
    fn overflowing_units_are_rejected() {
        assert!(parse_size("1ZB").is_err());
        assert!(parse_size("20EiB").is_err());
    }

    #[test]
    fn bogus_is_rejected_with_expression_in_message() {
        let err = parse_size("bogus").unwrap_err();
        assert_eq!(err, ConfigError::InvalidSizeExpression("bogus".into()));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn missing_unit_or_trailing_junk_is_rejected() {
        assert!(parse_size("64").is_err());
        assert!(parse_size("64MBs").is_err());
        assert!(parse_size("MB").is_err());
        assert!(parse_size("1.5MB").is_err());
    }

    // ── ByteSize ──────────────────────────────────────────────────────────

    #[test]
    fn byte_size_accepts_raw_integers() {
        assert_eq!("1048576".parse::<ByteSize>().unwrap(), ByteSize(1_048_576));
    }

    #[test]
    fn byte_size_accepts_expressions() {
        assert_eq!("1MiB".parse::<ByteSize>().unwrap(), ByteSize(1_048_576));
    }

    #[test]
    fn byte_size_rejects_empty() {
        assert!("".parse::<ByteSize>().is_err());
    }
}
