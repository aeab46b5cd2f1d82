//! Color parsing for room and tint color strings
//!
//! Supports hex colors: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.

use image::Rgba;
use thiserror::Error;

/// Fill color used when a room has no background color set
pub const FALLBACK_BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse a hex color string into an RGBA color.
///
/// Short forms double each digit, so `#F00` is red. Alpha defaults to opaque.
///
/// # Errors
///
/// Returns `ColorError` if the input is not a well-formed hex color.
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    let digits: Vec<u8> = hex
        .chars()
        .filter_map(|c| c.to_digit(16))
        .filter_map(|d| u8::try_from(d).ok())
        .collect();

    match digits.as_slice() {
        [r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, 255])),
        [r, g, b, a] => Ok(Rgba([r * 17, g * 17, b * 17, a * 17])),
        [r1, r2, g1, g2, b1, b2] => Ok(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, 255])),
        [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Rgba([
            r1 * 16 + r2,
            g1 * 16 + g2,
            b1 * 16 + b2,
            a1 * 16 + a2,
        ])),
        other => Err(ColorError::InvalidLength(other.len())),
    }
}

/// Pack a color into `0xRRGGBB`, dropping alpha
pub fn to_hex(color: Rgba<u8>) -> u32 {
    let [r, g, b, _] = color.0;
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(parse_color("#112233"), Ok(Rgba([0x11, 0x22, 0x33, 255])));
        assert_eq!(parse_color("#11223380"), Ok(Rgba([0x11, 0x22, 0x33, 0x80])));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_color("#F00"), Ok(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_color("#0f08"), Ok(Rgba([0, 255, 0, 0x88])));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("112233"), Err(ColorError::MissingHash));
        assert_eq!(parse_color("#12345"), Err(ColorError::InvalidLength(5)));
        assert_eq!(parse_color("#12x"), Err(ColorError::InvalidHex('x')));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(Rgba([0x11, 0x22, 0x33, 0])), 0x0011_2233);
        assert_eq!(to_hex(FALLBACK_BACKGROUND), 0);
    }
}
