//! Hex color parsing and RGB distance.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in RGB space.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        dr.unsigned_abs().pow(2) + dg.unsigned_abs().pow(2) + db.unsigned_abs().pow(2)
    }

    /// Euclidean distance in RGB space, on the raw 0-255 scale.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        f64::from(self.distance_squared(other)).sqrt()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex_color(s)
    }
}

/// Parse `#RGB` or `#RRGGBB` (case-insensitive, `#` optional).
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] carrying the input when the string is not
/// three or six hex digits.
pub fn parse_hex_color(input: &str) -> Result<Color> {
    let normalized = input.trim().to_ascii_uppercase();
    let digits = normalized.strip_prefix('#').unwrap_or(&normalized);

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(input.to_string()));
    }

    let expanded = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    if expanded.len() != 6 {
        return Err(Error::InvalidColor(input.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map_err(|_| Error::InvalidColor(input.to_string()))
    };

    Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Parse a list of color arguments.
///
/// Each argument may carry several colors separated by commas or whitespace,
/// so both `["#FFF", "#000"]` and `["#FFF,#000"]` are accepted. Empty
/// fragments are ignored.
///
/// # Errors
///
/// Returns the first [`Error::InvalidColor`] encountered.
pub fn parse_color_list<S: AsRef<str>>(args: &[S]) -> Result<Vec<Color>> {
    args.iter()
        .flat_map(|arg| {
            arg.as_ref()
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(parse_hex_color)
                .collect::<Vec<_>>()
        })
        .collect()
}
