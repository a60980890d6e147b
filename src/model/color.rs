//! Branch colors.
//!
//! Only what drawing needs: an RGB triple that can be read from and
//! written as a `#rrggbb` hex string.

use crate::error::DrawError;
use std::fmt;
use std::str::FromStr;

/// RGB color of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchColor {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl BranchColor {
    /// Creates a color from its channels.
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        BranchColor { red, green, blue }
    }

    /// Parses `#rrggbb` or `rrggbb` (case-insensitive).
    ///
    /// # Examples
    /// ```
    /// use phylodraw::model::BranchColor;
    ///
    /// let red = BranchColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(red, BranchColor::from_rgb(255, 0, 0));
    /// assert_eq!(red.to_hex(), "#ff0000");
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, DrawError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DrawError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| DrawError::InvalidColor(hex.to_string()))
        };
        Ok(BranchColor {
            red: channel(0..2)?,
            green: channel(2..4)?,
            blue: channel(4..6)?,
        })
    }

    /// Returns the lowercase `#rrggbb` representation.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl FromStr for BranchColor {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BranchColor::from_hex(s)
    }
}

impl fmt::Display for BranchColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_without_hash() {
        let color = BranchColor::from_hex("00a0ff").unwrap();
        assert_eq!(color, BranchColor::from_rgb(0, 160, 255));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(BranchColor::from_hex("#12345").is_err());
        assert!(BranchColor::from_hex("#gg0000").is_err());
        assert!("blue".parse::<BranchColor>().is_err());
    }
}
