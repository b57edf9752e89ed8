//! Color domain type
//!
//! 24-bit RGB colors as used by display stylesheets (`0xRRGGBB`).

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x000000);
    pub const WHITE: Rgb = Rgb(0xFFFFFF);

    /// Create a color from a `0xRRGGBB` value (upper byte ignored)
    pub const fn new(rgb: u32) -> Self {
        Self(rgb & 0x00FF_FFFF)
    }

    /// Raw `0xRRGGBB` value
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(&self) -> u8 {
        self.0 as u8
    }
}

impl FromStr for Rgb {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return Err(DomainError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Rgb::new)
            .map_err(|_| DomainError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Rgb {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}
