//! Box alignment
//!
//! Places a box of a given extent inside an available span, or around an
//! anchor coordinate. Used for both axes.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Alignment along one axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left or top
    Start,
    /// Centered
    #[default]
    Center,
    /// Right or bottom
    End,
}

impl Alignment {
    /// Leading coordinate of a box of `size` placed inside `[origin, origin + available)`
    pub fn place(self, size: i32, origin: i32, available: i32) -> i32 {
        match self {
            Alignment::Start => origin,
            Alignment::Center => origin + (available - size) / 2,
            Alignment::End => origin + available - size,
        }
    }

    /// Leading coordinate of a box of `size` aligned on `anchor`
    pub fn around(self, size: i32, anchor: i32) -> i32 {
        match self {
            Alignment::Start => anchor,
            Alignment::Center => anchor - size / 2,
            Alignment::End => anchor - size,
        }
    }
}

impl FromStr for Alignment {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "start" | "left" | "top" => Ok(Alignment::Start),
            "center" | "middle" => Ok(Alignment::Center),
            "end" | "right" | "bottom" => Ok(Alignment::End),
            _ => Err(DomainError::InvalidAlignment(s.to_string())),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Start => "start",
            Alignment::Center => "center",
            Alignment::End => "end",
        };
        f.write_str(name)
    }
}
