//! Gauge value range
//!
//! Provides the validated `[min, max]` interval the gauge scale is drawn for.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive value range of a gauge
///
/// Validated on construction: `max` is always strictly greater than `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct GaugeRange {
    min: i32,
    max: i32,
}

impl GaugeRange {
    /// Create a new range with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidRange` if `max <= min`
    pub fn new(min: i32, max: i32) -> Result<Self, DomainError> {
        if max <= min {
            return Err(DomainError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound
    #[inline]
    pub const fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound
    #[inline]
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Check whether a value lies inside the range (bounds included)
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp a value into the range
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// The bound whose decimal rendering is the longest
    ///
    /// Used to size the value label and tick labels for the widest string the
    /// gauge can show.
    pub fn widest_label(&self) -> String {
        let min = self.min.to_string();
        let max = self.max.to_string();
        if min.len() > max.len() {
            min
        } else {
            max
        }
    }
}

impl Default for GaugeRange {
    /// `0..=100`
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

impl fmt::Display for GaugeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

#[derive(Serialize, Deserialize)]
struct RawRange {
    min: i32,
    max: i32,
}

impl TryFrom<RawRange> for GaugeRange {
    type Error = DomainError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl From<GaugeRange> for RawRange {
    fn from(range: GaugeRange) -> Self {
        Self {
            min: range.min,
            max: range.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_validation() {
        assert!(GaugeRange::new(0, 1111).is_ok());
        assert_eq!(
            GaugeRange::new(5, 5),
            Err(DomainError::InvalidRange { min: 5, max: 5 })
        );
        assert!(GaugeRange::new(10, -10).is_err());
    }

    #[test]
    fn test_range_contains_and_clamp() {
        let range = GaugeRange::new(-50, 50).unwrap();
        assert!(range.contains(-50));
        assert!(range.contains(50));
        assert!(!range.contains(51));
        assert_eq!(range.clamp(80), 50);
        assert_eq!(range.clamp(-80), -50);
    }

    #[test]
    fn test_widest_label() {
        assert_eq!(GaugeRange::new(0, 2000).unwrap().widest_label(), "2000");
        assert_eq!(GaugeRange::new(-1000, 50).unwrap().widest_label(), "-1000");
    }

    #[test]
    fn test_range_deserialize_rejects_inverted() {
        let ok: GaugeRange = serde_json::from_str(r#"{"min":0,"max":10}"#).unwrap();
        assert_eq!(ok.max(), 10);
        let bad: Result<GaugeRange, _> = serde_json::from_str(r#"{"min":10,"max":0}"#);
        assert!(bad.is_err());
    }
}
