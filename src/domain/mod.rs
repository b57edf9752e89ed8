//! Domain models for wattgauge
//!
//! This module contains the small validated value types shared by the gauge
//! core, the configuration layer and the hosts.
//! Types are validated on construction (fail-fast pattern).

pub mod alignment;
pub mod color;
pub mod range;

pub use alignment::Alignment;
pub use color::Rgb;
pub use range::GaugeRange;
