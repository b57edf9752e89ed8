//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::domain::{Alignment, GaugeRange, Rgb};
use crate::error::{ConfigError, DomainError};
use crate::gauge::{Easing, GaugeSettings, GaugeStyle, MonospaceMetrics};
use crate::source::SimulationSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Gauge scale and behaviour
    pub gauge: GaugeConfig,
    /// Colors and fonts
    pub style: StyleConfig,
    /// Simulated power source
    pub source: SourceConfig,
}

/// General configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Redraw interval of graphical hosts in milliseconds
    pub frame_interval_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            frame_interval_ms: 16,
        }
    }
}

/// Gauge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    /// Lower bound of the scale
    pub min: i32,
    /// Upper bound of the scale
    pub max: i32,
    /// Unit label
    pub unit: String,
    /// Unit icon image
    pub icon: Option<String>,
    /// Progress grows from the end of the scale
    pub inverted: bool,
    /// Duration of a value transition in milliseconds
    pub animation_ms: u64,
    pub easing: Easing,
    /// Padding around the gauge in pixels
    pub padding: i32,
    pub horizontal: Alignment,
    pub vertical: Alignment,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            min: 0,
            max: 1111,
            unit: "Watt".to_string(),
            icon: Some("images/watt_icon.svg".to_string()),
            inverted: false,
            animation_ms: 1000,
            easing: Easing::QuadInOut,
            padding: 5,
            horizontal: Alignment::Center,
            vertical: Alignment::Center,
        }
    }
}

impl GaugeConfig {
    /// Convert to widget settings
    pub fn to_settings(&self) -> Result<GaugeSettings, DomainError> {
        Ok(GaugeSettings {
            range: GaugeRange::new(self.min, self.max)?,
            unit: self.unit.clone(),
            icon_path: self.icon.clone().filter(|p| !p.is_empty()),
            inverted: self.inverted,
            animation_duration: Duration::from_millis(self.animation_ms),
            easing: self.easing,
            padding: self.padding,
            horizontal: self.horizontal,
            vertical: self.vertical,
        })
    }
}

/// Colors and font metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub background: Rgb,
    pub value: Rgb,
    pub progress: Rgb,
    pub progress_background: Rgb,
    pub unit_label: Rgb,
    pub unit_icon: Rgb,
    pub arc_labels: Rgb,
    pub fonts: MonospaceMetrics,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let secondary = Rgb::new(0xBFBFBF);
        let progress = Rgb::new(0xF04F25);
        Self {
            background: Rgb::new(0x1D1D1D),
            value: Rgb::WHITE,
            progress,
            progress_background: Rgb::new(0x4E4E4E),
            unit_label: secondary,
            unit_icon: progress,
            arc_labels: secondary,
            fonts: MonospaceMetrics::default(),
        }
    }
}

impl StyleConfig {
    /// Convert to the gauge color set
    pub fn to_style(&self) -> GaugeStyle {
        GaugeStyle {
            background: self.background,
            value: self.value,
            progress: self.progress,
            progress_background: self.progress_background,
            unit_label: self.unit_label,
            unit_icon: self.unit_icon,
            arc_labels: self.arc_labels,
        }
    }
}

/// Simulated source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Smallest generated reading
    pub min: i32,
    /// Largest generated reading
    pub max: i32,
    /// Time between readings in milliseconds
    pub interval_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            min: 0,
            max: 2000,
            interval_ms: 4000,
        }
    }
}

impl SourceConfig {
    /// Convert to simulation settings
    pub fn to_settings(&self) -> Result<SimulationSettings, DomainError> {
        Ok(SimulationSettings {
            range: GaugeRange::new(self.min, self.max)?,
            interval: Duration::from_millis(self.interval_ms),
        })
    }
}

impl Config {
    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, e: DomainError| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        };

        self.gauge.to_settings().map_err(|e| invalid("gauge", e))?;
        self.source.to_settings().map_err(|e| invalid("source", e))?;

        if self.gauge.padding < 0 {
            return Err(ConfigError::InvalidValue {
                key: "gauge.padding".to_string(),
                message: format!("must not be negative, got {}", self.gauge.padding),
            });
        }
        if self.source.interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "source.interval_ms".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.general.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "general.frame_interval_ms".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
