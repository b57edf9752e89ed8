//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from `path`, or from the default locations
    ///
    /// An explicitly requested file that fails to load is an error; missing
    /// default files are not.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_default(),
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: Option<bool>) -> Self {
        if let Some(v) = verbose {
            self.config.general.verbose = v;
        }
        self
    }

    /// Override the gauge scale bounds
    pub fn with_range(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        if let Some(min) = min {
            self.config.gauge.min = min;
        }
        if let Some(max) = max {
            self.config.gauge.max = max;
        }
        self
    }

    /// Override the inverted flag
    pub fn with_inverted(mut self, inverted: Option<bool>) -> Self {
        if let Some(i) = inverted {
            self.config.gauge.inverted = i;
        }
        self
    }

    /// Override the animation duration
    pub fn with_animation_ms(mut self, ms: Option<u64>) -> Self {
        if let Some(ms) = ms {
            self.config.gauge.animation_ms = ms;
        }
        self
    }

    /// Override the simulated source refresh interval
    pub fn with_source_interval_ms(mut self, ms: Option<u64>) -> Self {
        if let Some(ms) = ms {
            self.config.source.interval_ms = ms;
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
