//! Startup errors of the desktop gauge

use thiserror::Error;
use wattgauge::error::{ConfigError, DomainError, SourceError};

/// Failure to bring the window up
#[derive(Error, Debug)]
pub enum GuiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid gauge settings: {0}")]
    Domain(#[from] DomainError),

    #[error("Power source error: {0}")]
    Source(#[from] SourceError),
}
