//! Unified error types for wattgauge
//!
//! This module defines all error types used throughout the library.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Geometry contract violation
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Value source could not be read
    #[error("Value source error: {0}")]
    Source(#[from] SourceError),

    /// Drawing primitive failed
    #[error("Canvas error: {0}")]
    Canvas(#[from] CanvasError),

    /// Frame could not be painted
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// IO error (file operations, terminal output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Contract violations of the geometry kernel
///
/// These indicate a layout or data bug in the caller and are never clamped
/// away by the kernel itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The start angle must be greater than or equal to the end angle
    #[error("Start angle {start} is smaller than end angle {end}")]
    InvalidAngleOrder { start: f32, end: f32 },

    /// Value lies outside the declared bounds
    #[error("Value out of bounds. Value: {value} min: {min} max: {max}")]
    ValueOutOfRange { value: f32, min: f32, max: f32 },

    /// min == max, percent conversion would divide by zero
    #[error("Empty value range: min and max are both {0}")]
    EmptyRange(i32),
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Range with max not strictly greater than min
    #[error("Invalid range: max ({max}) must be greater than min ({min})")]
    InvalidRange { min: i32, max: i32 },

    /// Color string that is not `#rrggbb`
    #[error("Invalid color: {0} (expected #rrggbb)")]
    InvalidColor(String),

    /// Unknown alignment keyword
    #[error("Invalid alignment: {0} (expected start, center or end)")]
    InvalidAlignment(String),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors from the external value source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The source is not reachable right now
    #[error("Value source unavailable: {0}")]
    Unavailable(String),

    /// The source was stopped and produces no more readings
    #[error("Value source stopped")]
    Stopped,
}

/// Errors raised by a drawing surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// A drawing primitive failed
    #[error("Drawing primitive '{primitive}' failed: {message}")]
    Primitive {
        primitive: &'static str,
        message: String,
    },

    /// An image resource could not be acquired
    #[error("Asset '{0}' could not be loaded")]
    Asset(String),
}

/// Failure while painting one frame
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Drawing surface failed
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    /// Geometry contract violated while laying out the frame
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl CanvasError {
    /// Shorthand for a failed primitive
    pub fn primitive(primitive: &'static str, message: impl Into<String>) -> Self {
        Self::Primitive {
            primitive,
            message: message.into(),
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::ValueOutOfRange {
            value: 12.0,
            min: 0.0,
            max: 10.0,
        };
        assert_eq!(err.to_string(), "Value out of bounds. Value: 12 min: 0 max: 10");
    }

    #[test]
    fn test_invalid_range_display() {
        let err = DomainError::InvalidRange { min: 10, max: 10 };
        assert!(err.to_string().contains("max (10)"));
    }

    #[test]
    fn test_canvas_error_shorthand() {
        let err = CanvasError::primitive("arc", "out of memory");
        assert_eq!(
            err.to_string(),
            "Drawing primitive 'arc' failed: out of memory"
        );
    }

    #[test]
    fn test_error_conversion() {
        let geometry_err = GeometryError::EmptyRange(5);
        let app_err: AppError = geometry_err.into();
        assert!(matches!(app_err, AppError::Geometry(_)));

        let source_err = SourceError::Stopped;
        let app_err: AppError = source_err.into();
        assert!(matches!(app_err, AppError::Source(_)));
    }
}
