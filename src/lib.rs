//! wattgauge - animated radial power gauge
//!
//! This library provides the geometry, layout caching, animation and drawing
//! passes of a radial gauge, independent of any windowing toolkit. Hosts
//! supply a [`gauge::Canvas`] and a clock; values come from a
//! [`source::ValueSource`] through a [`controller::GaugeController`].
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`controller`]: Source to widget marshalling
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`gauge`]: Gauge geometry, layout, animation and rendering
//! - [`source`]: Value sources

pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod gauge;
pub mod source;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};
