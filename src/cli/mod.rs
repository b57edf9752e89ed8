//! Command-line surface
//!
//! Argument definitions and the table/JSON printers shared by the commands.

pub mod args;
pub mod output;

pub use args::{Cli, Commands, OutputFormat};
