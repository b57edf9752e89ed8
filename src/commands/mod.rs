//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod animate;
pub mod layout;
pub mod simulate;

pub use animate::run_animate;
pub use layout::run_layout;
pub use simulate::run_simulate;
