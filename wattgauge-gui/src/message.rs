//! Application messages

use std::time::Instant;

/// Messages handled by the gauge window
#[derive(Debug, Clone)]
pub enum Message {
    /// Frame timer fired
    Frame(Instant),

    /// Hide or show the gauge
    ToggleVisible,
}
