//! Custom widgets

pub mod gauge_canvas;

pub use gauge_canvas::{GaugeCanvas, SvgIconLoader};
