//! Radial gauge core
//!
//! - [`geometry`]: value/percent/angle conversions and arc descriptors
//! - [`layout`]: the cached geometry of one gauge size and range
//! - [`animation`]: eased value transitions
//! - [`canvas`]: the drawing surface hosts implement
//! - [`render`]: static and dynamic paint passes
//! - [`widget`]: the stateful widget tying them together

pub mod animation;
pub mod canvas;
pub mod geometry;
pub mod layout;
pub mod render;
pub mod widget;

pub use animation::{AnimationDriver, AnimationFrame, Easing};
pub use canvas::{
    Canvas, FontMetrics, FontRole, Icon, IconLoader, MonospaceMetrics, NoIcons, TextMeasure,
};
pub use geometry::{ArcDescriptor, Point, Rect, Size};
pub use layout::{LayoutCache, LayoutState};
pub use render::GaugeStyle;
pub use widget::{FrameOutcome, GaugeSettings, GaugeWidget};
