//! Drawing surface abstraction
//!
//! The gauge never talks to a display directly. Hosts implement [`Canvas`]
//! over whatever they draw on (a framebuffer, an iced `Frame`, a recorder in
//! tests) and [`TextMeasure`] over their font metrics.

use crate::domain::{Alignment, Rgb};
use crate::error::CanvasError;
use crate::gauge::geometry::{ArcDescriptor, Point, Rect};
use serde::{Deserialize, Serialize};

/// Which of the gauge's three fonts a text uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// Large numeric readout in the center
    Value,
    /// Unit label below the readout
    Unit,
    /// Tick labels along the inner arc
    ArcLabel,
}

/// Text measurement provided by the host's font system
pub trait TextMeasure {
    /// Advance width of `text` in pixels
    fn text_width(&self, font: FontRole, text: &str) -> i32;

    /// Line height in pixels
    fn font_height(&self, font: FontRole) -> i32;

    /// Distance from the top of the line to the baseline
    fn baseline(&self, font: FontRole) -> i32;
}

/// Metrics of one monospaced (or approximated) font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontMetrics {
    /// Nominal size in pixels
    pub size: i32,
    /// Line height in pixels
    pub height: i32,
    /// Baseline position from the top of the line
    pub baseline: i32,
    /// Advance of one glyph
    pub advance: i32,
}

impl FontMetrics {
    pub const fn new(size: i32, height: i32, baseline: i32, advance: i32) -> Self {
        Self {
            size,
            height,
            baseline,
            advance,
        }
    }

    /// Source Sans Pro 12px regular, as used for unit and tick labels
    pub const fn small() -> Self {
        Self::new(12, 19, 13, 6)
    }

    /// Source Sans Pro 82px bold, as used for the readout
    pub const fn large() -> Self {
        Self::new(82, 82, 66, 42)
    }
}

/// Fixed-advance [`TextMeasure`] for hosts without real glyph metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonospaceMetrics {
    pub value: FontMetrics,
    pub unit: FontMetrics,
    pub arc_label: FontMetrics,
}

impl MonospaceMetrics {
    /// Metrics for a role
    pub fn metrics(&self, font: FontRole) -> &FontMetrics {
        match font {
            FontRole::Value => &self.value,
            FontRole::Unit => &self.unit,
            FontRole::ArcLabel => &self.arc_label,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            value: FontMetrics::large(),
            unit: FontMetrics::small(),
            arc_label: FontMetrics::small(),
        }
    }
}

impl TextMeasure for MonospaceMetrics {
    fn text_width(&self, font: FontRole, text: &str) -> i32 {
        self.metrics(font).advance * text.chars().count() as i32
    }

    fn font_height(&self, font: FontRole) -> i32 {
        self.metrics(font).height
    }

    fn baseline(&self, font: FontRole) -> i32 {
        self.metrics(font).baseline
    }
}

/// Cap style of stroked arcs and lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cap {
    #[default]
    Rounded,
    Flat,
}

/// Stroke parameters of an arc or line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stroke {
    /// Solid thickness in pixels
    pub thickness: i32,
    /// Anti-aliasing fade on each side, in pixels
    pub fade: i32,
    pub cap: Cap,
}

impl Stroke {
    pub const fn new(thickness: i32, fade: i32) -> Self {
        Self {
            thickness,
            fade,
            cap: Cap::Rounded,
        }
    }
}

/// Anchor of a text relative to a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextAnchor {
    pub point: Point,
    pub horizontal: Alignment,
    pub vertical: Alignment,
}

impl TextAnchor {
    /// Text centered on `point` in both axes
    pub const fn centered(point: Point) -> Self {
        Self {
            point,
            horizontal: Alignment::Center,
            vertical: Alignment::Center,
        }
    }

    /// Text horizontally centered with its bottom on `point`
    pub const fn bottom_center(point: Point) -> Self {
        Self {
            point,
            horizontal: Alignment::Center,
            vertical: Alignment::End,
        }
    }
}

/// Handle to a loaded unit icon
///
/// Dropping the handle releases the underlying resource.
#[derive(Debug, PartialEq, Eq)]
pub struct Icon {
    path: String,
    width: i32,
    height: i32,
}

impl Icon {
    pub fn new(path: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl Drop for Icon {
    fn drop(&mut self) {
        log::trace!("Released icon {}", self.path);
    }
}

/// Loads unit icons on behalf of the widget
pub trait IconLoader {
    /// Acquire the icon at `path`
    fn load(&self, path: &str) -> Result<Icon, CanvasError>;
}

/// Loader for hosts that cannot show images
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIcons;

impl IconLoader for NoIcons {
    fn load(&self, path: &str) -> Result<Icon, CanvasError> {
        Err(CanvasError::Asset(path.to_string()))
    }
}

/// Drawing surface
///
/// Every primitive may fail; the gauge catches failures per frame.
pub trait Canvas: TextMeasure {
    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<(), CanvasError>;

    /// Stroke an arc of the circle `arc`, from `start_angle` through the
    /// signed `sweep` (degrees, counter-clockwise positive)
    fn draw_arc(
        &mut self,
        arc: &ArcDescriptor,
        start_angle: f32,
        sweep: f32,
        stroke: Stroke,
        color: Rgb,
    ) -> Result<(), CanvasError>;

    /// Stroke a straight line
    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        stroke: Stroke,
        color: Rgb,
    ) -> Result<(), CanvasError>;

    /// Draw a single line of text
    fn draw_text(
        &mut self,
        text: &str,
        font: FontRole,
        anchor: TextAnchor,
        color: Rgb,
    ) -> Result<(), CanvasError>;

    /// Draw an icon with its top-left corner at `top_left`, tinted with `color`
    fn draw_icon(&mut self, icon: &Icon, top_left: Point, color: Rgb) -> Result<(), CanvasError>;
}
