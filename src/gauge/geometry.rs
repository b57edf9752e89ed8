//! Gauge geometry kernel
//!
//! Pure conversions between values, percentages and angles, and the projection
//! of an angle onto a circle described by an [`ArcDescriptor`].
//!
//! Angles are in degrees, counter-clockwise from the 3 o'clock position, the
//! convention of the arc primitives in [`Canvas`](crate::gauge::Canvas).
//! Pixel coordinates grow to the right and downwards.

use crate::error::GeometryError;
use serde::Serialize;

/// Full circle in degrees
pub const FULL_CIRCLE: f32 = 360.0;

/// One hundred percent
pub const HUNDRED_PERCENT: f32 = 100.0;

/// Pixel coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// One concentric circle of the gauge
///
/// `x_offset`/`y_offset` locate the top-left corner of the circle's bounding
/// square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ArcDescriptor {
    radius: i32,
    x_offset: i32,
    y_offset: i32,
}

impl ArcDescriptor {
    /// Create a descriptor; a negative radius is treated as a collapsed circle.
    pub const fn new(radius: i32, x_offset: i32, y_offset: i32) -> Self {
        let radius = if radius < 0 { 0 } else { radius };
        Self {
            radius,
            x_offset,
            y_offset,
        }
    }

    #[inline]
    pub const fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub const fn diameter(&self) -> i32 {
        self.radius * 2
    }

    #[inline]
    pub const fn x_offset(&self) -> i32 {
        self.x_offset
    }

    #[inline]
    pub const fn y_offset(&self) -> i32 {
        self.y_offset
    }

    /// Top-left corner of the bounding square
    pub const fn top_left(&self) -> Point {
        Point::new(self.x_offset, self.y_offset)
    }

    /// Center of the circle
    pub const fn center(&self) -> Point {
        Point::new(self.x_offset + self.radius, self.y_offset + self.radius)
    }

    /// Same circle shrunk by `inset` pixels on every side
    pub const fn inset(&self, inset: i32) -> Self {
        Self::new(
            self.radius - inset,
            self.x_offset + inset,
            self.y_offset + inset,
        )
    }
}

/// Value at `percent` of the way from `min` to `max`
///
/// When `inverted` is set, interpolation runs from `max` to `min`.
pub fn value_from_percent(percent: f32, min: i32, max: i32, inverted: bool) -> f32 {
    let (from, to) = if inverted { (max, min) } else { (min, max) };
    let span = f64::from(to) - f64::from(from);
    (f64::from(percent) * span / f64::from(HUNDRED_PERCENT) + f64::from(from)) as f32
}

/// Whole value at `percent` of the way from `min` to `max`
///
/// Interpolates in `f64` so every `i32` bound stays exact, then rounds and
/// clamps into `i32`.
pub fn value_at_percent(percent: f64, min: i32, max: i32) -> i32 {
    let span = f64::from(max) - f64::from(min);
    let value = (percent * span / f64::from(HUNDRED_PERCENT) + f64::from(min)).round();
    value.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Percentage of `value` within `[min, max]`
///
/// # Errors
/// Returns `GeometryError::EmptyRange` when `min == max`.
pub fn percent_from_value(value: f32, min: i32, max: i32) -> Result<f32, GeometryError> {
    if max == min {
        return Err(GeometryError::EmptyRange(min));
    }
    let span = f64::from(max) - f64::from(min);
    let percent = (f64::from(value) - f64::from(min)) * f64::from(HUNDRED_PERCENT) / span;
    Ok(percent as f32)
}

/// Angle between `start_angle` and `end_angle` representing `value`
///
/// `min` maps exactly to `start_angle` and `max` exactly to `end_angle`.
///
/// # Errors
/// - `GeometryError::InvalidAngleOrder` if `start_angle < end_angle`
/// - `GeometryError::ValueOutOfRange` if `value` is outside `[min, max]`
pub fn angle_from_value(
    value: f32,
    min: f32,
    max: f32,
    start_angle: f32,
    end_angle: f32,
) -> Result<f32, GeometryError> {
    if start_angle < end_angle {
        return Err(GeometryError::InvalidAngleOrder {
            start: start_angle,
            end: end_angle,
        });
    }
    if !(min..=max).contains(&value) {
        return Err(GeometryError::ValueOutOfRange { value, min, max });
    }
    if value == max {
        return Ok(end_angle);
    }
    let percent = (value - min) / (max - min);
    Ok(start_angle - (start_angle - end_angle) * percent)
}

/// Pixel position of `angle` on the circle described by `arc`
pub fn point_on_circle(angle: f32, arc: &ArcDescriptor) -> Point {
    // Screen y grows downwards, so the counter-clockwise angle is mirrored.
    let fixed_angle = (FULL_CIRCLE - angle).to_radians();
    let radius = arc.radius() as f32;
    let x = radius * fixed_angle.cos() + radius + arc.x_offset() as f32;
    let y = radius * fixed_angle.sin() + radius + arc.y_offset() as f32;
    Point::new(x.round() as i32, y.round() as i32)
}
