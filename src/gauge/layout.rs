//! Gauge layout cache
//!
//! Derives every circle, tick and label anchor of a gauge from its content box
//! and value range. The result is computed once and reused by every redraw
//! until the content size or the range changes.
//!
//! All rings are derived inward from the outer radius. Thick faded strokes are
//! positioned on the center of the line, so each offset accounts for half the
//! thickness plus the fade:
//!
//! ```text
//! FADE | THICKNESS / 2 | ring position | THICKNESS / 2 | FADE
//! ```

use crate::domain::{Alignment, GaugeRange};
use crate::gauge::canvas::{FontRole, TextMeasure};
use crate::gauge::geometry::{
    point_on_circle, value_at_percent, value_from_percent, ArcDescriptor, Point, Rect, Size,
};
use serde::Serialize;

/// Angle of the minimum end of the scale
pub const START_ANGLE: i32 = 220;
/// Angle of the maximum end of the scale
pub const END_ANGLE: i32 = -40;
/// Signed sweep of the full scale
pub const ARC_SWEEP: i32 = END_ANGLE - START_ANGLE;

/// The gauge is open at the bottom, so its center sits below the geometric
/// center: the content height is divided by this instead of 2.
pub const OFFSET_CENTER_DIVIDER: f32 = 1.72;

/// Anti-aliasing fade of arcs
pub const FADE: i32 = 1;
/// Anti-aliasing fade of short ticks
pub const FADE_SHORT_LINE: i32 = 1;
/// Anti-aliasing fade of long ticks
pub const FADE_LONG_LINE: i32 = 1;

pub const OUTER_ARC_THICKNESS: i32 = 4;
pub const INNER_ARC_THICKNESS: i32 = 2;
pub const LINE_THICKNESS: i32 = 1;

/// Gap between the inside of the outer arc and the outside of the inner arc
pub const INNER_OUTER_ARC_DISTANCE: i32 = 10;
pub const BIG_LINE_EVERY_X_PERCENT: u32 = 10;
pub const SMALL_LINE_EVERY_X_PERCENT: u32 = 2;
pub const LINE_SHORT_LENGTH: i32 = 6;
pub const LINE_LONG_LENGTH: i32 = 12;
/// Distance between the end of a long tick and the center of its label
pub const LINE_LABEL_DISTANCE: i32 = 18;

/// Trims the erased readout box at the top (fonts carry empty space there)
pub const MAIN_LABEL_BG_TOP_OFFSET: i32 = 10;
/// Trims the erased readout box at the bottom
pub const MAIN_LABEL_BG_BOTTOM_OFFSET: i32 = 10;

/// Unit label sits `outer radius / this` below the center
pub const UNIT_TEXT_OFFSET_DIVIDER: f32 = 5.0;
/// Unit icon sits `outer radius / this` below the center
pub const UNIT_ICON_OFFSET_DIVIDER: f32 = 2.5;

pub const OUTER_ARC_OFFSET: i32 = OUTER_ARC_THICKNESS / 2 + FADE;
pub const INNER_OUTER_ARC_OFFSET: i32 = INNER_OUTER_ARC_DISTANCE + OUTER_ARC_OFFSET + FADE * 2;
pub const INNER_ARC_OFFSET: i32 = INNER_ARC_THICKNESS / 2 + FADE + INNER_OUTER_ARC_OFFSET;
pub const LINE_SHORT_ARC_OFFSET: i32 = LINE_SHORT_LENGTH + INNER_ARC_OFFSET + FADE * 2;
pub const LINE_LONG_ARC_OFFSET: i32 = LINE_LONG_LENGTH + INNER_ARC_OFFSET + FADE * 2;
pub const LINE_LABEL_ARC_OFFSET: i32 = LINE_LONG_ARC_OFFSET + LINE_LABEL_DISTANCE;

/// Inputs of one layout pass
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    /// Content box (padding already removed)
    pub content: Rect,
    pub horizontal: Alignment,
    pub vertical: Alignment,
    pub range: GaugeRange,
    pub inverted: bool,
}

/// Label of a long tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickLabel {
    pub text: String,
    /// Center of the label
    pub anchor: Point,
}

/// One tick line between the inner arc and the short/long tick ring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub percent: u32,
    pub angle: f32,
    pub from: Point,
    pub to: Point,
    pub label: Option<TickLabel>,
}

impl Tick {
    pub fn is_long(&self) -> bool {
        self.label.is_some()
    }
}

/// Geometry of one full paint of the gauge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutCache {
    /// Build counter of the owning widget; identifies reuse across renders
    pub generation: u64,
    pub center: Point,
    pub outer: ArcDescriptor,
    pub inner: ArcDescriptor,
    pub line_start: ArcDescriptor,
    pub line_short: ArcDescriptor,
    pub line_long: ArcDescriptor,
    pub line_label: ArcDescriptor,
    pub ticks: Vec<Tick>,
    /// Region erased before each readout repaint
    pub value_box: Rect,
    /// Bottom-center of the readout text
    pub value_anchor: Point,
    /// Center of the unit label
    pub unit_anchor: Point,
    /// Top-center of the unit icon
    pub icon_anchor: Point,
}

impl LayoutCache {
    /// Run a full layout pass
    pub fn compute<M: TextMeasure + ?Sized>(
        params: &LayoutParams,
        measure: &M,
        generation: u64,
    ) -> Self {
        let content = params.content;
        let width = content.width.max(0);
        let height = content.height.max(0);

        // Height-driven unless the width is the binding constraint.
        let mut offset_height = (height as f32 / OFFSET_CENTER_DIVIDER) as i32;
        let mut radius = offset_height;
        let mut y_diff = offset_height - height / 2;
        let mut diameter = radius * 2;
        if width < height || width < diameter {
            offset_height = (width as f32 / OFFSET_CENTER_DIVIDER) as i32;
            radius = width / 2;
            diameter = radius * 2;
            y_diff = offset_height - width / 2;
        }

        let x = params.horizontal.place(diameter, content.x, width);
        let y = params
            .vertical
            .place((diameter - y_diff).min(height), content.y, height);

        let center = Point::new(x + radius, y + radius);
        let bounds = ArcDescriptor::new(radius, x, y);

        let outer = bounds.inset(OUTER_ARC_OFFSET);
        let inner = bounds.inset(INNER_ARC_OFFSET);
        let line_start = inner.inset(FADE);
        let line_short = bounds.inset(LINE_SHORT_ARC_OFFSET);
        let line_long = bounds.inset(LINE_LONG_ARC_OFFSET);
        let line_label = bounds.inset(LINE_LABEL_ARC_OFFSET);

        let ticks = compute_ticks(params, &line_start, &line_short, &line_long, &line_label);

        let value_font_height = measure.font_height(FontRole::Value);
        let baseline_offset = value_font_height - measure.baseline(FontRole::Value);
        let value_anchor = Point::new(center.x, center.y + baseline_offset);
        let box_width = measure.text_width(FontRole::Value, &params.range.widest_label());
        // Spans the whole value line minus the margins, descent included.
        let box_height = (value_font_height - MAIN_LABEL_BG_TOP_OFFSET - MAIN_LABEL_BG_BOTTOM_OFFSET)
            .max(0);
        let value_box = Rect::new(
            Alignment::Center.around(box_width, center.x),
            value_anchor.y - value_font_height + MAIN_LABEL_BG_TOP_OFFSET,
            box_width,
            box_height,
        );

        let outer_radius = outer.radius() as f32;
        let unit_anchor = Point::new(
            center.x,
            center.y + (outer_radius / UNIT_TEXT_OFFSET_DIVIDER) as i32,
        );
        let icon_anchor = Point::new(
            center.x,
            center.y + (outer_radius / UNIT_ICON_OFFSET_DIVIDER) as i32,
        );

        Self {
            generation,
            center,
            outer,
            inner,
            line_start,
            line_short,
            line_long,
            line_label,
            ticks,
            value_box,
            value_anchor,
            unit_anchor,
            icon_anchor,
        }
    }

    /// Long ticks, in scale order
    pub fn long_ticks(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter().filter(|t| t.is_long())
    }
}

fn compute_ticks(
    params: &LayoutParams,
    line_start: &ArcDescriptor,
    line_short: &ArcDescriptor,
    line_long: &ArcDescriptor,
    line_label: &ArcDescriptor,
) -> Vec<Tick> {
    (0..=100u32)
        .filter(|p| p % SMALL_LINE_EVERY_X_PERCENT == 0 || p % BIG_LINE_EVERY_X_PERCENT == 0)
        .map(|percent| {
            let angle =
                value_from_percent(percent as f32, START_ANGLE, END_ANGLE, params.inverted);
            let from = point_on_circle(angle, line_start);

            if percent % BIG_LINE_EVERY_X_PERCENT == 0 {
                let value =
                    value_at_percent(f64::from(percent), params.range.min(), params.range.max());
                Tick {
                    percent,
                    angle,
                    from,
                    to: point_on_circle(angle, line_long),
                    label: Some(TickLabel {
                        text: value.to_string(),
                        anchor: point_on_circle(angle, line_label),
                    }),
                }
            } else {
                Tick {
                    percent,
                    angle,
                    from,
                    to: point_on_circle(angle, line_short),
                    label: None,
                }
            }
        })
        .collect()
}

/// Cached layout of a widget
///
/// `Absent` until the first render after construction or invalidation.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LayoutState {
    #[default]
    Absent,
    Present(LayoutCache),
}

impl LayoutState {
    /// Discard the cached layout
    pub fn invalidate(&mut self) {
        if self.is_present() {
            log::debug!("Gauge layout invalidated");
        }
        *self = LayoutState::Absent;
    }

    pub fn is_present(&self) -> bool {
        matches!(self, LayoutState::Present(_))
    }

    pub fn get(&self) -> Option<&LayoutCache> {
        match self {
            LayoutState::Present(cache) => Some(cache),
            LayoutState::Absent => None,
        }
    }

    /// Return the cached layout, building it first if absent
    ///
    /// The flag is `true` when the layout was built by this call.
    pub fn get_or_build(&mut self, build: impl FnOnce() -> LayoutCache) -> (&LayoutCache, bool) {
        let fresh = !self.is_present();
        if fresh {
            *self = LayoutState::Present(build());
        }
        match self {
            LayoutState::Present(cache) => (cache, fresh),
            LayoutState::Absent => unreachable!("layout was just built"),
        }
    }
}

/// Smallest content size that fits the whole gauge
///
/// Accounts for the arc stack, the widest tick label, the readout, the unit
/// label and the optional icon.
pub fn optimal_size<M: TextMeasure + ?Sized>(
    measure: &M,
    range: &GaugeRange,
    unit: &str,
    icon_height: Option<i32>,
) -> Size {
    let widest = range.widest_label();

    // Outer arc with fade on both sides, gap, inner arc with fade on both
    // sides, long tick with one fade (the other overlaps the inner arc).
    let ring_stack = OUTER_ARC_THICKNESS
        + FADE * 2
        + INNER_OUTER_ARC_DISTANCE
        + INNER_ARC_THICKNESS
        + FADE * 2
        + LINE_LONG_LENGTH
        + FADE_LONG_LINE
        + LINE_LABEL_DISTANCE;

    let half_width = ring_stack + measure.text_width(FontRole::ArcLabel, &widest) / 2;
    let width = half_width * 2
        + measure
            .text_width(FontRole::Value, &widest)
            .max(measure.text_width(FontRole::Unit, unit));

    let height = ring_stack
        + measure.font_height(FontRole::ArcLabel) / 2
        + measure.font_height(FontRole::Value)
        + measure.font_height(FontRole::Unit)
        + icon_height.unwrap_or(0);

    Size::new(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::canvas::MonospaceMetrics;

    fn params(width: i32, height: i32, min: i32, max: i32) -> LayoutParams {
        LayoutParams {
            content: Rect::new(0, 0, width, height),
            horizontal: Alignment::Center,
            vertical: Alignment::Center,
            range: GaugeRange::new(min, max).unwrap(),
            inverted: false,
        }
    }

    #[test]
    fn test_offsets_stack_inward() {
        assert_eq!(OUTER_ARC_OFFSET, 3);
        assert_eq!(INNER_OUTER_ARC_OFFSET, 15);
        assert_eq!(INNER_ARC_OFFSET, 17);
        assert_eq!(LINE_SHORT_ARC_OFFSET, 25);
        assert_eq!(LINE_LONG_ARC_OFFSET, 31);
        assert_eq!(LINE_LABEL_ARC_OFFSET, 49);
        assert_eq!(ARC_SWEEP, -260);
    }

    #[test]
    fn test_height_driven_radius() {
        // Wide box: height is binding.
        let cache = LayoutCache::compute(&params(400, 173, 0, 100), &MonospaceMetrics::default(), 0);
        let radius = 100;
        assert_eq!(cache.outer.radius(), radius - OUTER_ARC_OFFSET);
        // Diameter 200 centered in 400.
        assert_eq!(cache.center.x, 100 + radius);
    }

    #[test]
    fn test_width_driven_radius() {
        // Tall box: width is binding.
        let cache = LayoutCache::compute(&params(200, 400, 0, 100), &MonospaceMetrics::default(), 0);
        assert_eq!(cache.outer.radius(), 100 - OUTER_ARC_OFFSET);
        assert_eq!(cache.center.x, 100);
    }

    #[test]
    fn test_rings_are_concentric() {
        let cache = LayoutCache::compute(&params(320, 240, 0, 1111), &MonospaceMetrics::default(), 0);
        for arc in [
            cache.outer,
            cache.inner,
            cache.line_start,
            cache.line_short,
            cache.line_long,
            cache.line_label,
        ] {
            assert_eq!(arc.center(), cache.center);
        }
        assert!(cache.outer.radius() > cache.inner.radius());
        assert!(cache.inner.radius() > cache.line_start.radius());
        assert!(cache.line_start.radius() > cache.line_short.radius());
        assert!(cache.line_short.radius() > cache.line_long.radius());
        assert!(cache.line_long.radius() > cache.line_label.radius());
    }

    #[test]
    fn test_alignment_is_honored() {
        let mut p = params(600, 173, 0, 100);
        p.horizontal = Alignment::Start;
        let left = LayoutCache::compute(&p, &MonospaceMetrics::default(), 0);
        p.horizontal = Alignment::End;
        let right = LayoutCache::compute(&p, &MonospaceMetrics::default(), 0);
        assert_eq!(left.center.x, 100);
        assert_eq!(right.center.x, 500);
    }

    #[test]
    fn test_content_origin_offsets_everything() {
        let mut p = params(300, 300, 0, 100);
        let base = LayoutCache::compute(&p, &MonospaceMetrics::default(), 0);
        p.content = Rect::new(5, 7, 300, 300);
        let moved = LayoutCache::compute(&p, &MonospaceMetrics::default(), 0);
        assert_eq!(moved.center.x - base.center.x, 5);
        assert_eq!(moved.center.y - base.center.y, 7);
    }

    #[test]
    fn test_tick_layout() {
        let cache = LayoutCache::compute(&params(320, 240, 0, 1111), &MonospaceMetrics::default(), 0);
        assert_eq!(cache.ticks.len(), 51);
        let labels: Vec<&str> = cache
            .long_ticks()
            .filter_map(|t| t.label.as_ref())
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(labels.len(), 11);
        assert_eq!(labels.first(), Some(&"0"));
        assert_eq!(labels[5], "556");
        assert_eq!(labels.last(), Some(&"1111"));
        assert_eq!(cache.ticks[0].angle, START_ANGLE as f32);
        assert_eq!(cache.ticks[50].angle, END_ANGLE as f32);
    }

    #[test]
    fn test_inverted_ticks_swap_ends() {
        let mut p = params(320, 240, 0, 100);
        p.inverted = true;
        let cache = LayoutCache::compute(&p, &MonospaceMetrics::default(), 0);
        assert_eq!(cache.ticks[0].angle, END_ANGLE as f32);
        assert_eq!(cache.ticks[0].label.as_ref().map(|l| l.text.as_str()), Some("0"));
    }

    #[test]
    fn test_value_box_tracks_widest_label() {
        let metrics = MonospaceMetrics::default();
        let narrow = LayoutCache::compute(&params(320, 240, 0, 100), &metrics, 0);
        let wide = LayoutCache::compute(&params(320, 240, 0, 2000), &metrics, 0);
        assert_eq!(narrow.value_box.width, metrics.value.advance * 3);
        assert_eq!(wide.value_box.width, metrics.value.advance * 4);
        assert_eq!(wide.value_box.height, 82 - 20);
    }

    #[test]
    fn test_half_i32_bounds() {
        let metrics = MonospaceMetrics::default();
        let (min, max) = (i32::MIN / 2, i32::MAX / 2);
        let cache = LayoutCache::compute(&params(320, 240, min, max), &metrics, 0);

        assert_eq!(cache.ticks.len(), 51);
        let labels: Vec<&str> = cache
            .ticks
            .iter()
            .filter_map(|t| t.label.as_ref().map(|l| l.text.as_str()))
            .collect();
        assert_eq!(labels.len(), 11);
        assert_eq!(labels[0], min.to_string());
        assert_eq!(labels[10], max.to_string());
        assert_eq!(
            cache.value_box.width,
            metrics.value.advance * min.to_string().len() as i32
        );
    }

    #[test]
    fn test_layout_state_lifecycle() {
        let mut state = LayoutState::Absent;
        let p = params(320, 240, 0, 100);
        let metrics = MonospaceMetrics::default();

        let (cache, fresh) = state.get_or_build(|| LayoutCache::compute(&p, &metrics, 1));
        assert!(fresh);
        assert_eq!(cache.generation, 1);

        let (cache, fresh) = state.get_or_build(|| LayoutCache::compute(&p, &metrics, 2));
        assert!(!fresh);
        assert_eq!(cache.generation, 1);

        state.invalidate();
        assert!(state.get().is_none());
    }

    #[test]
    fn test_optimal_size() {
        let metrics = MonospaceMetrics::default();
        let range = GaugeRange::new(0, 1111).unwrap();
        let size = optimal_size(&metrics, &range, "Watt", None);
        // ring stack: 4+2+10+2+2+12+1+18 = 51; label half: 24/2 = 12
        assert_eq!(size.width, (51 + 12) * 2 + 168);
        assert_eq!(size.height, 51 + 19 / 2 + 82 + 19);

        let with_icon = optimal_size(&metrics, &range, "Watt", Some(24));
        assert_eq!(with_icon.height, size.height + 24);
    }
}
