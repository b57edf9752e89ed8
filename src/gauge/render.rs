//! Gauge drawing routines
//!
//! Stateless painters split in two passes:
//! - the static pass (background, ticks, tick labels, inner arc, unit) runs
//!   once after the layout is rebuilt;
//! - the dynamic pass (outer arc, readout, progress) runs on every redraw and
//!   only erases the readout box instead of the whole surface.

use crate::domain::{Alignment, GaugeRange, Rgb};
use crate::error::RenderError;
use crate::gauge::canvas::{Canvas, FontRole, Icon, Stroke, TextAnchor};
use crate::gauge::geometry::{angle_from_value, Point, Rect};
use crate::gauge::layout::{
    LayoutCache, ARC_SWEEP, END_ANGLE, FADE, FADE_LONG_LINE, FADE_SHORT_LINE,
    INNER_ARC_THICKNESS, LINE_THICKNESS, OUTER_ARC_THICKNESS, START_ANGLE,
};
use serde::{Deserialize, Serialize};

/// Default progress highlight
pub const DEFAULT_PROGRESS_COLOR: Rgb = Rgb::new(0xE91C73);
/// Default progress track
pub const DEFAULT_PROGRESS_BG_COLOR: Rgb = Rgb::new(0x382349);
/// Default content background
pub const DEFAULT_BACKGROUND_COLOR: Rgb = Rgb::new(0x1D1D1D);

/// Colors of one gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeStyle {
    /// Content background, also used to erase the readout
    pub background: Rgb,
    /// Readout text
    pub value: Rgb,
    /// Progress arc
    pub progress: Rgb,
    /// Progress track, inner arc and ticks
    pub progress_background: Rgb,
    pub unit_label: Rgb,
    pub unit_icon: Rgb,
    pub arc_labels: Rgb,
}

impl Default for GaugeStyle {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND_COLOR,
            value: Rgb::WHITE,
            progress: DEFAULT_PROGRESS_COLOR,
            progress_background: DEFAULT_PROGRESS_BG_COLOR,
            unit_label: Rgb::WHITE,
            unit_icon: DEFAULT_PROGRESS_COLOR,
            arc_labels: DEFAULT_PROGRESS_BG_COLOR,
        }
    }
}

/// Paint everything that does not change between value updates
pub fn paint_static<C: Canvas + ?Sized>(
    canvas: &mut C,
    layout: &LayoutCache,
    style: &GaugeStyle,
    bounds: Rect,
    unit: &str,
    icon: Option<&Icon>,
) -> Result<(), RenderError> {
    canvas.fill_rect(bounds, style.background)?;

    for tick in &layout.ticks {
        let fade = if tick.is_long() {
            FADE_LONG_LINE
        } else {
            FADE_SHORT_LINE
        };
        canvas.draw_line(
            tick.from,
            tick.to,
            Stroke::new(LINE_THICKNESS, fade),
            style.progress_background,
        )?;

        if let Some(label) = &tick.label {
            canvas.draw_text(
                &label.text,
                FontRole::ArcLabel,
                TextAnchor::centered(label.anchor),
                style.arc_labels,
            )?;
        }
    }

    // Drawn after the ticks so it covers their inner ends.
    canvas.draw_arc(
        &layout.inner,
        START_ANGLE as f32,
        ARC_SWEEP as f32,
        Stroke::new(INNER_ARC_THICKNESS, FADE),
        style.progress_background,
    )?;

    canvas.draw_text(
        unit,
        FontRole::Unit,
        TextAnchor::centered(layout.unit_anchor),
        style.unit_label,
    )?;

    if let Some(icon) = icon {
        let top_left = Point::new(
            layout.icon_anchor.x - icon.width() / 2,
            layout.icon_anchor.y,
        );
        canvas.draw_icon(icon, top_left, style.unit_icon)?;
    }

    Ok(())
}

/// Signed progress sweep and its start angle for `value`
///
/// `value` must already lie inside `range`.
pub fn progress_sweep(
    value: i32,
    range: &GaugeRange,
    inverted: bool,
) -> Result<(f32, f32), RenderError> {
    let sweep = angle_from_value(
        value as f32,
        range.min() as f32,
        range.max() as f32,
        0.0,
        ARC_SWEEP as f32,
    )?;
    if inverted {
        Ok((END_ANGLE as f32, -sweep))
    } else {
        Ok((START_ANGLE as f32, sweep))
    }
}

/// Area erased behind the readout
///
/// The layout's value box fits every in-range label. A wider readout (a value
/// outside the range) widens the box around the readout anchor.
pub fn readout_box(layout: &LayoutCache, erase_width: i32) -> Rect {
    let value_box = layout.value_box;
    if erase_width <= value_box.width {
        return value_box;
    }
    Rect::new(
        Alignment::Center.around(erase_width, layout.value_anchor.x),
        value_box.y,
        erase_width,
        value_box.height,
    )
}

/// Paint the parts that follow the value
///
/// Values outside `range` are drawn as the nearest bound on the arc; the
/// readout still shows the real value. `erase_width` is the widest readout
/// drawn since the static pass.
pub fn paint_dynamic<C: Canvas + ?Sized>(
    canvas: &mut C,
    layout: &LayoutCache,
    style: &GaugeStyle,
    range: &GaugeRange,
    value: i32,
    inverted: bool,
    erase_width: i32,
) -> Result<(), RenderError> {
    let outer_stroke = Stroke::new(OUTER_ARC_THICKNESS, FADE);

    canvas.draw_arc(
        &layout.outer,
        START_ANGLE as f32,
        ARC_SWEEP as f32,
        outer_stroke,
        style.progress_background,
    )?;

    canvas.fill_rect(readout_box(layout, erase_width), style.background)?;
    canvas.draw_text(
        &value.to_string(),
        FontRole::Value,
        TextAnchor::bottom_center(layout.value_anchor),
        style.value,
    )?;

    let on_scale = range.clamp(value);
    if on_scale != value {
        log::warn!(
            "Gauge value {} outside range {}, drawing {}",
            value,
            range,
            on_scale
        );
    }

    let (start, sweep) = progress_sweep(on_scale, range, inverted)?;
    canvas.draw_arc(&layout.outer, start, sweep, outer_stroke, style.progress)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::canvas::MonospaceMetrics;
    use crate::gauge::layout::LayoutParams;
    use crate::mock::{DrawCommand, RecordingCanvas};

    fn layout(range: GaugeRange) -> LayoutCache {
        let params = LayoutParams {
            content: Rect::new(0, 0, 320, 240),
            horizontal: Alignment::Center,
            vertical: Alignment::Center,
            range,
            inverted: false,
        };
        LayoutCache::compute(&params, &RecordingCanvas::new(), 1)
    }

    #[test]
    fn test_progress_sweep_directions() {
        let range = GaugeRange::new(0, 100).unwrap();
        assert_eq!(progress_sweep(0, &range, false).unwrap(), (220.0, 0.0));
        assert_eq!(progress_sweep(100, &range, false).unwrap(), (220.0, -260.0));
        assert_eq!(progress_sweep(100, &range, true).unwrap(), (-40.0, 260.0));
        assert_eq!(progress_sweep(50, &range, true).unwrap(), (-40.0, 130.0));
    }

    #[test]
    fn test_progress_sweep_rejects_out_of_range() {
        let range = GaugeRange::new(0, 100).unwrap();
        assert!(matches!(
            progress_sweep(101, &range, false),
            Err(RenderError::Geometry(_))
        ));
    }

    #[test]
    fn test_static_pass_contents() {
        let range = GaugeRange::new(0, 1111).unwrap();
        let cache = layout(range);
        let mut canvas = RecordingCanvas::new();
        let icon = Icon::new("watt.png", 20, 24);

        paint_static(
            &mut canvas,
            &cache,
            &GaugeStyle::default(),
            Rect::new(0, 0, 320, 240),
            "Watt",
            Some(&icon),
        )
        .unwrap();

        let commands = canvas.commands();
        assert!(matches!(commands.first(), Some(DrawCommand::FillRect { .. })));
        assert_eq!(canvas.count(|c| matches!(c, DrawCommand::Line { .. })), 51);
        assert_eq!(canvas.texts_with(FontRole::ArcLabel).len(), 11);
        assert_eq!(canvas.texts_with(FontRole::Unit), vec!["Watt".to_string()]);
        assert_eq!(canvas.count(|c| matches!(c, DrawCommand::Icon { .. })), 1);
        assert_eq!(canvas.count(|c| matches!(c, DrawCommand::Arc { .. })), 1);
    }

    #[test]
    fn test_dynamic_pass_erases_only_value_box() {
        let range = GaugeRange::new(0, 1111).unwrap();
        let cache = layout(range);
        let mut canvas = RecordingCanvas::new();

        paint_dynamic(&mut canvas, &cache, &GaugeStyle::default(), &range, 500, false, 0).unwrap();

        let fills: Vec<Rect> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![cache.value_box]);
        assert_eq!(canvas.texts_with(FontRole::Value), vec!["500".to_string()]);

        let arcs = canvas.arcs();
        assert_eq!(arcs.len(), 2);
        let expected = angle_from_value(500.0, 0.0, 1111.0, 0.0, -260.0).unwrap();
        assert_eq!(arcs[1].1, expected);
    }

    #[test]
    fn test_dynamic_pass_clamps_arc_but_not_readout() {
        let range = GaugeRange::new(0, 100).unwrap();
        let cache = layout(range);
        let mut canvas = RecordingCanvas::new();

        paint_dynamic(&mut canvas, &cache, &GaugeStyle::default(), &range, 140, false, 0).unwrap();

        assert_eq!(canvas.texts_with(FontRole::Value), vec!["140".to_string()]);
        assert_eq!(canvas.arcs()[1].1, -260.0);
    }

    #[test]
    fn test_wide_readout_widens_erase_box() {
        let range = GaugeRange::new(0, 100).unwrap();
        let cache = layout(range);
        let wide = MonospaceMetrics::default().value.advance * 5;

        assert_eq!(readout_box(&cache, 0), cache.value_box);
        let widened = readout_box(&cache, wide);
        assert_eq!(widened.width, wide);
        assert_eq!(widened.x + wide / 2, cache.value_anchor.x);
        assert_eq!((widened.y, widened.height), (cache.value_box.y, cache.value_box.height));

        let mut canvas = RecordingCanvas::new();
        paint_dynamic(&mut canvas, &cache, &GaugeStyle::default(), &range, 12345, false, wide)
            .unwrap();
        assert!(canvas
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillRect { rect, .. } if *rect == widened)));
    }
}
