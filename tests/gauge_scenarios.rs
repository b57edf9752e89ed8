//! End-to-end gauge scenarios
//!
//! Drives the widget through the public API against a minimal recording
//! surface, the way a display host would.

use std::time::{Duration, Instant};

use wattgauge::domain::{GaugeRange, Rgb};
use wattgauge::error::CanvasError;
use wattgauge::gauge::canvas::{Stroke, TextAnchor};
use wattgauge::gauge::{
    ArcDescriptor, Canvas, Easing, FontRole, FrameOutcome, GaugeSettings, GaugeStyle,
    GaugeWidget, MonospaceMetrics, Point, Rect, Size, TextMeasure,
};

/// Surface that keeps the texts and arc sweeps of the last frame
#[derive(Default)]
struct Surface {
    metrics: MonospaceMetrics,
    texts: Vec<(FontRole, String)>,
    sweeps: Vec<f32>,
    fills: Vec<Rect>,
}

impl Surface {
    fn reset(&mut self) {
        self.texts.clear();
        self.sweeps.clear();
        self.fills.clear();
    }

    fn texts(&self, font: FontRole) -> Vec<&str> {
        self.texts
            .iter()
            .filter(|(f, _)| *f == font)
            .map(|(_, t)| t.as_str())
            .collect()
    }
}

impl TextMeasure for Surface {
    fn text_width(&self, font: FontRole, text: &str) -> i32 {
        self.metrics.text_width(font, text)
    }

    fn font_height(&self, font: FontRole) -> i32 {
        self.metrics.font_height(font)
    }

    fn baseline(&self, font: FontRole) -> i32 {
        self.metrics.baseline(font)
    }
}

impl Canvas for Surface {
    fn fill_rect(&mut self, rect: Rect, _color: Rgb) -> Result<(), CanvasError> {
        self.fills.push(rect);
        Ok(())
    }

    fn draw_arc(
        &mut self,
        _arc: &ArcDescriptor,
        _start_angle: f32,
        sweep: f32,
        _stroke: Stroke,
        _color: Rgb,
    ) -> Result<(), CanvasError> {
        self.sweeps.push(sweep);
        Ok(())
    }

    fn draw_line(&mut self, _: Point, _: Point, _: Stroke, _: Rgb) -> Result<(), CanvasError> {
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        font: FontRole,
        _anchor: TextAnchor,
        _color: Rgb,
    ) -> Result<(), CanvasError> {
        self.texts.push((font, text.to_string()));
        Ok(())
    }

    fn draw_icon(
        &mut self,
        _icon: &wattgauge::gauge::Icon,
        _top_left: Point,
        _color: Rgb,
    ) -> Result<(), CanvasError> {
        Ok(())
    }
}

fn power_gauge() -> GaugeWidget {
    let settings = GaugeSettings {
        range: GaugeRange::new(0, 1111).unwrap(),
        unit: "Watt".to_string(),
        padding: 5,
        easing: Easing::QuadInOut,
        ..GaugeSettings::default()
    };
    let mut widget = GaugeWidget::new(settings, GaugeStyle::default());
    widget.resize(Size::new(320, 240));
    widget
}

#[test]
fn test_power_gauge_shows_value_and_scale() {
    let mut widget = power_gauge();
    let mut surface = Surface::default();

    widget.set_value(500, false);
    assert_eq!(widget.render(&mut surface), FrameOutcome::Full);

    assert_eq!(surface.texts(FontRole::Value), vec!["500"]);
    assert_eq!(surface.texts(FontRole::Unit), vec!["Watt"]);
    let labels = surface.texts(FontRole::ArcLabel);
    assert_eq!(labels.len(), 11);
    assert_eq!(labels[0], "0");
    assert_eq!(labels[5], "556");
    assert_eq!(labels[10], "1111");

    // Inner arc, outer track, progress.
    assert_eq!(surface.sweeps.len(), 3);
    let progress = surface.sweeps[2];
    assert!((progress - (-260.0 * 500.0 / 1111.0)).abs() < 1e-3);
}

#[test]
fn test_range_change_rebuilds_label_ring() {
    let mut widget = power_gauge();
    let mut surface = Surface::default();
    widget.set_value(500, false);
    widget.render(&mut surface);
    let first_box = widget.layout().unwrap().value_box;

    assert_eq!(widget.set_range(0, 2000), Ok(true));
    surface.reset();
    assert_eq!(widget.render(&mut surface), FrameOutcome::Full);

    let labels = surface.texts(FontRole::ArcLabel);
    assert_eq!(labels[5], "1000");
    assert_eq!(labels[10], "2000");
    assert_eq!(widget.layout_generation(), 2);
    // Both bounds are four digits wide.
    assert_eq!(widget.layout().unwrap().value_box, first_box);
}

#[test]
fn test_animation_frames_only_repaint_value() {
    let mut widget = power_gauge();
    let mut surface = Surface::default();
    widget.render(&mut surface);

    let t0 = Instant::now();
    widget.set_value_at(1000, true, t0);
    let value_box = widget.layout().unwrap().value_box;

    let mut shown = Vec::new();
    let mut at = t0;
    while widget.is_animating() {
        at += Duration::from_millis(16);
        if widget.tick(at) {
            surface.reset();
            assert_eq!(widget.render(&mut surface), FrameOutcome::Partial);
            assert_eq!(surface.fills, vec![value_box]);
            shown.push(widget.displayed_value());
        }
    }

    assert_eq!(shown.last(), Some(&1000));
    assert!(shown.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(widget.layout_generation(), 1);
}

#[test]
fn test_hidden_gauge_keeps_last_visible_value() {
    let mut widget = power_gauge();
    let t0 = Instant::now();
    widget.set_value_at(1000, true, t0);
    widget.tick(t0 + Duration::from_millis(500));
    let visible = widget.displayed_value();

    widget.on_hidden();
    assert!(!widget.is_animating());
    assert_eq!(widget.value(), visible);

    let mut surface = Surface::default();
    widget.render(&mut surface);
    assert_eq!(surface.texts(FontRole::Value), vec![visible.to_string().as_str()]);
}
