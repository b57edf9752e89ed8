//! Power gauge canvas
//!
//! Adapts the gauge's drawing surface to an iced [`Frame`]. The static layer
//! (ticks, labels, inner arc, unit) lives in a [`canvas::Cache`] and is only
//! redrawn when the widget asks for a full paint; the readout and progress
//! arc are drawn into a fresh frame every time.

use crate::message::Message;
use crate::theme::colors;

use iced::advanced::svg::Svg;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Frame, Geometry, Path, Text};
use iced::widget::svg;
use iced::{font, mouse, Font, Radians, Rectangle, Renderer, Theme};
use std::cell::RefCell;
use std::path::Path as FsPath;
use wattgauge::domain::{Alignment, Rgb};
use wattgauge::error::CanvasError;
use wattgauge::gauge::canvas::{Cap, Stroke, TextAnchor};
use wattgauge::gauge::{
    ArcDescriptor, Canvas, FontRole, GaugeWidget, Icon, IconLoader, MonospaceMetrics, Point,
    Rect, Size, TextMeasure,
};

/// Edge length of loaded unit icons in pixels
pub const DEFAULT_ICON_SIZE: i32 = 24;

/// Loads unit icons as SVG files from disk
#[derive(Debug, Clone, Copy)]
pub struct SvgIconLoader {
    size: i32,
}

impl SvgIconLoader {
    pub fn new(size: i32) -> Self {
        Self { size }
    }
}

impl Default for SvgIconLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_SIZE)
    }
}

impl IconLoader for SvgIconLoader {
    fn load(&self, path: &str) -> Result<Icon, CanvasError> {
        let file = FsPath::new(path);
        let is_svg = file
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if !is_svg || !file.is_file() {
            return Err(CanvasError::Asset(path.to_string()));
        }
        Ok(Icon::new(path, self.size, self.size))
    }
}

/// Map a gauge angle pair to iced's clockwise radians
///
/// Gauge angles grow counter-clockwise on screen; iced angles grow clockwise
/// because its y axis points down.
pub fn arc_radians(start_angle: f32, sweep: f32) -> (Radians, Radians) {
    let start = -start_angle;
    let end = -(start_angle + sweep);
    (Radians(start.to_radians()), Radians(end.to_radians()))
}

pub fn horizontal(alignment: Alignment) -> Horizontal {
    match alignment {
        Alignment::Start => Horizontal::Left,
        Alignment::Center => Horizontal::Center,
        Alignment::End => Horizontal::Right,
    }
}

pub fn vertical(alignment: Alignment) -> Vertical {
    match alignment {
        Alignment::Start => Vertical::Top,
        Alignment::Center => Vertical::Center,
        Alignment::End => Vertical::Bottom,
    }
}

fn to_point(point: Point) -> iced::Point {
    iced::Point::new(point.x as f32, point.y as f32)
}

fn to_stroke(stroke: Stroke, color: Rgb) -> canvas::Stroke<'static> {
    let cap = match stroke.cap {
        Cap::Rounded => canvas::LineCap::Round,
        Cap::Flat => canvas::LineCap::Butt,
    };
    canvas::Stroke::default()
        .with_width(stroke.thickness as f32)
        .with_color(colors::rgb(color))
        .with_line_cap(cap)
}

/// [`Canvas`] over an iced frame
pub struct IcedSurface<'a> {
    frame: &'a mut Frame,
    metrics: MonospaceMetrics,
}

impl<'a> IcedSurface<'a> {
    pub fn new(frame: &'a mut Frame, metrics: MonospaceMetrics) -> Self {
        Self { frame, metrics }
    }
}

impl TextMeasure for IcedSurface<'_> {
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

impl Canvas for IcedSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<(), CanvasError> {
        if rect.width < 0 || rect.height < 0 {
            return Err(CanvasError::primitive("fill_rect", "negative extent"));
        }
        self.frame.fill_rectangle(
            to_point(rect.top_left()),
            iced::Size::new(rect.width as f32, rect.height as f32),
            colors::rgb(color),
        );
        Ok(())
    }

    fn draw_arc(
        &mut self,
        arc: &ArcDescriptor,
        start_angle: f32,
        sweep: f32,
        stroke: Stroke,
        color: Rgb,
    ) -> Result<(), CanvasError> {
        if arc.radius() <= 0 {
            return Err(CanvasError::primitive("draw_arc", "radius must be positive"));
        }
        if sweep == 0.0 {
            return Ok(());
        }

        let (start, end) = arc_radians(start_angle, sweep);
        let path = Path::new(|builder| {
            builder.arc(canvas::path::Arc {
                center: to_point(arc.center()),
                radius: arc.radius() as f32,
                start_angle: start,
                end_angle: end,
            });
        });
        self.frame.stroke(&path, to_stroke(stroke, color));
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        stroke: Stroke,
        color: Rgb,
    ) -> Result<(), CanvasError> {
        let path = Path::line(to_point(from), to_point(to));
        self.frame.stroke(&path, to_stroke(stroke, color));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        font: FontRole,
        anchor: TextAnchor,
        color: Rgb,
    ) -> Result<(), CanvasError> {
        let metrics = self.metrics.metrics(font);
        let face = match font {
            FontRole::Value => Font {
                weight: font::Weight::Bold,
                ..Font::DEFAULT
            },
            FontRole::Unit | FontRole::ArcLabel => Font::DEFAULT,
        };

        self.frame.fill_text(Text {
            content: text.to_string(),
            position: to_point(anchor.point),
            color: colors::rgb(color),
            size: (metrics.size as f32).into(),
            font: face,
            horizontal_alignment: horizontal(anchor.horizontal),
            vertical_alignment: vertical(anchor.vertical),
            ..Text::default()
        });
        Ok(())
    }

    fn draw_icon(&mut self, icon: &Icon, top_left: Point, color: Rgb) -> Result<(), CanvasError> {
        let bounds = Rectangle::new(
            to_point(top_left),
            iced::Size::new(icon.width() as f32, icon.height() as f32),
        );
        let handle = svg::Handle::from_path(icon.path());
        self.frame
            .draw_svg(bounds, Svg::new(handle).color(colors::rgb(color)));
        Ok(())
    }
}

/// Canvas program drawing one [`GaugeWidget`]
pub struct GaugeCanvas<'a> {
    gauge: &'a RefCell<GaugeWidget>,
    cache: &'a canvas::Cache,
    metrics: MonospaceMetrics,
}

impl<'a> GaugeCanvas<'a> {
    pub fn new(
        gauge: &'a RefCell<GaugeWidget>,
        cache: &'a canvas::Cache,
        metrics: MonospaceMetrics,
    ) -> Self {
        Self {
            gauge,
            cache,
            metrics,
        }
    }
}

impl canvas::Program<Message> for GaugeCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let Ok(mut gauge) = self.gauge.try_borrow_mut() else {
            log::warn!("Gauge busy, frame skipped");
            return Vec::new();
        };

        gauge.resize(Size::new(bounds.width as i32, bounds.height as i32));
        if gauge.needs_full_paint() {
            self.cache.clear();
        }

        let metrics = self.metrics;
        let static_layer = self.cache.draw(renderer, bounds.size(), |frame| {
            let mut surface = IcedSurface::new(frame, metrics);
            if let Err(e) = gauge.render_static(&mut surface) {
                log::error!("Failed to paint gauge background: {}", e);
            }
        });

        let mut frame = Frame::new(renderer, bounds.size());
        let mut surface = IcedSurface::new(&mut frame, metrics);
        if let Err(e) = gauge.render_dynamic(&mut surface) {
            log::error!("Failed to paint gauge value: {}", e);
        }

        vec![static_layer, frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn degrees(radians: Radians) -> f32 {
        radians.0.to_degrees()
    }

    #[test]
    fn test_arc_radians_flip_direction() {
        let (start, end) = arc_radians(220.0, -260.0);
        assert!((degrees(start) + 220.0).abs() < 1e-3);
        assert!((degrees(end) - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_arc_radians_inverted_sweep() {
        let (start, end) = arc_radians(-40.0, 130.0);
        assert!((degrees(start) - 40.0).abs() < 1e-3);
        assert!((degrees(end) + 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_alignment_mapping() {
        assert_eq!(horizontal(Alignment::Start), Horizontal::Left);
        assert_eq!(horizontal(Alignment::End), Horizontal::Right);
        assert_eq!(vertical(Alignment::Center), Vertical::Center);
        assert_eq!(vertical(Alignment::End), Vertical::Bottom);
    }

    #[test]
    fn test_svg_loader_accepts_existing_svg() {
        let mut file = tempfile::Builder::new().suffix(".svg").tempfile().unwrap();
        writeln!(file, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let icon = SvgIconLoader::new(16).load(&path).unwrap();
        assert_eq!(icon.path(), path);
        assert_eq!((icon.width(), icon.height()), (16, 16));
    }

    #[test]
    fn test_svg_loader_rejects_missing_and_raster() {
        let loader = SvgIconLoader::default();
        assert!(matches!(
            loader.load("/nonexistent/icon.svg"),
            Err(CanvasError::Asset(_))
        ));

        let raster = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        let path = raster.path().to_str().unwrap();
        assert!(loader.load(path).is_err());
    }
}
