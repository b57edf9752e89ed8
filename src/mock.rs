//! Mock implementations for testing
//!
//! Provides a recording canvas, a scriptable value source and an icon loader
//! for exercising the gauge without a display or a meter.

use crate::domain::Rgb;
use crate::error::{CanvasError, SourceError};
use crate::gauge::canvas::{Canvas, FontRole, Icon, IconLoader, MonospaceMetrics, Stroke, TextAnchor, TextMeasure};
use crate::gauge::geometry::{ArcDescriptor, Point, Rect};
use crate::source::{Listener, ListenerSet, SubscriptionId, ValueSource};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One primitive recorded by [`RecordingCanvas`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Rgb,
    },
    Arc {
        arc: ArcDescriptor,
        start: f32,
        sweep: f32,
        stroke: Stroke,
        color: Rgb,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
        color: Rgb,
    },
    Text {
        text: String,
        font: FontRole,
        anchor: TextAnchor,
        color: Rgb,
    },
    Icon {
        path: String,
        top_left: Point,
        color: Rgb,
    },
}

/// Canvas that records every primitive instead of drawing
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    metrics: MonospaceMetrics,
    commands: Vec<DrawCommand>,
    calls: usize,
    fail_at: Option<usize>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: measure text with custom metrics
    pub fn with_metrics(mut self, metrics: MonospaceMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Canvas whose `n`-th primitive call (1-based) fails
    pub fn failing_at(n: usize) -> Self {
        Self {
            fail_at: Some(n),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }

    /// Texts drawn with `font`, in drawing order
    pub fn texts_with(&self, font: FontRole) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, font: f, .. } if *f == font => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(start, sweep)` of every arc, in drawing order
    pub fn arcs(&self) -> Vec<(f32, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc { start, sweep, .. } => Some((*start, *sweep)),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, primitive: &'static str, command: DrawCommand) -> Result<(), CanvasError> {
        self.calls += 1;
        if self.fail_at == Some(self.calls) {
            return Err(CanvasError::primitive(primitive, "injected failure"));
        }
        self.commands.push(command);
        Ok(())
    }
}

impl TextMeasure for RecordingCanvas {
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

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<(), CanvasError> {
        self.record("fill_rect", DrawCommand::FillRect { rect, color })
    }

    fn draw_arc(
        &mut self,
        arc: &ArcDescriptor,
        start_angle: f32,
        sweep: f32,
        stroke: Stroke,
        color: Rgb,
    ) -> Result<(), CanvasError> {
        self.record(
            "draw_arc",
            DrawCommand::Arc {
                arc: *arc,
                start: start_angle,
                sweep,
                stroke,
                color,
            },
        )
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        stroke: Stroke,
        color: Rgb,
    ) -> Result<(), CanvasError> {
        self.record(
            "draw_line",
            DrawCommand::Line {
                from,
                to,
                stroke,
                color,
            },
        )
    }

    fn draw_text(
        &mut self,
        text: &str,
        font: FontRole,
        anchor: TextAnchor,
        color: Rgb,
    ) -> Result<(), CanvasError> {
        self.record(
            "draw_text",
            DrawCommand::Text {
                text: text.to_string(),
                font,
                anchor,
                color,
            },
        )
    }

    fn draw_icon(&mut self, icon: &Icon, top_left: Point, color: Rgb) -> Result<(), CanvasError> {
        self.record(
            "draw_icon",
            DrawCommand::Icon {
                path: icon.path().to_string(),
                top_left,
                color,
            },
        )
    }
}

#[derive(Debug)]
struct SourceState {
    value: i32,
    min: i32,
    max: i32,
    error: Option<SourceError>,
}

/// Value source driven by the test
#[derive(Debug)]
pub struct MockSource {
    state: Mutex<SourceState>,
    listeners: Mutex<ListenerSet>,
    range_reads: AtomicUsize,
}

impl MockSource {
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            state: Mutex::new(SourceState {
                value: min,
                min,
                max,
                error: None,
            }),
            listeners: Mutex::new(ListenerSet::new()),
            range_reads: AtomicUsize::new(0),
        }
    }

    /// Publish a reading and notify subscribers
    pub fn emit(&self, value: i32) {
        {
            let mut state = self.state.lock().unwrap();
            state.value = value;
            state.error = None;
        }
        self.notify();
    }

    /// Make every read fail until the next `emit`
    pub fn fail_with(&self, error: SourceError) {
        self.state.lock().unwrap().error = Some(error);
    }

    pub fn notify(&self) {
        let listeners = self.listeners.lock().unwrap().snapshot();
        for listener in listeners {
            listener();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    /// How many times the lower bound was read
    pub fn range_reads(&self) -> usize {
        self.range_reads.load(Ordering::SeqCst)
    }

    fn read(&self, pick: impl Fn(&SourceState) -> i32) -> Result<i32, SourceError> {
        let state = self.state.lock().unwrap();
        match &state.error {
            Some(e) => Err(e.clone()),
            None => Ok(pick(&state)),
        }
    }
}

impl ValueSource for MockSource {
    fn value(&self) -> Result<i32, SourceError> {
        self.read(|s| s.value)
    }

    fn min_value(&self) -> Result<i32, SourceError> {
        self.range_reads.fetch_add(1, Ordering::SeqCst);
        self.read(|s| s.min)
    }

    fn max_value(&self) -> Result<i32, SourceError> {
        self.read(|s| s.max)
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        self.listeners.lock().unwrap().insert(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().unwrap().remove(id);
    }
}

/// Icon loader that hands out fixed-size icons
#[derive(Debug, Default)]
pub struct MockIconLoader {
    width: i32,
    height: i32,
    fail: bool,
    loaded: Mutex<Vec<String>>,
}

impl MockIconLoader {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Loader whose every load fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Paths loaded so far
    pub fn loaded(&self) -> Vec<String> {
        self.loaded.lock().unwrap().clone()
    }
}

impl IconLoader for MockIconLoader {
    fn load(&self, path: &str) -> Result<Icon, CanvasError> {
        if self.fail {
            return Err(CanvasError::Asset(path.to_string()));
        }
        self.loaded.lock().unwrap().push(path.to_string());
        Ok(Icon::new(path, self.width, self.height))
    }
}
