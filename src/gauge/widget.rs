//! The gauge widget
//!
//! Owns the committed value, the cached layout and the animation driver, and
//! reconciles them on every render. All methods are meant to be called from
//! the thread that draws the gauge.

use crate::domain::{Alignment, GaugeRange};
use crate::error::{DomainError, RenderError};
use crate::gauge::animation::{AnimationDriver, Easing, DEFAULT_DURATION};
use crate::gauge::canvas::{Canvas, FontRole, Icon, IconLoader, TextMeasure};
use crate::gauge::geometry::{value_at_percent, Rect, Size};
use crate::gauge::layout::{optimal_size, LayoutCache, LayoutParams, LayoutState};
use crate::gauge::render::{paint_dynamic, paint_static, GaugeStyle};
use std::time::{Duration, Instant};

/// Static configuration of a gauge
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSettings {
    pub range: GaugeRange,
    /// Unit label shown under the readout
    pub unit: String,
    /// Unit icon, loaded when the gauge is shown
    pub icon_path: Option<String>,
    /// Draw the progress from the end of the scale
    pub inverted: bool,
    pub animation_duration: Duration,
    pub easing: Easing,
    /// Space kept free on every side of the gauge
    pub padding: i32,
    pub horizontal: Alignment,
    pub vertical: Alignment,
}

impl Default for GaugeSettings {
    fn default() -> Self {
        Self {
            range: GaugeRange::default(),
            unit: String::new(),
            icon_path: None,
            inverted: false,
            animation_duration: DEFAULT_DURATION,
            easing: Easing::default(),
            padding: 0,
            horizontal: Alignment::Center,
            vertical: Alignment::Center,
        }
    }
}

/// What a call to [`GaugeWidget::render`] painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Static and dynamic passes
    Full,
    /// Dynamic pass only, over a previously painted background
    Partial,
    /// A drawing primitive failed; the frame was abandoned and logged
    Faulted,
}

/// Animated radial gauge
#[derive(Debug)]
pub struct GaugeWidget {
    settings: GaugeSettings,
    style: GaugeStyle,
    /// Value the gauge settles on
    value: i32,
    /// Value currently on screen
    displayed: i32,
    animation: AnimationDriver,
    layout: LayoutState,
    generation: u64,
    /// Static pass done for the current layout
    static_painted: bool,
    /// Widest readout drawn over the current static layer
    readout_width: i32,
    size: Size,
    icon: Option<Icon>,
}

impl GaugeWidget {
    pub fn new(settings: GaugeSettings, style: GaugeStyle) -> Self {
        let value = settings.range.min();
        let animation = AnimationDriver::new(settings.animation_duration, settings.easing);
        Self {
            settings,
            style,
            value,
            displayed: value,
            animation,
            layout: LayoutState::Absent,
            generation: 0,
            static_painted: false,
            readout_width: 0,
            size: Size::default(),
            icon: None,
        }
    }

    pub fn settings(&self) -> &GaugeSettings {
        &self.settings
    }

    pub fn style(&self) -> &GaugeStyle {
        &self.style
    }

    /// Committed value
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Value drawn by the next render, which lags the committed value while
    /// an animation runs
    pub fn displayed_value(&self) -> i32 {
        self.displayed
    }

    pub fn range(&self) -> GaugeRange {
        self.settings.range
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    pub fn has_icon(&self) -> bool {
        self.icon.is_some()
    }

    /// Cached layout, if one was built since the last invalidation
    pub fn layout(&self) -> Option<&LayoutCache> {
        self.layout.get()
    }

    /// Number of layout builds so far
    pub fn layout_generation(&self) -> u64 {
        self.generation
    }

    /// The next render repaints the static layer
    pub fn needs_full_paint(&self) -> bool {
        !self.layout.is_present() || !self.static_painted
    }

    /// Replace the colors; the next render repaints everything
    pub fn set_style(&mut self, style: GaugeStyle) {
        if self.style != style {
            self.style = style;
            self.static_painted = false;
        }
    }

    /// Change the scale bounds
    ///
    /// Returns `Ok(true)` when the range changed, which invalidates the
    /// layout. The committed value is kept even if it now lies outside the
    /// range.
    pub fn set_range(&mut self, min: i32, max: i32) -> Result<bool, DomainError> {
        let range = GaugeRange::new(min, max)?;
        if range == self.settings.range {
            return Ok(false);
        }
        log::debug!("Gauge range {} -> {}", self.settings.range, range);
        self.settings.range = range;
        self.layout.invalidate();
        Ok(true)
    }

    /// Commit a new value
    ///
    /// Returns whether a redraw is needed. Setting the committed value again
    /// does nothing.
    pub fn set_value(&mut self, value: i32, animate: bool) -> bool {
        self.set_value_at(value, animate, Instant::now())
    }

    /// [`set_value`](Self::set_value) with an explicit clock
    pub fn set_value_at(&mut self, value: i32, animate: bool, now: Instant) -> bool {
        if value == self.value {
            return false;
        }

        if animate {
            self.animation.start(self.value, value, now);
        } else {
            self.animation.cancel();
            self.displayed = value;
        }
        self.value = value;
        true
    }

    /// Commit the value at `percent` of the range
    pub fn set_percent(&mut self, percent: f32, animate: bool) -> bool {
        self.set_percent_at(percent, animate, Instant::now())
    }

    /// [`set_percent`](Self::set_percent) with an explicit clock
    pub fn set_percent_at(&mut self, percent: f32, animate: bool, now: Instant) -> bool {
        let range = self.settings.range;
        let value = value_at_percent(f64::from(percent), range.min(), range.max());
        self.set_value_at(value, animate, now)
    }

    /// Advance a running animation
    ///
    /// Returns whether the displayed value changed and a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.animation.tick(now) {
            Some(frame) => {
                let changed = frame.value != self.displayed;
                self.displayed = frame.value;
                changed || frame.finished
            }
            None => false,
        }
    }

    /// Acquire the unit icon
    pub fn on_shown(&mut self, loader: &dyn IconLoader) {
        let Some(path) = self.settings.icon_path.as_deref().filter(|p| !p.is_empty()) else {
            return;
        };
        match loader.load(path) {
            Ok(icon) => {
                log::debug!("Loaded unit icon {} ({}x{})", path, icon.width(), icon.height());
                self.icon = Some(icon);
                self.static_painted = false;
            }
            Err(e) => log::error!("Failed to load unit icon: {}", e),
        }
    }

    /// Stop any animation and release the unit icon
    ///
    /// The value on screen when the animation stopped becomes the committed
    /// value.
    pub fn on_hidden(&mut self) {
        if let Some(visible) = self.animation.cancel() {
            self.value = visible;
            self.displayed = visible;
        }
        self.icon = None;
        self.layout.invalidate();
    }

    /// Set the size of the area the gauge is drawn in
    pub fn resize(&mut self, size: Size) {
        if size != self.size {
            log::debug!(
                "Gauge resized to {}x{}",
                size.width,
                size.height
            );
            self.size = size;
            self.layout.invalidate();
        }
    }

    /// Size the gauge needs to show every label without clipping, padding
    /// included
    ///
    /// Invalidates the layout.
    pub fn compute_optimal_size<M: TextMeasure + ?Sized>(
        &mut self,
        measure: &M,
        available: Size,
    ) -> Size {
        let content = optimal_size(
            measure,
            &self.settings.range,
            &self.settings.unit,
            self.icon.as_ref().map(Icon::height),
        );
        let padding = self.settings.padding.max(0) * 2;
        let size = Size::new(content.width + padding, content.height + padding);
        if size.width > available.width || size.height > available.height {
            log::debug!(
                "Gauge wants {}x{} but only {}x{} is available",
                size.width,
                size.height,
                available.width,
                available.height
            );
        }
        self.layout.invalidate();
        size
    }

    /// Build the layout for the current size if needed and return it
    ///
    /// Lets headless hosts inspect the geometry without painting.
    pub fn prepare_layout<M: TextMeasure + ?Sized>(&mut self, measure: &M) -> &LayoutCache {
        let params = self.layout_params();
        let generation = self.generation + 1;
        let (layout, fresh) = self
            .layout
            .get_or_build(|| LayoutCache::compute(&params, measure, generation));
        if fresh {
            log::debug!("Gauge layout #{} built for {:?}", generation, params.content);
            self.generation = generation;
            self.static_painted = false;
        }
        layout
    }

    /// Paint one frame
    ///
    /// Runs the static pass when the layout was rebuilt (or never painted)
    /// and the dynamic pass every time. Drawing failures are logged and the
    /// frame is abandoned.
    pub fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> FrameOutcome {
        self.ensure_layout(canvas);

        let full = !self.static_painted;
        let result = if full {
            self.render_static(canvas)
                .and_then(|()| self.render_dynamic(canvas))
        } else {
            self.render_dynamic(canvas)
        };

        match result {
            Ok(()) if full => FrameOutcome::Full,
            Ok(()) => FrameOutcome::Partial,
            Err(e) => {
                log::error!("Gauge frame abandoned: {}", e);
                FrameOutcome::Faulted
            }
        }
    }

    /// Paint the static layer only
    pub fn render_static<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Result<(), RenderError> {
        self.ensure_layout(canvas);
        let Some(layout) = self.layout.get() else {
            return Ok(());
        };
        paint_static(
            canvas,
            layout,
            &self.style,
            Rect::new(0, 0, self.size.width, self.size.height),
            &self.settings.unit,
            self.icon.as_ref(),
        )?;
        self.static_painted = true;
        self.readout_width = 0;
        Ok(())
    }

    /// Paint the dynamic layer only
    pub fn render_dynamic<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Result<(), RenderError> {
        self.ensure_layout(canvas);
        let width = canvas.text_width(FontRole::Value, &self.displayed.to_string());
        self.readout_width = self.readout_width.max(width);
        let Some(layout) = self.layout.get() else {
            return Ok(());
        };
        paint_dynamic(
            canvas,
            layout,
            &self.style,
            &self.settings.range,
            self.displayed,
            self.settings.inverted,
            self.readout_width,
        )
    }

    fn layout_params(&self) -> LayoutParams {
        let padding = self.settings.padding.max(0);
        LayoutParams {
            content: Rect::new(
                padding,
                padding,
                self.size.width - padding * 2,
                self.size.height - padding * 2,
            ),
            horizontal: self.settings.horizontal,
            vertical: self.settings.vertical,
            range: self.settings.range,
            inverted: self.settings.inverted,
        }
    }

    fn ensure_layout<M: TextMeasure + ?Sized>(&mut self, measure: &M) {
        self.prepare_layout(measure);
    }
}
