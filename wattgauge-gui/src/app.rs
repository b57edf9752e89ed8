//! Main application structure
//!
//! Implements the Elm Architecture (TEA) pattern for the desktop gauge.

use crate::error::GuiError;
use crate::message::Message;
use crate::theme::{colors, gauge_theme};
use crate::widgets::{GaugeCanvas, SvgIconLoader};

use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::widget::{canvas, container, text};
use iced::{Element, Length, Subscription, Task, Theme};
use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;
use wattgauge::config::Config;
use wattgauge::controller::GaugeController;
use wattgauge::gauge::{GaugeWidget, MonospaceMetrics};
use wattgauge::source::SimulatedPowerSource;

/// Poll interval for queued readings while nothing animates
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Main application
pub struct GaugeApp {
    /// Widget state, borrowed mutably by the canvas while drawing
    gauge: RefCell<GaugeWidget>,

    /// Static layer of the gauge
    cache: canvas::Cache,

    controller: GaugeController<SimulatedPowerSource>,
    metrics: MonospaceMetrics,
    frame_interval: Duration,
    visible: bool,
}

impl GaugeApp {
    /// Build the widget, start the simulated meter and subscribe to it
    pub fn from_config(config: &Config) -> Result<Self, GuiError> {
        let mut gauge = GaugeWidget::new(config.gauge.to_settings()?, config.style.to_style());
        let source = Arc::new(SimulatedPowerSource::new(config.source.to_settings()?));
        let mut controller = GaugeController::new(Arc::clone(&source));

        // Subscribe first so the immediate reading on start is not missed.
        controller.show(&mut gauge, &SvgIconLoader::default());
        source.start()?;

        log::info!(
            "Gauge ready: range {}, source {} every {:?}",
            gauge.range(),
            source.range(),
            source.interval()
        );

        Ok(Self {
            gauge: RefCell::new(gauge),
            cache: canvas::Cache::new(),
            controller,
            metrics: config.style.fonts,
            frame_interval: Duration::from_millis(config.general.frame_interval_ms)
                .max(Duration::from_millis(1)),
            visible: true,
        })
    }

    /// Handle messages
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Frame(now) => {
                if !self.visible {
                    return Task::none();
                }
                let gauge = self.gauge.get_mut();
                let mut changed = self.controller.drain(gauge);
                changed |= gauge.tick(now);
                if gauge.needs_full_paint() {
                    self.cache.clear();
                }
                if changed {
                    log::trace!("Gauge showing {}", gauge.displayed_value());
                }
            }
            Message::ToggleVisible => {
                let gauge = self.gauge.get_mut();
                if self.visible {
                    self.controller.hide(gauge);
                    log::info!("Gauge hidden");
                } else {
                    self.controller.show(gauge, &SvgIconLoader::default());
                    log::info!("Gauge shown");
                }
                self.visible = !self.visible;
                self.cache.clear();
            }
        }
        Task::none()
    }

    /// Render the view
    pub fn view(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = if self.visible {
            canvas(GaugeCanvas::new(&self.gauge, &self.cache, self.metrics))
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        } else {
            text("Paused (space to resume)")
                .color(colors::rgb(self.gauge.borrow().style().unit_label))
                .into()
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Get theme
    pub fn theme(&self) -> Theme {
        gauge_theme(self.gauge.borrow().style())
    }

    /// Get title
    pub fn title(&self) -> String {
        String::from("wattgauge")
    }

    /// Set up subscriptions
    pub fn subscription(&self) -> Subscription<Message> {
        let interval = if self.visible && self.gauge.borrow().is_animating() {
            self.frame_interval
        } else {
            IDLE_INTERVAL.max(self.frame_interval)
        };

        Subscription::batch([
            iced::time::every(interval).map(Message::Frame),
            keyboard::on_key_press(handle_key),
        ])
    }
}

fn handle_key(key: Key, _modifiers: Modifiers) -> Option<Message> {
    match key {
        Key::Named(Named::Space) => Some(Message::ToggleVisible),
        _ => None,
    }
}
