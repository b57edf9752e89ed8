//! Glue between a value source and a gauge widget
//!
//! Source notifications arrive on the source's thread. The controller only
//! reads the source there and queues the reading; the widget is updated
//! from [`GaugeController::drain`] on the thread that owns it.

use crate::gauge::{GaugeWidget, IconLoader};
use crate::source::{SubscriptionId, ValueSource};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// A reading queued for the UI thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaugeUpdate {
    pub value: i32,
}

/// Feeds a [`GaugeWidget`] from a [`ValueSource`]
pub struct GaugeController<S: ValueSource + 'static> {
    source: Arc<S>,
    sender: Sender<GaugeUpdate>,
    receiver: Receiver<GaugeUpdate>,
    subscription: Option<SubscriptionId>,
    range_applied: bool,
}

impl<S: ValueSource + 'static> GaugeController<S> {
    pub fn new(source: Arc<S>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            source,
            sender,
            receiver,
            subscription: None,
            range_applied: false,
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn is_shown(&self) -> bool {
        self.subscription.is_some()
    }

    /// Show the widget and start listening to the source
    pub fn show(&mut self, widget: &mut GaugeWidget, loader: &dyn IconLoader) {
        widget.on_shown(loader);
        if self.subscription.is_some() {
            return;
        }

        let source = Arc::downgrade(&self.source);
        let sender = self.sender.clone();
        let id = self.source.subscribe(Arc::new(move || {
            let Some(source) = source.upgrade() else {
                return;
            };
            match source.value() {
                Ok(value) => {
                    // Fails only once the controller is gone.
                    let _ = sender.send(GaugeUpdate { value });
                }
                Err(e) => log::error!("Value source not available, update skipped: {}", e),
            }
        }));
        log::debug!("Gauge controller subscribed as {}", id);
        self.subscription = Some(id);
    }

    /// Stop listening and hide the widget
    ///
    /// Readings still queued are discarded.
    pub fn hide(&mut self, widget: &mut GaugeWidget) {
        if let Some(id) = self.subscription.take() {
            self.source.unsubscribe(id);
            let dropped = self.receiver.try_iter().count();
            if dropped > 0 {
                log::debug!("Discarded {} queued gauge updates", dropped);
            }
        }
        widget.on_hidden();
    }

    /// Apply queued readings to the widget
    ///
    /// The first reading also applies the source's range. Returns whether
    /// the widget needs a redraw.
    pub fn drain(&mut self, widget: &mut GaugeWidget) -> bool {
        let mut redraw = false;
        while let Ok(update) = self.receiver.try_recv() {
            if !self.range_applied {
                redraw |= self.apply_range(widget);
            }
            redraw |= widget.set_value(update.value, true);
        }
        redraw
    }

    fn apply_range(&mut self, widget: &mut GaugeWidget) -> bool {
        let bounds = self
            .source
            .min_value()
            .and_then(|min| self.source.max_value().map(|max| (min, max)));
        let (min, max) = match bounds {
            Ok(bounds) => bounds,
            Err(e) => {
                log::error!("Value source range not available: {}", e);
                return false;
            }
        };

        match widget.set_range(min, max) {
            Ok(changed) => {
                log::info!("Gauge range set from source: {}..={}", min, max);
                self.range_applied = true;
                changed
            }
            Err(e) => {
                log::error!("Value source reported an unusable range: {}", e);
                self.range_applied = true;
                false
            }
        }
    }
}

impl<S: ValueSource + 'static> Drop for GaugeController<S> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.source.unsubscribe(id);
        }
    }
}
