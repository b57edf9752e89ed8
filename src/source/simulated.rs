//! Simulated power meter
//!
//! Produces a uniformly random wattage on a fixed interval from a background
//! thread and notifies its subscribers after each reading.

use crate::domain::GaugeRange;
use crate::error::SourceError;
use crate::source::{Listener, ListenerSet, SubscriptionId, ValueSource};
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default simulated range in watts
pub const DEFAULT_MIN_POWER: i32 = 0;
pub const DEFAULT_MAX_POWER: i32 = 2000;

/// Default time between two readings
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(4000);

/// Parameters of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSettings {
    pub range: GaugeRange,
    pub interval: Duration,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            range: GaugeRange::new(DEFAULT_MIN_POWER, DEFAULT_MAX_POWER)
                .unwrap_or_default(),
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

#[derive(Debug)]
struct Shared {
    range: GaugeRange,
    power: AtomicI32,
    stopped: AtomicBool,
    listeners: Mutex<ListenerSet>,
}

impl Shared {
    fn listeners(&self) -> MutexGuard<'_, ListenerSet> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update_power(&self) -> i32 {
        let power = rand::rng().random_range(self.range.min()..=self.range.max());
        self.power.store(power, Ordering::SeqCst);
        log::info!("Generated power: {} W", power);
        power
    }

    fn notify(&self) {
        // Listeners may subscribe or unsubscribe from inside the callback.
        let listeners = self.listeners().snapshot();
        for listener in listeners {
            listener();
        }
    }
}

#[derive(Debug)]
struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Random power readings on a timer thread
#[derive(Debug)]
pub struct SimulatedPowerSource {
    shared: Arc<Shared>,
    interval: Duration,
    worker: Mutex<Option<Worker>>,
}

impl SimulatedPowerSource {
    pub fn new(settings: SimulationSettings) -> Self {
        Self {
            shared: Arc::new(Shared {
                range: settings.range,
                power: AtomicI32::new(settings.range.min()),
                stopped: AtomicBool::new(false),
                listeners: Mutex::new(ListenerSet::new()),
            }),
            interval: settings.interval,
            worker: Mutex::new(None),
        }
    }

    pub fn range(&self) -> GaugeRange {
        self.shared.range
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.worker().is_some()
    }

    /// Generate one reading now and notify subscribers
    pub fn generate(&self) -> i32 {
        let power = self.shared.update_power();
        self.shared.notify();
        power
    }

    /// Start the timer thread
    ///
    /// The first reading is produced immediately. Starting a running source
    /// does nothing.
    pub fn start(&self) -> Result<(), SourceError> {
        let mut worker = self.worker();
        if worker.is_some() {
            return Ok(());
        }

        let (stop, stop_rx) = mpsc::channel::<()>();
        let shared = Arc::clone(&self.shared);
        let interval = self.interval;
        shared.stopped.store(false, Ordering::SeqCst);

        let handle = thread::Builder::new()
            .name("power-source".to_string())
            .spawn(move || loop {
                shared.update_power();
                shared.notify();
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(|e| SourceError::Unavailable(format!("cannot spawn timer thread: {}", e)))?;

        log::info!("Power source started (every {:?})", interval);
        *worker = Some(Worker { stop, handle });
        Ok(())
    }

    /// Stop the timer thread and wait for it to exit
    ///
    /// Readings fail with [`SourceError::Stopped`] until the next `start`.
    pub fn stop(&self) {
        let Some(worker) = self.worker().take() else {
            return;
        };
        self.shared.stopped.store(true, Ordering::SeqCst);
        // A send error only means the thread already exited.
        let _ = worker.stop.send(());
        if worker.handle.join().is_err() {
            log::error!("Power source thread panicked");
        }
        log::info!("Power source stopped");
    }

    fn worker(&self) -> MutexGuard<'_, Option<Worker>> {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatedPowerSource {
    fn default() -> Self {
        Self::new(SimulationSettings::default())
    }
}

impl Drop for SimulatedPowerSource {
    fn drop(&mut self) {
        self.stop();
    }
}

impl ValueSource for SimulatedPowerSource {
    fn value(&self) -> Result<i32, SourceError> {
        if self.shared.stopped.load(Ordering::SeqCst) {
            return Err(SourceError::Stopped);
        }
        Ok(self.shared.power.load(Ordering::SeqCst))
    }

    fn min_value(&self) -> Result<i32, SourceError> {
        Ok(self.shared.range.min())
    }

    fn max_value(&self) -> Result<i32, SourceError> {
        Ok(self.shared.range.max())
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = self.shared.listeners().insert(listener);
        log::debug!("Power source subscriber {} added", id);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if self.shared.listeners().remove(id) {
            log::debug!("Power source subscriber {} removed", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;

    fn source(interval_ms: u64) -> SimulatedPowerSource {
        SimulatedPowerSource::new(SimulationSettings {
            range: GaugeRange::new(100, 200).unwrap(),
            interval: Duration::from_millis(interval_ms),
        })
    }

    #[test]
    fn test_default_settings() {
        let settings = SimulationSettings::default();
        assert_eq!(settings.range, GaugeRange::new(0, 2000).unwrap());
        assert_eq!(settings.interval, Duration::from_millis(4000));
    }

    #[test]
    fn test_bounds() {
        let source = source(1000);
        assert_eq!(source.min_value(), Ok(100));
        assert_eq!(source.max_value(), Ok(200));
        assert_eq!(source.value(), Ok(100));
    }

    #[test]
    fn test_generate_stays_in_range_and_notifies() {
        let source = source(1000);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        source.subscribe(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        for _ in 0..50 {
            let power = source.generate();
            assert!((100..=200).contains(&power));
            assert_eq!(source.value(), Ok(power));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 50);
    }

    #[test]
    fn test_unsubscribed_listener_not_called() {
        let source = source(1000);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let id = source.subscribe(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        source.unsubscribe(id);
        source.generate();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_timer_thread_lifecycle() {
        let source = source(10);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        source.subscribe(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        source.start().unwrap();
        assert!(source.is_running());

        let deadline = Instant::now() + Duration::from_secs(5);
        while calls.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(calls.load(Ordering::SeqCst) >= 3);

        source.stop();
        assert!(!source.is_running());
        assert_eq!(source.value(), Err(SourceError::Stopped));

        let after_stop = calls.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(calls.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let source = source(10);
        source.stop();
        assert_eq!(source.value(), Ok(100));
    }
}
