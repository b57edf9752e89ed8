//! Value animation driver
//!
//! Two-state machine (`Idle` / `Running`) that turns a value change into an
//! eased sequence of intermediate values, sampled once per display tick.
//!
//! Values are scaled by [`ANIMATION_FACTOR`] while animating so interpolation
//! stays integer-based with sub-unit precision.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Scale applied to values while they are interpolated
pub const ANIMATION_FACTOR: i32 = 10;

const SCALE: i64 = ANIMATION_FACTOR as i64;

/// Scaled representation of a value; `i64` so every `i32` survives scaling
fn scale(value: i32) -> i64 {
    i64::from(value) * SCALE
}

fn descale(scaled: i64) -> i32 {
    let value = scaled / SCALE;
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Default duration of a value transition
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

/// Time-to-progress mapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Quadratic ease-in/ease-out: decelerates at both ends
    #[default]
    QuadInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` to eased progress in `[0, 1]`
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::QuadInOut => write!(f, "quad_in_out"),
        }
    }
}

/// Eased transition between two scaled values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub start: i64,
    pub stop: i64,
    pub duration: Duration,
    pub easing: Easing,
}

impl Motion {
    /// Scaled value after `elapsed`, and whether the motion is complete
    pub fn sample(&self, elapsed: Duration) -> (i64, bool) {
        if elapsed >= self.duration {
            return (self.stop, true);
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let delta = (self.stop - self.start) as f64 * f64::from(self.easing.apply(t));
        (self.start + delta.round() as i64, false)
    }
}

/// One sample handed to the consumer on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFrame {
    /// Descaled value to display
    pub value: i32,
    /// The animation completed with this frame
    pub finished: bool,
}

/// A transition in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningAnimation {
    pub motion: Motion,
    pub started_at: Instant,
    /// Last scaled value handed out by `tick`
    pub last_emitted: Option<i64>,
}

impl RunningAnimation {
    /// Scaled value currently on screen
    pub fn current(&self) -> i64 {
        self.last_emitted.unwrap_or(self.motion.start)
    }
}

/// State of the driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationState {
    #[default]
    Idle,
    Running(RunningAnimation),
}

/// Drives value transitions from host ticks
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    state: AnimationState,
    duration: Duration,
    easing: Easing,
}

impl AnimationDriver {
    /// Create an idle driver
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            state: AnimationState::Idle,
            duration,
            easing,
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimationState::Running(_))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Descaled value currently on screen, if running
    pub fn current_value(&self) -> Option<i32> {
        match &self.state {
            AnimationState::Running(running) => Some(descale(running.current())),
            AnimationState::Idle => None,
        }
    }

    /// Start a transition from `from` to `to` (descaled values)
    ///
    /// A transition already in flight is superseded and the new one starts
    /// from its last emitted value, so the visible value never jumps.
    pub fn start(&mut self, from: i32, to: i32, now: Instant) {
        let start = match &self.state {
            AnimationState::Running(running) => running.current(),
            AnimationState::Idle => scale(from),
        };
        let motion = Motion {
            start,
            stop: scale(to),
            duration: self.duration,
            easing: self.easing,
        };
        log::debug!(
            "Animation start: {} -> {} over {:?}",
            start,
            motion.stop,
            self.duration
        );
        self.state = AnimationState::Running(RunningAnimation {
            motion,
            started_at: now,
            last_emitted: None,
        });
    }

    /// Sample the running transition at `now`
    ///
    /// Returns `None` when idle. The frame that reports `finished` also
    /// returns the driver to idle.
    pub fn tick(&mut self, now: Instant) -> Option<AnimationFrame> {
        let AnimationState::Running(running) = &mut self.state else {
            return None;
        };

        let elapsed = now.saturating_duration_since(running.started_at);
        let (scaled, finished) = running.motion.sample(elapsed);
        running.last_emitted = Some(scaled);

        if finished {
            self.state = AnimationState::Idle;
        }

        Some(AnimationFrame {
            value: descale(scaled),
            finished,
        })
    }

    /// Stop immediately without emitting a final value
    ///
    /// Returns the descaled value that was on screen, if an animation was
    /// running.
    pub fn cancel(&mut self) -> Option<i32> {
        let current = self.current_value();
        if current.is_some() {
            log::debug!("Animation cancelled at {:?}", current);
        }
        self.state = AnimationState::Idle;
        current
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION, Easing::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_easing_endpoints_and_symmetry() {
        for easing in [Easing::Linear, Easing::QuadInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
        assert!((Easing::QuadInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::QuadInOut.apply(0.25) < 0.25);
        assert!(Easing::QuadInOut.apply(0.75) > 0.75);
    }

    #[test]
    fn test_motion_sample() {
        let motion = Motion {
            start: 0,
            stop: 1000,
            duration: ms(1000),
            easing: Easing::Linear,
        };
        assert_eq!(motion.sample(ms(0)), (0, false));
        assert_eq!(motion.sample(ms(250)), (250, false));
        assert_eq!(motion.sample(ms(1000)), (1000, true));
        assert_eq!(motion.sample(ms(5000)), (1000, true));
    }

    #[test]
    fn test_idle_driver_emits_nothing() {
        let mut driver = AnimationDriver::default();
        assert!(!driver.is_running());
        assert_eq!(driver.tick(Instant::now()), None);
        assert_eq!(driver.cancel(), None);
    }

    #[test]
    fn test_run_to_completion() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new(ms(1000), Easing::QuadInOut);
        driver.start(0, 100, t0);
        assert!(driver.is_running());

        let mut previous = 0;
        for step in 1..10 {
            let frame = driver.tick(t0 + ms(step * 100)).unwrap();
            assert!(!frame.finished);
            assert!(frame.value >= previous);
            previous = frame.value;
        }

        let last = driver.tick(t0 + ms(1000)).unwrap();
        assert_eq!(last, AnimationFrame { value: 100, finished: true });
        assert!(!driver.is_running());
    }

    #[test]
    fn test_run_to_completion_beyond_scaled_i32() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new(ms(1000), Easing::QuadInOut);
        driver.start(0, 300_000_000, t0);

        let mid = driver.tick(t0 + ms(500)).unwrap();
        assert_eq!(mid.value, 150_000_000);

        let last = driver.tick(t0 + ms(2000)).unwrap();
        assert_eq!(
            last,
            AnimationFrame {
                value: 300_000_000,
                finished: true
            }
        );
    }

    #[test]
    fn test_opposite_sign_extremes() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new(ms(1000), Easing::Linear);
        driver.start(i32::MIN, i32::MAX, t0);

        let mut previous = i32::MIN;
        for step in 0..=10 {
            let frame = driver.tick(t0 + ms(step * 100)).unwrap();
            assert!(frame.value >= previous);
            previous = frame.value;
        }
        assert_eq!(previous, i32::MAX);
        assert!(!driver.is_running());

        driver.start(-500_000_000, 300_000_000, t0);
        driver.tick(t0 + ms(500));
        assert_eq!(driver.cancel(), Some(-100_000_000));
    }

    #[test]
    fn test_supersede_starts_from_last_emitted() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new(ms(1000), Easing::Linear);
        driver.start(0, 50, t0);
        let mid = driver.tick(t0 + ms(400)).unwrap();
        assert_eq!(mid.value, 20);

        // Retarget: the committed value (50) is ignored in favour of what is on screen.
        driver.start(50, 80, t0 + ms(400));
        let first = driver.tick(t0 + ms(400)).unwrap();
        assert_eq!(first.value, 20);

        let end = driver.tick(t0 + ms(1400)).unwrap();
        assert_eq!(end, AnimationFrame { value: 80, finished: true });
    }

    #[test]
    fn test_supersede_before_first_tick_keeps_start() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new(ms(1000), Easing::Linear);
        driver.start(10, 50, t0);
        driver.start(50, 80, t0);
        match driver.state() {
            AnimationState::Running(running) => assert_eq!(running.motion.start, 100),
            AnimationState::Idle => panic!("expected a running animation"),
        }
    }

    #[test]
    fn test_cancel_reports_visible_value() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new(ms(1000), Easing::Linear);
        driver.start(0, 100, t0);
        driver.tick(t0 + ms(300));
        assert_eq!(driver.cancel(), Some(30));
        assert!(!driver.is_running());
        assert_eq!(driver.tick(t0 + ms(600)), None);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_tick() {
        let t0 = Instant::now();
        let mut driver = AnimationDriver::new(Duration::ZERO, Easing::QuadInOut);
        driver.start(3, 7, t0);
        assert_eq!(
            driver.tick(t0),
            Some(AnimationFrame { value: 7, finished: true })
        );
    }
}
