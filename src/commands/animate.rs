//! Animate command implementation
//!
//! Samples a value transition at a fixed step and prints every frame.

use crate::cli::args::{AnimateArgs, OutputFormat};
use crate::cli::output::{print_output, AnimationReport, FrameEntry};
use crate::config::ConfigBuilder;
use crate::error::Result;
use crate::gauge::{AnimationDriver, Easing};
use std::time::{Duration, Instant};

/// Execute the animate command
pub fn run_animate(args: &AnimateArgs, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
    let config = ConfigBuilder::new()
        .with_file(config_path)?
        .with_animation_ms(args.duration_ms)
        .build()?;

    let easing = args.easing.map(Easing::from).unwrap_or(config.gauge.easing);
    let duration = Duration::from_millis(config.gauge.animation_ms);

    let report = sample_transition(args.from, args.to, duration, easing, args.step_ms);
    print_output(&report, format)?;
    Ok(())
}

/// Run a transition to completion on a synthetic clock
pub fn sample_transition(
    from: i32,
    to: i32,
    duration: Duration,
    easing: Easing,
    step_ms: u64,
) -> AnimationReport {
    let step = step_ms.max(1);
    let mut driver = AnimationDriver::new(duration, easing);
    let t0 = Instant::now();
    driver.start(from, to, t0);

    let mut frames = Vec::new();
    let mut elapsed_ms = 0;
    while let Some(frame) = driver.tick(t0 + Duration::from_millis(elapsed_ms)) {
        frames.push(FrameEntry {
            elapsed_ms,
            value: frame.value,
            finished: frame.finished,
        });
        if frame.finished {
            break;
        }
        elapsed_ms += step;
    }

    AnimationReport {
        from,
        to,
        duration_ms: duration.as_millis() as u64,
        easing: easing.to_string(),
        frames,
    }
}
