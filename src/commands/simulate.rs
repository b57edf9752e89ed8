//! Simulate command implementation
//!
//! Runs the simulated power meter through a controller into a headless gauge
//! and prints every reading the gauge commits.

use crate::cli::args::{OutputFormat, SimulateArgs};
use crate::cli::output::{print_output, Message, UpdateEntry};
use crate::config::ConfigBuilder;
use crate::controller::GaugeController;
use crate::error::Result;
use crate::gauge::{GaugeWidget, NoIcons};
use crate::source::SimulatedPowerSource;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Execute the simulate command
pub fn run_simulate(args: &SimulateArgs, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
    let config = ConfigBuilder::new()
        .with_file(config_path)?
        .with_source_interval_ms(args.interval_ms)
        .build()?;

    let mut settings = config.gauge.to_settings()?;
    // Nothing to show an icon on.
    settings.icon_path = None;
    let mut widget = GaugeWidget::new(settings, config.style.to_style());

    let source = Arc::new(SimulatedPowerSource::new(config.source.to_settings()?));
    let mut controller = GaugeController::new(Arc::clone(&source));
    let frame_interval =
        Duration::from_millis(config.general.frame_interval_ms).max(Duration::from_millis(1));

    controller.show(&mut widget, &NoIcons);
    source.start()?;
    log::info!(
        "Waiting for {} readings every {:?}",
        args.updates,
        source.interval()
    );

    let mut received = 0;
    let mut frames = 0;
    let mut last_value = widget.value();
    while received < args.updates {
        std::thread::sleep(frame_interval);
        controller.drain(&mut widget);

        if widget.value() != last_value {
            received += 1;
            last_value = widget.value();
            print_output(
                &UpdateEntry {
                    update: received,
                    value: last_value,
                    range: widget.range().to_string(),
                    frames,
                },
                format,
            )?;
            frames = 0;
        }

        if widget.tick(Instant::now()) {
            frames += 1;
        }
    }

    controller.hide(&mut widget);
    source.stop();

    print_output(
        &Message {
            message: format!("Received {} readings", received),
            success: true,
        },
        format,
    )?;
    Ok(())
}
