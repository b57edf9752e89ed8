//! Layout command implementation
//!
//! Computes the gauge geometry for a surface size without painting.

use crate::cli::args::{LayoutArgs, OutputFormat};
use crate::cli::output::{print_output, LayoutReport};
use crate::config::{Config, ConfigBuilder};
use crate::error::Result;
use crate::gauge::{GaugeWidget, Size};

/// Execute the layout command
pub fn run_layout(args: &LayoutArgs, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
    let config = ConfigBuilder::new()
        .with_file(config_path)?
        .with_range(args.min, args.max)
        .with_inverted(args.inverted.then_some(true))
        .build()?;

    let report = layout_report(args, &config)?;
    print_output(&report, format)?;
    Ok(())
}

fn layout_report(args: &LayoutArgs, config: &Config) -> Result<LayoutReport> {
    let metrics = config.style.fonts;
    let settings = config.gauge.to_settings()?;
    let inverted = settings.inverted;
    let mut widget = GaugeWidget::new(settings, config.style.to_style());

    let surface = Size::new(args.width, args.height);
    let optimal = widget.compute_optimal_size(&metrics, surface);
    widget.resize(surface);

    let range = widget.range().to_string();
    let layout = widget.prepare_layout(&metrics);

    Ok(LayoutReport::from_layout(
        layout, surface, range, inverted, optimal, args.ticks,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(width: i32, height: i32) -> LayoutArgs {
        LayoutArgs {
            width,
            height,
            min: None,
            max: None,
            inverted: false,
            ticks: true,
        }
    }

    #[test]
    fn test_report_for_default_config() {
        let report = layout_report(&args(320, 240), &Config::default()).unwrap();
        assert_eq!(report.rings.len(), 6);
        assert_eq!(report.labels.first().map(String::as_str), Some("0"));
        assert_eq!(report.labels.last().map(String::as_str), Some("1111"));
        assert_eq!(report.ticks.as_ref().map(Vec::len), Some(51));
    }

    #[test]
    fn test_tiny_surface_does_not_fit() {
        let report = layout_report(&args(40, 30), &Config::default()).unwrap();
        assert!(!report.fits);
    }
}
