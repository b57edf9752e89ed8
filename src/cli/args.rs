//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::gauge::Easing;

/// Radial power gauge toolkit
///
/// Inspect gauge layouts, preview value animations and run the simulated
/// power meter without a display.
#[derive(Parser, Debug)]
#[command(name = "wattgauge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "WATTGAUGE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the gauge layout for a surface size
    Layout(LayoutArgs),

    /// Print the frames of a value transition
    Animate(AnimateArgs),

    /// Feed a headless gauge from the simulated power meter
    Simulate(SimulateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the layout command
#[derive(Parser, Debug)]
pub struct LayoutArgs {
    /// Surface width in pixels
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..))]
    pub width: i32,

    /// Surface height in pixels
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..))]
    pub height: i32,

    /// Override the lower bound of the scale
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<i32>,

    /// Override the upper bound of the scale
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i32>,

    /// Draw the progress from the end of the scale
    #[arg(long)]
    pub inverted: bool,

    /// Also list every tick
    #[arg(long)]
    pub ticks: bool,
}

/// Arguments for the animate command
#[derive(Parser, Debug)]
pub struct AnimateArgs {
    /// Value the transition starts from
    #[arg(long, allow_negative_numbers = true)]
    pub from: i32,

    /// Value the transition ends at
    #[arg(long, allow_negative_numbers = true)]
    pub to: i32,

    /// Time between two sampled frames in milliseconds
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub step_ms: u64,

    /// Override the transition duration in milliseconds
    #[arg(long)]
    pub duration_ms: Option<u64>,

    /// Override the easing curve
    #[arg(long, value_enum)]
    pub easing: Option<EasingArg>,
}

/// Arguments for the simulate command
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Number of readings to wait for
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub updates: u32,

    /// Override the refresh interval of the simulated meter in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

/// Easing argument
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum EasingArg {
    /// Constant speed
    Linear,
    /// Quadratic ease-in/ease-out
    QuadInOut,
}

impl From<EasingArg> for Easing {
    fn from(arg: EasingArg) -> Self {
        match arg {
            EasingArg::Linear => Easing::Linear,
            EasingArg::QuadInOut => Easing::QuadInOut,
        }
    }
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_layout() {
        let args =
            Cli::try_parse_from(["wattgauge", "layout", "--width", "320", "--height", "240"])
                .unwrap();
        if let Commands::Layout(layout) = args.command {
            assert_eq!(layout.width, 320);
            assert_eq!(layout.height, 240);
            assert_eq!(layout.max, None);
        } else {
            panic!("Expected Layout command");
        }
    }

    #[test]
    fn test_cli_parse_verbose() {
        let args = Cli::try_parse_from(["wattgauge", "-v", "simulate"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_layout_rejects_zero_width() {
        let result = Cli::try_parse_from(["wattgauge", "layout", "--width", "0", "--height", "10"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_animate_negative() {
        let args = Cli::try_parse_from([
            "wattgauge",
            "animate",
            "--from",
            "-20",
            "--to",
            "40",
            "--easing",
            "linear",
        ])
        .unwrap();
        if let Commands::Animate(anim) = args.command {
            assert_eq!(anim.from, -20);
            assert_eq!(anim.to, 40);
            assert_eq!(anim.step_ms, 100);
            assert!(matches!(anim.easing, Some(EasingArg::Linear)));
        } else {
            panic!("Expected Animate command");
        }
    }

    #[test]
    fn test_cli_parse_simulate_defaults() {
        let args = Cli::try_parse_from(["wattgauge", "--format", "json", "simulate"]).unwrap();
        assert!(matches!(args.format, OutputFormat::Json));
        if let Commands::Simulate(sim) = args.command {
            assert_eq!(sim.updates, 5);
            assert_eq!(sim.interval_ms, None);
        } else {
            panic!("Expected Simulate command");
        }
    }

    #[test]
    fn test_cli_parse_config_path() {
        let args =
            Cli::try_parse_from(["wattgauge", "--config", "/tmp/g.toml", "completions", "bash"])
                .unwrap();
        assert_eq!(args.config.as_deref(), Some("/tmp/g.toml"));
    }
}
