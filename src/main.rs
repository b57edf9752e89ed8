//! wattgauge - radial power gauge toolkit
//!
//! A command-line tool for inspecting gauge layouts, previewing value
//! animations and running the simulated power meter headless.

use clap::Parser;
use wattgauge::cli::args::{generate_completions, Cli, Commands};
use wattgauge::commands::{run_animate, run_layout, run_simulate};
use wattgauge::error::{AppError, ConfigError};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Layout(args) => run_layout(args, cli.format, config),

        Commands::Animate(args) => run_animate(args, cli.format, config),

        Commands::Simulate(args) => run_simulate(args, cli.format, config),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Check the --config path or the WATTGAUGE_CONFIG variable.");
        }
        AppError::Config(ConfigError::InvalidValue { .. }) | AppError::Domain(_) => {
            eprintln!();
            eprintln!("Hint: The scale needs max > min, e.g. [gauge] min = 0, max = 1111.");
        }
        _ => {}
    }
}
