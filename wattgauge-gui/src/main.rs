//! wattgauge-gui - Desktop power gauge
//!
//! Shows the simulated power meter on an animated radial gauge, built with
//! Iced.

mod app;
mod error;
mod message;
mod theme;
mod widgets;

use app::GaugeApp;
use clap::Parser;
use iced::{window, Size, Task};
use std::process;
use wattgauge::config::ConfigBuilder;

/// wattgauge-gui - Radial power gauge
#[derive(Parser, Debug)]
#[command(name = "wattgauge-gui", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "WATTGAUGE_CONFIG")]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> iced::Result {
    // Initialize logging with wgpu noise filtered out
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("wgpu_core", log::LevelFilter::Error)
        .init();

    let args = Args::parse();
    if args.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let config = match ConfigBuilder::new()
        .with_file(args.config.as_deref())
        .and_then(|builder| builder.with_verbose(Some(args.verbose)).build())
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let app = match GaugeApp::from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    log::info!("Starting wattgauge-gui");

    iced::application(GaugeApp::title, GaugeApp::update, GaugeApp::view)
        .subscription(GaugeApp::subscription)
        .theme(GaugeApp::theme)
        .window(window::Settings {
            size: Size::new(320.0, 240.0),
            min_size: Some(Size::new(160.0, 120.0)),
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || (app, Task::none()))
}
