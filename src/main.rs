use measure_station::{
    capture::FrameCapturer,
    cli::CliArgs,
    config::Config,
    connect_feed, logging,
    measure::MeasurementMode,
    service::MeasureServiceClient,
    workflow::{ConsoleSurface, WorkflowController},
};

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use std::io::{self, BufRead};

fn main() -> Result<()> {
    // Parse command-line arguments
    let cli_args = CliArgs::parse();

    // Setup logging
    logging::setup_logging(cli_args.debug as u8, None)?;
    logging::log_app_start(env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load(&cli_args)?;
    logging::log_app_config(&config);

    // Connect to the video feed
    let feed = connect_feed(&config.feed)?;
    if !feed.wait_for_frame(config.feed.first_frame_timeout()) {
        warn!("Video feed has not produced a frame yet; captures will fail until it does");
    }

    // Build the workflow controller
    let client = MeasureServiceClient::new(&config.service.base_url, config.service.timeout())?;
    let capturer = FrameCapturer::new(config.capture.jpeg_quality);
    let controller = WorkflowController::new(
        feed,
        capturer,
        client,
        ConsoleSurface::new(),
        cli_args.initial_mode(),
    );
    controller.select_mode(cli_args.initial_mode());

    // Main loop
    info!("Entering command loop");
    print_usage();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        match parts.next() {
            None => {}
            Some("mode") => match parts.next() {
                Some(tag) => match tag.parse::<MeasurementMode>() {
                    Ok(mode) => controller.select_mode(mode),
                    Err(err) => warn!("{}", err),
                },
                None => warn!("Usage: mode <single|multiple|area|volume|angle>"),
            },
            Some("measure") => controller.trigger_measure(),
            Some("calibrate") => {
                let reference_size = parts.collect::<Vec<_>>().join(" ");
                controller.trigger_calibrate(&reference_size);
            }
            Some("quit") | Some("exit") => break,
            Some(other) => warn!("Unknown command: {}", other),
        }
    }

    info!("Command loop ended, application shutting down");

    Ok(())
}

fn print_usage() {
    info!("Commands:");
    info!("  mode <single|multiple|area|volume|angle>  select the measurement mode");
    info!("  measure                                   capture and measure the current frame");
    info!("  calibrate <reference_size_cm>             capture and calibrate against a reference");
    info!("  quit                                      exit");
}
