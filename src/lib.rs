//! A library for driving a camera-based object measurement service.
//!
//! This library provides functionality for:
//! - Reading frames from the service's MJPEG video feed
//! - Capturing feed frames as encoded stills
//! - Submitting measurements and calibrations over HTTP
//! - Rendering mode-tagged measurement results for display
//! - Running the trigger-to-result workflow with per-kind latching

pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod guard;
pub mod logging;
pub mod measure;
pub mod render;
pub mod service;
pub mod workflow;

pub use capture::FrameCapturer;
pub use config::Config;
pub use error::{AppError, OperationError, RenderError, Result};
pub use feed::{MjpegFeed, VideoSource};
pub use guard::{OperationGuard, OperationKind};
pub use measure::{MeasurementMode, MeasurementResult};
pub use service::MeasureServiceClient;
pub use workflow::{ConsoleSurface, WorkflowController, WorkflowSurface};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
///
/// This function should be called before using any other functionality
/// from the library. It sets up logging and performs any necessary
/// global initialization.
///
/// # Arguments
///
/// * `debug` - Whether to enable debug logging
/// * `log_file` - Optional path to a log file. If None, logs will only be output to stdout.
///
/// # Returns
///
/// A `Result` indicating success or failure of initialization.
pub fn initialize(debug: bool, log_file: Option<&str>) -> anyhow::Result<()> {
    logging::setup_logging(debug as u8, log_file)?;
    logging::log_app_start(VERSION);
    Ok(())
}

/// A convenience function to connect the video feed with the given configuration
///
/// # Arguments
///
/// * `config` - The configuration for the feed
///
/// # Returns
///
/// A `Result` containing the running `MjpegFeed` if successful, or an error if not.
pub fn connect_feed(config: &config::FeedConfig) -> Result<MjpegFeed> {
    MjpegFeed::connect(config).map_err(|e| AppError::feed(e.to_string()))
}
