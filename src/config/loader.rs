use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cli::CliArgs;
use crate::config::{CaptureConfig, FeedConfig, ServiceConfig};
use crate::error::AppError;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub service: ServiceConfig,
    pub capture: CaptureConfig,
}

impl Config {
    /// Resolve the effective configuration: the TOML file (explicit path,
    /// or `config/default.toml` when present, or built-in defaults), with
    /// CLI arguments layered on top.
    pub fn load(cli_args: &CliArgs) -> Result<Self> {
        let mut config = match cli_args.config.as_deref() {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => {
                info!("No configuration file given, using built-in defaults");
                Self::default()
            }
        };

        // Override config with CLI arguments
        config.override_with_cli_args(cli_args);

        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        info!("Loading configuration from {}", path);

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        toml::from_str(&config_str).with_context(|| format!("Failed to parse config file: {}", path))
    }

    fn override_with_cli_args(&mut self, args: &CliArgs) {
        if let Some(url) = &args.feed_url {
            self.feed.url = url.clone();
        }
        if let Some(url) = &args.service_url {
            self.service.base_url = url.clone();
        }
        if let Some(quality) = args.jpeg_quality {
            self.capture.jpeg_quality = quality;
        }
        if let Some(secs) = args.timeout {
            self.service.timeout_secs = Some(secs);
        }
    }

    fn validate(&self) -> Result<()> {
        self.feed
            .validate()
            .map_err(|msg| AppError::config(format!("invalid feed section: {}", msg)))?;
        self.service
            .validate()
            .map_err(|msg| AppError::config(format!("invalid service section: {}", msg)))?;
        self.capture
            .validate()
            .map_err(|msg| AppError::config(format!("invalid capture section: {}", msg)))?;
        Ok(())
    }
}
