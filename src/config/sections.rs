use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the MJPEG video feed the frames are captured from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub reopen_delay_ms: u64,
    pub first_frame_timeout_secs: u64,
    pub display_width: Option<u32>,
    pub display_height: Option<u32>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8000/video_feed/".to_string(),
            reopen_delay_ms: 1000,
            first_frame_timeout_secs: 10,
            display_width: None,
            display_height: None,
        }
    }
}

impl FeedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_display(mut self, width: u32, height: u32) -> Self {
        self.display_width = Some(width);
        self.display_height = Some(height);
        self
    }

    /// Size captured frames are scaled to before encoding. `None` keeps
    /// the source resolution.
    pub fn display_dimensions(&self) -> Option<(u32, u32)> {
        self.display_width.zip(self.display_height)
    }

    pub fn first_frame_timeout(&self) -> Duration {
        Duration::from_secs(self.first_frame_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Feed URL cannot be empty".to_string());
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(format!("Feed URL must be an HTTP(S) URL: {}", self.url));
        }
        if self.reopen_delay_ms == 0 {
            return Err("Feed reopen delay must be greater than 0".to_string());
        }
        if self.display_width.is_some() != self.display_height.is_some() {
            return Err("Display width and height must be set together".to_string());
        }
        if matches!(self.display_dimensions(), Some((w, h)) if w == 0 || h == 0) {
            return Err("Display dimensions must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Settings for the measurement service the captures are submitted to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Submission timeout. `None` leaves the exchange unbounded.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Service base URL cannot be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "Service base URL must be an HTTP(S) URL: {}",
                self.base_url
            ));
        }
        if self.timeout_secs == Some(0) {
            return Err("Service timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Settings for turning feed frames into encoded stills.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub jpeg_quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { jpeg_quality: 80 }
    }
}

impl CaptureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err("JPEG quality must be between 1 and 100".to_string());
        }
        Ok(())
    }
}
