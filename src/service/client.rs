use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::blocking::Client;

use super::response::{CalibrateResponse, MeasureResponse};
use crate::capture::CapturedFrame;
use crate::error::OperationError;
use crate::measure::{MeasurementMode, MeasurementResult};

/// Blocking client for the two measurement-service endpoints.
///
/// Every call issues exactly one outbound request and never retries.
/// Failures split into service-reported reasons and transport faults;
/// both travel the same error channel.
pub struct MeasureServiceClient {
    http: Client,
    measure_url: String,
    calibrate_url: String,
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}/", base_url.trim_end_matches('/'), path)
}

impl MeasureServiceClient {
    /// `timeout` bounds each exchange when set. The default carries no
    /// deadline, matching the service's current behavior; a configured
    /// timeout surfaces as a transport failure like any other.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            measure_url: endpoint(base_url, "capture_and_measure"),
            calibrate_url: endpoint(base_url, "calibrate"),
        })
    }

    /// Submit a still for measurement under `mode`. Succeeds only when the
    /// service reports success with a payload matching the mode's shape.
    pub fn submit_measurement(
        &self,
        frame: &CapturedFrame,
        mode: MeasurementMode,
    ) -> Result<MeasurementResult, OperationError> {
        debug!(
            "submitting {} measurement ({} byte still)",
            mode,
            frame.jpeg.len()
        );

        let data_url = frame.to_data_url();
        let response = self
            .http
            .post(&self.measure_url)
            .form(&[("image", data_url.as_str()), ("mode", mode.as_str())])
            .send()
            .map_err(|e| OperationError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OperationError::transport(format!(
                "service answered with status {}",
                status
            )));
        }

        let envelope: MeasureResponse = response
            .json()
            .map_err(|e| OperationError::transport(format!("unreadable response body: {}", e)))?;

        if !envelope.success {
            return Err(OperationError::service(envelope.error_reason()));
        }

        let payload = envelope.dimensions.ok_or_else(|| {
            OperationError::transport("service reported success without a payload")
        })?;

        let result = MeasurementResult::from_value(mode, payload)?;
        info!("measurement succeeded for mode {}", mode);
        Ok(result)
    }

    /// Submit a still plus the operator-entered reference size. The
    /// reference size travels as typed; the service parses it.
    pub fn submit_calibration(
        &self,
        frame: &CapturedFrame,
        reference_size: &str,
    ) -> Result<(), OperationError> {
        debug!("submitting calibration, reference size {}", reference_size);

        let data_url = frame.to_data_url();
        let response = self
            .http
            .post(&self.calibrate_url)
            .form(&[
                ("image", data_url.as_str()),
                ("reference_size", reference_size),
            ])
            .send()
            .map_err(|e| OperationError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OperationError::transport(format!(
                "service answered with status {}",
                status
            )));
        }

        let envelope: CalibrateResponse = response
            .json()
            .map_err(|e| OperationError::transport(format!("unreadable response body: {}", e)))?;

        if !envelope.success {
            return Err(OperationError::service(envelope.error_reason()));
        }

        match envelope.pixels_per_cm {
            Some(pixels_per_cm) => info!("calibration accepted at {} pixels per cm", pixels_per_cm),
            None => info!("calibration accepted"),
        }
        Ok(())
    }
}
