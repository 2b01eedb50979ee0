use serde::Deserialize;
use serde_json::Value;

/// Envelope returned by `POST /capture_and_measure/`. On success the
/// payload under `dimensions` is shaped by the requested mode; on failure
/// the service usually (but not always) carries a reason under `error`.
#[derive(Debug, Deserialize)]
pub struct MeasureResponse {
    pub success: bool,
    #[serde(default)]
    pub dimensions: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Envelope returned by `POST /calibrate/`. A successful calibration may
/// report the computed scale; the client logs it but persists nothing.
#[derive(Debug, Deserialize)]
pub struct CalibrateResponse {
    pub success: bool,
    #[serde(default)]
    pub pixels_per_cm: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

fn reason(error: &Option<String>) -> String {
    error
        .clone()
        .unwrap_or_else(|| "unspecified error".to_string())
}

impl MeasureResponse {
    pub fn error_reason(&self) -> String {
        reason(&self.error)
    }
}

impl CalibrateResponse {
    pub fn error_reason(&self) -> String {
        reason(&self.error)
    }
}
