use thiserror::Error;

use crate::measure::MeasurementMode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Operation error: {0}")]
    Operation(#[from] OperationError),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a triggered operation failed. Every variant is terminal for the
/// operation that raised it: nothing is retried, and the guard latch is
/// released before the failure is surfaced.
#[derive(Error, Debug)]
pub enum OperationError {
    /// A precondition failed before any request was dispatched.
    #[error("{0}")]
    Validation(String),

    /// The service answered and explicitly reported failure.
    #[error("service reported failure: {0}")]
    Service(String),

    /// The exchange itself failed: connection error, non-2xx status,
    /// timeout, or an unreadable response body.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service reported success but the payload cannot be rendered
    /// under the requested mode.
    #[error("render failure: {0}")]
    Render(#[from] RenderError),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("payload does not match mode '{mode}': {detail}")]
    ShapeMismatch {
        mode: MeasurementMode,
        detail: String,
    },

    #[error("result shaped for mode '{found}' cannot be rendered as '{requested}'")]
    ModeMismatch {
        requested: MeasurementMode,
        found: MeasurementMode,
    },
}

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("video source has not produced a frame yet")]
    NoFrame,

    #[error("failed to decode source frame: {0}")]
    Decode(String),

    #[error("failed to encode still image: {0}")]
    Encode(String),
}

/// Capture faults are precondition failures from the workflow's point of
/// view: the source was not ready, so no request was dispatched.
impl From<CaptureError> for OperationError {
    fn from(error: CaptureError) -> Self {
        match error {
            CaptureError::NoFrame => OperationError::Validation("Video feed is not ready".into()),
            other => OperationError::Validation(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

// Helper functions for creating errors
impl AppError {
    pub fn feed(msg: impl Into<String>) -> Self {
        AppError::Feed(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }
}

impl OperationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        OperationError::Validation(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        OperationError::Service(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        OperationError::Transport(msg.into())
    }
}

impl RenderError {
    pub fn shape_mismatch(mode: MeasurementMode, detail: impl Into<String>) -> Self {
        RenderError::ShapeMismatch {
            mode,
            detail: detail.into(),
        }
    }
}
