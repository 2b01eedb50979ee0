mod client;
mod response;

pub use client::MeasureServiceClient;
pub use response::{CalibrateResponse, MeasureResponse};
