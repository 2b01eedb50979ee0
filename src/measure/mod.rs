mod mode;
mod result;

pub use mode::MeasurementMode;
pub use result::{MeasurementResult, ObjectDimensions};
