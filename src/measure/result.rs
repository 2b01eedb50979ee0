use serde::Deserialize;
use serde_json::Value;

use super::mode::MeasurementMode;
use crate::error::RenderError;

/// Width/height pair for one detected object, in centimeters as supplied
/// by the service. The client performs no unit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ObjectDimensions {
    pub width: f64,
    pub height: f64,
}

/// Typed measurement payload, keyed by the mode that was requested.
/// `Multiple` keeps the server's detection order; it is never re-sorted
/// or deduplicated client-side.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasurementResult {
    Single { width: f64, height: f64 },
    Multiple(Vec<ObjectDimensions>),
    Area { area: f64 },
    Volume { volume: f64, height: f64 },
    Angle { angle: f64 },
}

#[derive(Deserialize)]
struct AreaShape {
    area: f64,
}

#[derive(Deserialize)]
struct VolumeShape {
    volume: f64,
    height: f64,
}

#[derive(Deserialize)]
struct AngleShape {
    angle: f64,
}

impl MeasurementResult {
    /// The mode this payload is shaped for.
    pub fn mode(&self) -> MeasurementMode {
        match self {
            MeasurementResult::Single { .. } => MeasurementMode::Single,
            MeasurementResult::Multiple(_) => MeasurementMode::Multiple,
            MeasurementResult::Area { .. } => MeasurementMode::Area,
            MeasurementResult::Volume { .. } => MeasurementMode::Volume,
            MeasurementResult::Angle { .. } => MeasurementMode::Angle,
        }
    }

    /// Interpret the raw `dimensions` payload under the requested mode.
    /// The payload is not self-describing on the wire, so the shape is
    /// dictated entirely by the mode the caller asked for; anything that
    /// does not fit is a `RenderError`.
    pub fn from_value(mode: MeasurementMode, payload: Value) -> Result<Self, RenderError> {
        fn shaped<T>(mode: MeasurementMode, payload: Value) -> Result<T, RenderError>
        where
            T: serde::de::DeserializeOwned,
        {
            serde_json::from_value(payload)
                .map_err(|e| RenderError::shape_mismatch(mode, e.to_string()))
        }

        match mode {
            MeasurementMode::Single => {
                let dims: ObjectDimensions = shaped(mode, payload)?;
                Ok(MeasurementResult::Single {
                    width: dims.width,
                    height: dims.height,
                })
            }
            MeasurementMode::Multiple => {
                let objects: Vec<ObjectDimensions> = shaped(mode, payload)?;
                Ok(MeasurementResult::Multiple(objects))
            }
            MeasurementMode::Area => {
                let shape: AreaShape = shaped(mode, payload)?;
                Ok(MeasurementResult::Area { area: shape.area })
            }
            MeasurementMode::Volume => {
                let shape: VolumeShape = shaped(mode, payload)?;
                Ok(MeasurementResult::Volume {
                    volume: shape.volume,
                    height: shape.height,
                })
            }
            MeasurementMode::Angle => {
                let shape: AngleShape = shaped(mode, payload)?;
                Ok(MeasurementResult::Angle { angle: shape.angle })
            }
        }
    }
}
