use super::types::{MeasurementBlock, RenderedMeasurement};
use crate::error::RenderError;
use crate::measure::{MeasurementMode, MeasurementResult};

/// Map a mode and its typed payload to display blocks.
///
/// Pure and idempotent. A payload shaped for a different mode is rejected
/// rather than guessed at; entries of a `Multiple` result keep their
/// encounter order and are labeled 1-based.
pub fn render(
    mode: MeasurementMode,
    result: &MeasurementResult,
) -> Result<RenderedMeasurement, RenderError> {
    match (mode, result) {
        (MeasurementMode::Single, MeasurementResult::Single { width, height }) => {
            Ok(RenderedMeasurement {
                heading: None,
                blocks: vec![MeasurementBlock {
                    label: None,
                    lines: vec![
                        format!("Width: {} cm", width),
                        format!("Height: {} cm", height),
                    ],
                }],
            })
        }
        (MeasurementMode::Multiple, MeasurementResult::Multiple(objects)) => {
            let blocks = objects
                .iter()
                .enumerate()
                .map(|(index, dims)| MeasurementBlock {
                    label: Some(format!("Object {}:", index + 1)),
                    lines: vec![
                        format!("Width: {} cm", dims.width),
                        format!("Height: {} cm", dims.height),
                    ],
                })
                .collect();
            Ok(RenderedMeasurement {
                heading: Some("Multiple Objects:".to_string()),
                blocks,
            })
        }
        (MeasurementMode::Area, MeasurementResult::Area { area }) => Ok(RenderedMeasurement {
            heading: None,
            blocks: vec![MeasurementBlock {
                label: None,
                lines: vec![format!("Area: {} cm²", area)],
            }],
        }),
        (MeasurementMode::Volume, MeasurementResult::Volume { volume, height }) => {
            Ok(RenderedMeasurement {
                heading: None,
                blocks: vec![MeasurementBlock {
                    label: None,
                    lines: vec![
                        format!("Volume: {} cm³", volume),
                        format!("Height: {} cm", height),
                    ],
                }],
            })
        }
        (MeasurementMode::Angle, MeasurementResult::Angle { angle }) => Ok(RenderedMeasurement {
            heading: None,
            blocks: vec![MeasurementBlock {
                label: None,
                lines: vec![format!("Angle: {}°", angle)],
            }],
        }),
        (requested, found) => Err(RenderError::ModeMismatch {
            requested,
            found: found.mode(),
        }),
    }
}
