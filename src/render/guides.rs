use super::types::GuideOverlay;
use crate::measure::MeasurementMode;

/// Guide overlay shown for the selected mode. Stateless: selecting a mode
/// twice yields the same overlay, and no other component is touched.
pub fn guide_overlay(mode: MeasurementMode) -> Option<GuideOverlay> {
    match mode {
        MeasurementMode::Angle => Some(GuideOverlay::AngleLine),
        MeasurementMode::Area => Some(GuideOverlay::AreaBox),
        MeasurementMode::Single | MeasurementMode::Multiple | MeasurementMode::Volume => None,
    }
}
