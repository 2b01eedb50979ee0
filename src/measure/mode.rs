use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five measurement types the service supports. The selected mode
/// fixes both the request payload and the shape of the returned result;
/// it is read from operator state at trigger time and does not change
/// for the lifetime of that operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementMode {
    Single,
    Multiple,
    Area,
    Volume,
    Angle,
}

impl MeasurementMode {
    pub const ALL: [MeasurementMode; 5] = [
        MeasurementMode::Single,
        MeasurementMode::Multiple,
        MeasurementMode::Area,
        MeasurementMode::Volume,
        MeasurementMode::Angle,
    ];

    /// Tag sent in the `mode` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementMode::Single => "single",
            MeasurementMode::Multiple => "multiple",
            MeasurementMode::Area => "area",
            MeasurementMode::Volume => "volume",
            MeasurementMode::Angle => "angle",
        }
    }

    /// Human-readable selector label, as the service renders it.
    pub fn label(&self) -> &'static str {
        match self {
            MeasurementMode::Single => "Single Object",
            MeasurementMode::Multiple => "Multiple Objects",
            MeasurementMode::Area => "Area Measurement",
            MeasurementMode::Volume => "Volume Estimation",
            MeasurementMode::Angle => "Angle Measurement",
        }
    }
}

impl fmt::Display for MeasurementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(MeasurementMode::Single),
            "multiple" => Ok(MeasurementMode::Multiple),
            "area" => Ok(MeasurementMode::Area),
            "volume" => Ok(MeasurementMode::Volume),
            "angle" => Ok(MeasurementMode::Angle),
            other => Err(format!("unknown measurement mode '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for mode in MeasurementMode::ALL {
            assert_eq!(mode.as_str().parse::<MeasurementMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_serde_uses_wire_tags() {
        let json = serde_json::to_string(&MeasurementMode::Volume).unwrap();
        assert_eq!(json, "\"volume\"");

        let mode: MeasurementMode = serde_json::from_str("\"multiple\"").unwrap();
        assert_eq!(mode, MeasurementMode::Multiple);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        assert!("perimeter".parse::<MeasurementMode>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(MeasurementMode::Single.label(), "Single Object");
        assert_eq!(MeasurementMode::Angle.label(), "Angle Measurement");
    }
}
