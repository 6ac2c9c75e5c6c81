use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ephemeris::types::CelestialBody;

/// Errors raised while computing charts or transits.
///
/// Every variant is terminal for the call that produced it; nothing in the
/// core retries or recovers. Callers that need a stable code for their own
/// boundary use [`ComputationError::reason`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    #[error("Ephemeris data unavailable at path: {path}. {message}")]
    ProviderUnavailable { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    UnsupportedHouseSystem { system: String, valid: Vec<String> },
    #[error("House geometry undefined: {message}")]
    DegenerateGeometry { message: String },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    PositionUnavailable {
        body: CelestialBody,
        julian_day: f64,
        message: String,
    },
    #[error("Invalid location: lat {lat}, lon {lon}")]
    InvalidLocation { lat: f64, lon: f64 },
}

/// Stable reason code for a [`ComputationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    ProviderUnavailable,
    UnsupportedHouseSystem,
    DegenerateGeometry,
    PositionUnavailable,
    InvalidLocation,
}

impl ComputationError {
    pub fn reason(&self) -> ErrorReason {
        match self {
            Self::ProviderUnavailable { .. } => ErrorReason::ProviderUnavailable,
            Self::UnsupportedHouseSystem { .. } => ErrorReason::UnsupportedHouseSystem,
            Self::DegenerateGeometry { .. } => ErrorReason::DegenerateGeometry,
            Self::PositionUnavailable { .. } => ErrorReason::PositionUnavailable,
            Self::InvalidLocation { .. } => ErrorReason::InvalidLocation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        let err = ComputationError::DegenerateGeometry {
            message: "polar".to_string(),
        };
        assert_eq!(err.reason(), ErrorReason::DegenerateGeometry);

        let err = ComputationError::PositionUnavailable {
            body: CelestialBody::Pluto,
            julian_day: 0.0,
            message: "out of range".to_string(),
        };
        assert_eq!(err.reason(), ErrorReason::PositionUnavailable);
        assert!(err.to_string().contains("pluto"));
    }

    #[test]
    fn test_reason_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorReason::UnsupportedHouseSystem).unwrap();
        assert_eq!(json, "\"unsupported_house_system\"");
    }
}
