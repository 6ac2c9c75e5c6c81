//! JSON shape of a natal chart as kept by the persistence layer.
//!
//! Values are rounded on the way out (longitude to 6 places, degree to 2,
//! cusps to 2). Sign and degree are derived from the rounded longitude, so a
//! body a hair below a sign boundary is stored in the sign its stored
//! longitude falls in. On the way back in, sign and degree are recomputed from
//! the stored longitude so a hand-edited or stale `sign` field cannot disagree
//! with the position.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::chart::{AngularPoint, BodyPosition, NatalChart};
use crate::ephemeris::{CelestialBody, HouseSystem};
use crate::western::signs::{normalize_degrees, to_zodiac, ZodiacSign};

pub const ZODIAC_TROPICAL: &str = "tropical";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("Unknown body in payload: {0}")]
    UnknownBody(String),
    #[error("Expected 12 house cusps, found {0}")]
    CuspCount(usize),
    #[error("Payload has no {0}")]
    MissingAngle(&'static str),
    #[error("Unsupported house system in payload: {0}")]
    HouseSystem(String),
    #[error("Unsupported zodiac in payload: {0}")]
    Zodiac(String),
    #[error("House {0} outside 1-12")]
    HouseOutOfRange(u8),
    #[error(transparent)]
    Json(JsonError),
}

/// serde_json error kept as text so `PayloadError` stays `Clone + PartialEq`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct JsonError(String);

impl From<serde_json::Error> for PayloadError {
    fn from(e: serde_json::Error) -> Self {
        PayloadError::Json(JsonError(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPayload {
    pub sign: ZodiacSign,
    pub degree: f64,
    pub lon_absolute: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub planets: BTreeMap<String, PointPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascendant: Option<PointPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midheaven: Option<PointPayload>,
    #[serde(default)]
    pub houses: Vec<f64>,
}

/// Natal chart record with its computation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredChart {
    pub computed_at: DateTime<Utc>,
    pub engine_version: String,
    pub zodiac: String,
    pub house_system: String,
    pub payload: ChartPayload,
    /// Diagnostics carried over from the computation, e.g. house fallbacks
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub warnings: BTreeMap<String, String>,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round a degree-within-sign without carrying it up to 30.
pub(crate) fn round_sign_degree(degree: f64, places: i32) -> f64 {
    let ceiling = 30.0 - 10f64.powi(-places);
    round_to(degree, places).min(round_to(ceiling, places))
}

impl PointPayload {
    fn from_longitude(longitude: f64, house: Option<u8>) -> Self {
        let lon_absolute = normalize_degrees(round_to(longitude, 6));
        let (sign, degree) = to_zodiac(lon_absolute);
        Self {
            sign,
            degree: round_sign_degree(degree, 2),
            lon_absolute,
            house,
        }
    }

    fn from_body(position: &BodyPosition) -> Self {
        Self::from_longitude(position.absolute_longitude, position.house)
    }

    fn from_angle(point: &AngularPoint) -> Self {
        Self::from_longitude(point.absolute_longitude, None)
    }

    fn to_body(&self) -> Result<BodyPosition, PayloadError> {
        let position = BodyPosition::from_longitude(self.lon_absolute);
        match self.house {
            Some(house) if !(1..=12).contains(&house) => Err(PayloadError::HouseOutOfRange(house)),
            Some(house) => Ok(position.with_house(house)),
            None => Ok(position),
        }
    }
}

impl ChartPayload {
    pub fn from_chart(chart: &NatalChart) -> Self {
        Self {
            planets: chart
                .body_positions
                .iter()
                .map(|(body, position)| (body.name().to_string(), PointPayload::from_body(position)))
                .collect(),
            ascendant: Some(PointPayload::from_angle(&chart.ascendant)),
            midheaven: Some(PointPayload::from_angle(&chart.midheaven)),
            houses: chart.house_cusps.iter().map(|c| round_to(*c, 2)).collect(),
        }
    }

    /// Body positions only; enough to compute transits.
    pub fn natal_positions(&self) -> Result<BTreeMap<CelestialBody, BodyPosition>, PayloadError> {
        self.planets
            .iter()
            .map(|(name, point)| {
                let body = name
                    .parse::<CelestialBody>()
                    .map_err(|_| PayloadError::UnknownBody(name.clone()))?;
                Ok((body, point.to_body()?))
            })
            .collect()
    }
}

impl StoredChart {
    pub fn from_chart(chart: &NatalChart, engine: &str) -> Self {
        Self {
            computed_at: chart.computed_at,
            engine_version: engine.to_string(),
            zodiac: ZODIAC_TROPICAL.to_string(),
            house_system: chart.house_system.name().to_string(),
            payload: ChartPayload::from_chart(chart),
            warnings: chart.warnings.clone(),
        }
    }

    pub fn to_chart(&self) -> Result<NatalChart, PayloadError> {
        if self.zodiac != ZODIAC_TROPICAL {
            return Err(PayloadError::Zodiac(self.zodiac.clone()));
        }
        let house_system = self
            .house_system
            .parse::<HouseSystem>()
            .map_err(|_| PayloadError::HouseSystem(self.house_system.clone()))?;
        let house_cusps: [f64; 12] = self
            .payload
            .houses
            .as_slice()
            .try_into()
            .map_err(|_| PayloadError::CuspCount(self.payload.houses.len()))?;
        let ascendant = self
            .payload
            .ascendant
            .as_ref()
            .ok_or(PayloadError::MissingAngle("ascendant"))?;
        let midheaven = self
            .payload
            .midheaven
            .as_ref()
            .ok_or(PayloadError::MissingAngle("midheaven"))?;

        Ok(NatalChart {
            body_positions: self.payload.natal_positions()?,
            ascendant: AngularPoint::from_longitude(ascendant.lon_absolute),
            midheaven: AngularPoint::from_longitude(midheaven.lon_absolute),
            house_cusps,
            house_system,
            computed_at: self.computed_at,
            warnings: self.warnings.clone(),
        })
    }

    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(24.299999999, 2), 24.3);
        assert_eq!(round_to(84.30000049, 6), 84.3);
    }

    #[test]
    fn test_sign_degree_never_reaches_thirty() {
        assert_eq!(round_sign_degree(29.996, 2), 29.99);
        assert_eq!(round_sign_degree(29.97, 1), 29.9);
        assert_eq!(round_sign_degree(12.345678, 2), 12.35);
    }

    #[test]
    fn test_point_sign_follows_rounded_longitude() {
        let point = PointPayload::from_longitude(29.9999996, None);
        assert_eq!(point.lon_absolute, 30.0);
        assert_eq!(point.sign, ZodiacSign::Taurus);
        assert_eq!(point.degree, 0.0);

        let point = PointPayload::from_longitude(359.99999999, None);
        assert_eq!(point.lon_absolute, 0.0);
        assert_eq!(point.sign, ZodiacSign::Aries);
    }

    #[test]
    fn test_house_out_of_range_rejected() {
        let point = PointPayload {
            sign: ZodiacSign::Aries,
            degree: 1.0,
            lon_absolute: 1.0,
            house: Some(13),
        };
        assert_eq!(point.to_body().unwrap_err(), PayloadError::HouseOutOfRange(13));
    }
}
