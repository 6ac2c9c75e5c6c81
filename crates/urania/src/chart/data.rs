use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aspects::Aspect;
use crate::ephemeris::types::{CelestialBody, HouseSystem};
use crate::western::signs::{normalize_degrees, to_zodiac, ZodiacSign};

/// Placement of a body in the chart.
///
/// `sign` and `degree` always follow from `absolute_longitude`; build values
/// through [`BodyPosition::from_longitude`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub sign: ZodiacSign,
    /// Degree within sign, 0 <= x < 30
    pub degree: f64,
    /// Ecliptic longitude, 0 <= x < 360
    pub absolute_longitude: f64,
    /// House 1-12, absent when houses were not computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
}

impl BodyPosition {
    pub fn from_longitude(longitude: f64) -> Self {
        let absolute_longitude = normalize_degrees(longitude);
        let (sign, degree) = to_zodiac(absolute_longitude);
        Self {
            sign,
            degree,
            absolute_longitude,
            house: None,
        }
    }

    pub fn with_house(mut self, house: u8) -> Self {
        self.house = Some(house);
        self
    }
}

/// Ascendant or midheaven.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularPoint {
    pub sign: ZodiacSign,
    pub degree: f64,
    pub absolute_longitude: f64,
}

impl AngularPoint {
    pub fn from_longitude(longitude: f64) -> Self {
        let absolute_longitude = normalize_degrees(longitude);
        let (sign, degree) = to_zodiac(absolute_longitude);
        Self {
            sign,
            degree,
            absolute_longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub body_positions: BTreeMap<CelestialBody, BodyPosition>,
    pub ascendant: AngularPoint,
    pub midheaven: AngularPoint,
    /// Cusps of houses 1..=12
    pub house_cusps: [f64; 12],
    pub house_system: HouseSystem,
    pub computed_at: DateTime<Utc>,
    /// Non-fatal diagnostics keyed by topic, e.g. `"sun_house"`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub warnings: BTreeMap<String, String>,
}

impl NatalChart {
    pub fn position(&self, body: CelestialBody) -> Option<&BodyPosition> {
        self.body_positions.get(&body)
    }
}

/// Aspects active at one moment, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitResult {
    pub aspects: Vec<Aspect>,
    pub computed_at: DateTime<Utc>,
}
