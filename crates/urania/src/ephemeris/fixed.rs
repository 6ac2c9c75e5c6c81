//! Provider backed by precomputed positions.
//!
//! Answers every query with the same longitudes and cusps regardless of the
//! requested moment. Useful for replaying positions computed elsewhere and
//! for exercising chart logic without ephemeris files.

use std::collections::BTreeMap;

use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::{CelestialBody, HouseCusps, HouseSystem};
use crate::error::ComputationError;

#[derive(Debug, Clone, Default)]
pub struct StaticEphemeris {
    longitudes: BTreeMap<CelestialBody, f64>,
    houses: Option<HouseCusps>,
}

impl StaticEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_longitude(mut self, body: CelestialBody, longitude: f64) -> Self {
        self.longitudes.insert(body, longitude);
        self
    }

    /// Assign every body the same longitude offset by `step` degrees per
    /// position in chart order.
    pub fn spread(start: f64, step: f64) -> Self {
        CelestialBody::ALL
            .iter()
            .enumerate()
            .fold(Self::new(), |eph, (i, body)| {
                eph.with_longitude(*body, (start + step * i as f64).rem_euclid(360.0))
            })
    }

    pub fn with_houses(mut self, houses: HouseCusps) -> Self {
        self.houses = Some(houses);
        self
    }

    /// Twelve 30° houses starting at `ascendant`, midheaven 90° behind it.
    pub fn with_equal_houses(self, ascendant: f64) -> Self {
        let cusps = std::array::from_fn(|i| (ascendant + 30.0 * i as f64).rem_euclid(360.0));
        self.with_houses(HouseCusps {
            cusps,
            ascendant: ascendant.rem_euclid(360.0),
            midheaven: (ascendant - 90.0).rem_euclid(360.0),
        })
    }
}

impl EphemerisProvider for StaticEphemeris {
    fn name(&self) -> &str {
        "static"
    }

    fn body_longitude(&self, jd: f64, body: CelestialBody) -> Result<f64, ComputationError> {
        self.longitudes
            .get(&body)
            .copied()
            .ok_or_else(|| ComputationError::PositionUnavailable {
                body,
                julian_day: jd,
                message: "no stored longitude".to_string(),
            })
    }

    fn house_cusps(
        &self,
        _jd: f64,
        _lat: f64,
        _lon: f64,
        _house_system: HouseSystem,
    ) -> Result<HouseCusps, ComputationError> {
        self.houses.ok_or_else(|| ComputationError::DegenerateGeometry {
            message: "no stored house cusps".to_string(),
        })
    }
}
