use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ComputationError;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in [-90, 90], longitude in [-180, 180], both finite.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Bodies tracked in natal charts and transits, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 10] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CelestialBody::Sun => "sun",
            CelestialBody::Moon => "moon",
            CelestialBody::Mercury => "mercury",
            CelestialBody::Venus => "venus",
            CelestialBody::Mars => "mars",
            CelestialBody::Jupiter => "jupiter",
            CelestialBody::Saturn => "saturn",
            CelestialBody::Uranus => "uranus",
            CelestialBody::Neptune => "neptune",
            CelestialBody::Pluto => "pluto",
        }
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CelestialBody {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        CelestialBody::ALL
            .iter()
            .copied()
            .find(|body| body.name() == lower)
            .ok_or_else(|| format!("Unknown celestial body: {}", s))
    }
}

/// House division method, identified by its Swiss Ephemeris letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Porphyry,
    Regiomontanus,
    Campanus,
    Equal,
    WholeSign,
    Alcabitius,
    Morinus,
}

/// House system mapping
const HOUSE_SYSTEMS: &[(HouseSystem, &str, u8)] = &[
    (HouseSystem::Placidus, "placidus", b'P'),
    (HouseSystem::Koch, "koch", b'K'),
    (HouseSystem::Porphyry, "porphyry", b'O'),
    (HouseSystem::Regiomontanus, "regiomontanus", b'R'),
    (HouseSystem::Campanus, "campanus", b'C'),
    (HouseSystem::Equal, "equal", b'E'),
    (HouseSystem::WholeSign, "whole_sign", b'W'),
    (HouseSystem::Alcabitius, "alcabitius", b'B'),
    (HouseSystem::Morinus, "morinus", b'M'),
];

impl HouseSystem {
    fn entry(self) -> &'static (HouseSystem, &'static str, u8) {
        HOUSE_SYSTEMS
            .iter()
            .find(|(system, _, _)| *system == self)
            .unwrap_or(&HOUSE_SYSTEMS[0])
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// Single-byte code understood by `swe_houses`.
    pub fn code(self) -> u8 {
        self.entry().2
    }

    /// Systems built from semi-arc time division have no solution inside the
    /// polar circles.
    pub fn is_polar_sensitive(self) -> bool {
        matches!(self, HouseSystem::Placidus | HouseSystem::Koch)
    }

    pub fn valid_names() -> Vec<String> {
        HOUSE_SYSTEMS.iter().map(|(_, name, _)| name.to_string()).collect()
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = ComputationError;

    /// Accepts the snake_case name (any case) or the one-letter Swiss code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let by_code = match trimmed.as_bytes() {
            [code] => HOUSE_SYSTEMS
                .iter()
                .find(|(_, _, c)| *c == code.to_ascii_uppercase()),
            _ => None,
        };
        let lower = trimmed.to_lowercase();
        by_code
            .or_else(|| HOUSE_SYSTEMS.iter().find(|(_, name, _)| *name == lower))
            .map(|(system, _, _)| *system)
            .ok_or_else(|| ComputationError::UnsupportedHouseSystem {
                system: s.to_string(),
                valid: HouseSystem::valid_names(),
            })
    }
}

/// House cusps and the two chart angles for one moment and place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    /// Cusp longitudes for houses 1..=12, in degrees (0-360)
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
}

impl HouseCusps {
    /// True when every value is finite and walking the cusps cyclically from
    /// house 1 covers the circle exactly once.
    pub fn is_cyclically_ordered(&self) -> bool {
        if !self.cusps.iter().all(|c| c.is_finite())
            || !self.ascendant.is_finite()
            || !self.midheaven.is_finite()
        {
            return false;
        }
        let total: f64 = (0..12)
            .map(|i| (self.cusps[(i + 1) % 12] - self.cusps[i]).rem_euclid(360.0))
            .sum();
        (total - 360.0).abs() < 1e-6
    }
}

/// Provider configuration, fixed for the lifetime of the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EphemerisConfig {
    /// Directory holding the Swiss Ephemeris `.se1` files
    pub data_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_order_and_names() {
        assert_eq!(CelestialBody::ALL.len(), 10);
        assert!(CelestialBody::Sun < CelestialBody::Pluto);
        assert_eq!("Saturn".parse::<CelestialBody>().unwrap(), CelestialBody::Saturn);
        assert!("chiron".parse::<CelestialBody>().is_err());
    }

    #[test]
    fn test_house_system_from_name_and_code() {
        assert_eq!("placidus".parse::<HouseSystem>().unwrap(), HouseSystem::Placidus);
        assert_eq!("P".parse::<HouseSystem>().unwrap(), HouseSystem::Placidus);
        assert_eq!("w".parse::<HouseSystem>().unwrap(), HouseSystem::WholeSign);
        assert_eq!("Whole_Sign".parse::<HouseSystem>().unwrap(), HouseSystem::WholeSign);
        assert_eq!(HouseSystem::Alcabitius.code(), b'B');
        assert_eq!(HouseSystem::default(), HouseSystem::Placidus);
    }

    #[test]
    fn test_house_system_unknown() {
        let err = "topocentric".parse::<HouseSystem>().unwrap_err();
        match err {
            ComputationError::UnsupportedHouseSystem { system, valid } => {
                assert_eq!(system, "topocentric");
                assert!(valid.contains(&"koch".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cusps_cyclic_order() {
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = (i as f64 * 30.0 + 200.0) % 360.0;
        }
        let ok = HouseCusps { cusps, ascendant: 200.0, midheaven: 110.0 };
        assert!(ok.is_cyclically_ordered());

        cusps.swap(2, 3);
        let shuffled = HouseCusps { cusps, ascendant: 200.0, midheaven: 110.0 };
        assert!(!shuffled.is_cyclically_ordered());
    }

    #[test]
    fn test_geo_location_validity() {
        assert!(GeoLocation::new(52.52, 13.40).is_valid());
        assert!(!GeoLocation::new(95.0, 13.40).is_valid());
        assert!(!GeoLocation::new(f64::NAN, 0.0).is_valid());
    }
}
