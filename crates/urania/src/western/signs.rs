//! Tropical zodiac signs.
//!
//! Maps an absolute ecliptic longitude onto one of the twelve 30° signs,
//! starting with Aries at the vernal equinox point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGN_ORDER: &[&str] = &[
    "aries", "taurus", "gemini", "cancer",
    "leo", "virgo", "libra", "scorpio",
    "sagittarius", "capricorn", "aquarius", "pisces",
];

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign for an index, wrapping past Pisces.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        SIGN_ORDER[self.index()]
    }

    /// Longitude where the sign begins.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * 30.0
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZodiacSign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        SIGN_ORDER
            .iter()
            .position(|&name| name == lower)
            .map(Self::from_index)
            .ok_or_else(|| format!("Unknown zodiac sign: {}", s))
    }
}

/// Fold any longitude into [0, 360).
pub fn normalize_degrees(longitude: f64) -> f64 {
    let normalized = longitude.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Get sign index (0-11) from longitude
pub fn sign_index(longitude: f64) -> usize {
    (normalize_degrees(longitude) / 30.0).floor() as usize % 12
}

/// Sign and degree within that sign (0 <= degree < 30).
pub fn to_zodiac(longitude: f64) -> (ZodiacSign, f64) {
    let normalized = normalize_degrees(longitude);
    let sign = ZodiacSign::from_index(sign_index(normalized));
    let degree = normalized % 30.0;
    (sign, degree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_index_boundaries() {
        assert_eq!(sign_index(0.0), 0);
        assert_eq!(sign_index(29.999), 0);
        assert_eq!(sign_index(30.0), 1);
        assert_eq!(sign_index(359.999), 11);
        assert_eq!(sign_index(360.0), 0);
        assert_eq!(sign_index(-15.0), 11);
    }

    #[test]
    fn test_normalize_tiny_negative() {
        let n = normalize_degrees(-1e-15);
        assert!((0.0..360.0).contains(&n));
    }

    #[test]
    fn test_names_round_trip() {
        for sign in ZodiacSign::ALL {
            assert_eq!(sign.name().parse::<ZodiacSign>().unwrap(), sign);
        }
        assert_eq!(ZodiacSign::Leo.start_longitude(), 120.0);
    }
}
