//! House placement for a longitude given the twelve cusps.

use crate::western::signs::normalize_degrees;

/// House (1-12) whose span contains `longitude`, or `None` when no span
/// matches (malformed cusps or floating-point edge cases).
///
/// House `i` spans `cusps[i]..cusps[i + 1]`, half-open. Spans that cross 0°
/// are unwrapped by adding 360 to the end cusp, and to the longitude when it
/// lies numerically before the start cusp.
pub fn locate_house(longitude: f64, cusps: &[f64; 12]) -> Option<u8> {
    let lon = normalize_degrees(longitude);

    for i in 0..12 {
        let cusp_current = cusps[i];
        let mut cusp_next = cusps[(i + 1) % 12];

        // Handle zodiac wrap-around
        if cusp_next < cusp_current {
            cusp_next += 360.0;
        }

        let lon_adjusted = if lon < cusp_current { lon + 360.0 } else { lon };

        if cusp_current <= lon_adjusted && lon_adjusted < cusp_next {
            return Some(i as u8 + 1);
        }
    }

    None
}

/// House (1-12) containing `longitude`, falling back to house 1 when no span
/// matches. Use [`locate_house`] to tell the fallback apart from a real first
/// house placement.
pub fn find_house(longitude: f64, cusps: &[f64; 12]) -> u8 {
    locate_house(longitude, cusps).unwrap_or(1)
}
