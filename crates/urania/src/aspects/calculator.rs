use crate::aspects::types::{Aspect, AspectKind, AspectMatch};
use crate::ephemeris::types::CelestialBody;
use crate::western::signs::normalize_degrees;

/// Smallest angle between two longitudes, in [0, 180].
pub fn angular_separation(lon_a: f64, lon_b: f64) -> f64 {
    let diff = (normalize_degrees(lon_a) - normalize_degrees(lon_b)).abs();
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Aspect calculator over the fixed major-aspect table.
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// Every table row whose orb window contains the separation of the two
    /// longitudes, in table order. Rows are checked independently.
    pub fn classify(&self, lon_a: f64, lon_b: f64) -> Vec<AspectMatch> {
        let separation = angular_separation(lon_a, lon_b);

        AspectKind::ALL
            .iter()
            .filter_map(|&kind| {
                let orb = (separation - kind.exact_angle()).abs();
                (orb <= kind.max_orb()).then_some(AspectMatch { kind, orb })
            })
            .collect()
    }

    /// Aspects from each transiting body to each natal body.
    ///
    /// Output order is transiting body (outer), natal body, then aspect kind.
    pub fn compute_transit_aspects<T, N>(&self, transiting: T, natal: N) -> Vec<Aspect>
    where
        T: IntoIterator<Item = (CelestialBody, f64)>,
        N: IntoIterator<Item = (CelestialBody, f64)> + Clone,
    {
        let mut aspects = Vec::new();
        for (transiting_body, transit_lon) in transiting {
            for (natal_body, natal_lon) in natal.clone() {
                aspects.extend(self.classify(transit_lon, natal_lon).into_iter().map(|m| {
                    Aspect {
                        kind: m.kind,
                        transiting_body,
                        natal_body,
                        orb: m.orb,
                    }
                }));
            }
        }
        aspects
    }
}
