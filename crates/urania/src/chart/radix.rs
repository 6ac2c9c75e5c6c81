use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::collections::BTreeMap;

use super::data::{AngularPoint, BodyPosition, NatalChart};
use crate::ephemeris::{CelestialBody, EphemerisProvider, GeoLocation, HouseSystem};
use crate::error::ComputationError;
use crate::western::houses::locate_house;

/// Builds natal charts from a birth moment and place.
pub struct ChartComputer<'a, P: EphemerisProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: EphemerisProvider + ?Sized> ChartComputer<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Compute body positions, houses and angles for `birth_utc` at `location`.
    ///
    /// The returned chart's `computed_at` is the birth moment itself.
    pub fn calculate_natal_chart(
        &self,
        birth_utc: DateTime<Utc>,
        location: GeoLocation,
        house_system: HouseSystem,
    ) -> Result<NatalChart, ComputationError> {
        if !location.is_valid() {
            return Err(ComputationError::InvalidLocation {
                lat: location.lat,
                lon: location.lon,
            });
        }

        let jd = self.provider.julian_day(birth_utc);

        let mut body_positions = BTreeMap::new();
        for body in CelestialBody::ALL {
            let lon = self.provider.body_longitude(jd, body)?;
            body_positions.insert(body, BodyPosition::from_longitude(lon));
        }

        let houses = self
            .provider
            .house_cusps(jd, location.lat, location.lon, house_system)?;

        let mut warnings = BTreeMap::new();
        for (body, position) in body_positions.iter_mut() {
            let house = match locate_house(position.absolute_longitude, &houses.cusps) {
                Some(house) => house,
                None => {
                    warn!(
                        "{} at {:.4} fell outside every cusp span {:?}; placing in house 1",
                        body, position.absolute_longitude, houses.cusps
                    );
                    warnings.insert(
                        format!("{}_house", body),
                        format!(
                            "longitude {:.4} matched no cusp span; placed in house 1",
                            position.absolute_longitude
                        ),
                    );
                    1
                }
            };
            position.house = Some(house);
        }

        debug!(
            "natal chart for {} at ({:.4}, {:.4}) using {} houses via {}",
            birth_utc,
            location.lat,
            location.lon,
            house_system,
            self.provider.name()
        );

        Ok(NatalChart {
            body_positions,
            ascendant: AngularPoint::from_longitude(houses.ascendant),
            midheaven: AngularPoint::from_longitude(houses.midheaven),
            house_cusps: houses.cusps,
            house_system,
            computed_at: birth_utc,
            warnings,
        })
    }
}
