use chrono::{DateTime, Utc};
use log::debug;
use std::collections::BTreeMap;

use super::data::{BodyPosition, NatalChart, TransitResult};
use crate::aspects::AspectCalculator;
use crate::ephemeris::{CelestialBody, EphemerisProvider};
use crate::error::ComputationError;

/// Finds aspects from the sky at a given moment to a stored natal chart.
pub struct TransitComputer<'a, P: EphemerisProvider + ?Sized> {
    provider: &'a P,
    calculator: AspectCalculator,
}

impl<'a, P: EphemerisProvider + ?Sized> TransitComputer<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            calculator: AspectCalculator::new(),
        }
    }

    /// Transits to `natal` at `transit_moment`, or now when `None`.
    pub fn calculate_transits(
        &self,
        natal: &NatalChart,
        transit_moment: Option<DateTime<Utc>>,
    ) -> Result<TransitResult, ComputationError> {
        self.calculate_for_positions(&natal.body_positions, transit_moment)
    }

    /// Same as [`calculate_transits`](Self::calculate_transits) for a bare set
    /// of natal positions, which may cover only some of the bodies.
    pub fn calculate_for_positions(
        &self,
        natal_positions: &BTreeMap<CelestialBody, BodyPosition>,
        transit_moment: Option<DateTime<Utc>>,
    ) -> Result<TransitResult, ComputationError> {
        let moment = transit_moment.unwrap_or_else(Utc::now);
        let transiting = self.transiting_longitudes(moment)?;

        let natal = natal_positions
            .iter()
            .map(|(body, position)| (*body, position.absolute_longitude));
        let aspects = self.calculator.compute_transit_aspects(transiting, natal);

        debug!(
            "{} transit aspects to {} natal bodies at {}",
            aspects.len(),
            natal_positions.len(),
            moment
        );

        Ok(TransitResult {
            aspects,
            computed_at: moment,
        })
    }

    /// Longitudes of all ten bodies at `moment`, in chart order.
    pub fn transiting_longitudes(
        &self,
        moment: DateTime<Utc>,
    ) -> Result<Vec<(CelestialBody, f64)>, ComputationError> {
        let jd = self.provider.julian_day(moment);
        CelestialBody::ALL
            .iter()
            .map(|&body| Ok((body, self.provider.body_longitude(jd, body)?)))
            .collect()
    }
}
