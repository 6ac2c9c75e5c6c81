use chrono::{DateTime, Utc};

use crate::ephemeris::types::{CelestialBody, HouseCusps, HouseSystem};
use crate::error::ComputationError;

/// Julian day of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Source of raw celestial mechanics.
///
/// Implementations are configured once at construction and are read-only
/// afterwards, so a single provider can be shared by any number of threads.
pub trait EphemerisProvider: Send + Sync {
    /// Engine label recorded alongside persisted charts.
    fn name(&self) -> &str;

    /// Proleptic Gregorian UTC to Julian day.
    fn julian_day(&self, dt_utc: DateTime<Utc>) -> f64 {
        datetime_to_julian_day(dt_utc)
    }

    /// Ecliptic longitude in degrees, in [0, 360).
    fn body_longitude(&self, jd: f64, body: CelestialBody) -> Result<f64, ComputationError>;

    /// House cusps plus ascendant and midheaven.
    fn house_cusps(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        house_system: HouseSystem,
    ) -> Result<HouseCusps, ComputationError>;
}

/// Convert UTC datetime to Julian Day
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}
