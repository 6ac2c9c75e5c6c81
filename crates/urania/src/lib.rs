//! Natal chart and transit computation.
//!
//! Raw positions come from an [`EphemerisProvider`]; this crate derives signs,
//! houses and angles from them and matches transiting bodies against a natal
//! chart using the major-aspect table.

pub mod agent;
pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod payload;
pub mod western;

pub use aspects::{Aspect, AspectCalculator, AspectKind};
pub use chart::{ChartComputer, NatalChart, TransitComputer, TransitResult};
pub use ephemeris::{
    CelestialBody, EphemerisConfig, EphemerisProvider, GeoLocation, HouseSystem,
    StaticEphemeris, SwissEphemerisAdapter,
};
pub use error::{ComputationError, ErrorReason};
pub use payload::{PayloadError, StoredChart};
pub use western::ZodiacSign;
