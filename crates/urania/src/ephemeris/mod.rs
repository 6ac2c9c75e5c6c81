pub mod adapter;
pub mod fixed;
pub mod provider;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use fixed::StaticEphemeris;
pub use provider::{datetime_to_julian_day, EphemerisProvider};
pub use types::{CelestialBody, EphemerisConfig, GeoLocation, HouseCusps, HouseSystem};
