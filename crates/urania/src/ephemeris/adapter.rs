use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::{CelestialBody, EphemerisConfig, HouseCusps, HouseSystem};
use crate::error::ComputationError;
use chrono::{DateTime, Datelike, Timelike, Utc};
use log::{debug, info, warn};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once, OnceLock};
use swisseph::swe::{calc_ut, houses_ex, julday};
use swisseph::{AscMc, Cusp};

/// Default data directory when neither the config nor the environment names one.
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/share/swisseph";

/// Environment variable consulted when the config carries no path.
pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

/// Environment variable the Swiss C library reads for its file search path.
const SE_EPHE_PATH_ENV: &str = "SE_EPHE_PATH";

/// FLG_SWIEPH: read positions from the Swiss Ephemeris files.
const FLG_SWIEPH: i32 = 2;

/// SE_ECL_NUT: pseudo-body whose `out[0]` is the true obliquity of the ecliptic.
const SE_ECL_NUT: i32 = -1;

const PLANET_IDS: &[(CelestialBody, i32)] = &[
    (CelestialBody::Sun, 0),
    (CelestialBody::Moon, 1),
    (CelestialBody::Mercury, 2),
    (CelestialBody::Venus, 3),
    (CelestialBody::Mars, 4),
    (CelestialBody::Jupiter, 5),
    (CelestialBody::Saturn, 6),
    (CelestialBody::Uranus, 7),
    (CelestialBody::Neptune, 8),
    (CelestialBody::Pluto, 9),
];

static CONFIGURE: Once = Once::new();
static CONFIGURED_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Swiss Ephemeris adapter implementation
///
/// The underlying C library keeps process-global state, so every call into it
/// goes through `swe_lock`. The data path is handed to the library once per
/// process; later adapters reuse whatever the first one installed, and a
/// pre-set `SE_EPHE_PATH` takes precedence over the configured directory.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    swe_lock: Mutex<()>,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter, validating that the data directory holds
    /// ephemeris files.
    pub fn new(config: EphemerisConfig) -> Result<Self, ComputationError> {
        let path = resolve_ephemeris_path(config.data_path);
        validate_ephemeris_dir(&path)?;
        let active = configure_library_path(&path);

        Ok(Self {
            ephemeris_path: active,
            swe_lock: Mutex::new(()),
        })
    }

    /// Directory the library actually reads, which may differ from the
    /// configured one when `SE_EPHE_PATH` was already set.
    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn name(&self) -> &str {
        "swisseph"
    }

    fn julian_day(&self, dt_utc: DateTime<Utc>) -> f64 {
        let hour_decimal = dt_utc.hour() as f64
            + dt_utc.minute() as f64 / 60.0
            + (dt_utc.second() as f64 + dt_utc.nanosecond() as f64 * 1e-9) / 3600.0;

        // GREG_CAL = 1
        let _guard = self.swe_lock.lock().unwrap_or_else(|p| p.into_inner());
        julday(
            dt_utc.year(),
            dt_utc.month() as i32,
            dt_utc.day() as i32,
            hour_decimal,
            1,
        )
    }

    fn body_longitude(&self, jd: f64, body: CelestialBody) -> Result<f64, ComputationError> {
        let planet_code = PLANET_IDS
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| ComputationError::PositionUnavailable {
                body,
                julian_day: jd,
                message: "No Swiss Ephemeris id for body".to_string(),
            })?;

        let result = {
            let _guard = self.swe_lock.lock().unwrap_or_else(|p| p.into_inner());
            calc_ut(jd, planet_code as u32, FLG_SWIEPH as u32)
        }
        .map_err(|e| ComputationError::PositionUnavailable {
            body,
            julian_day: jd,
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let longitude = result.out[0];
        if !longitude.is_finite() {
            return Err(ComputationError::PositionUnavailable {
                body,
                julian_day: jd,
                message: format!("non-finite longitude {}", longitude),
            });
        }
        Ok(longitude.rem_euclid(360.0))
    }

    fn house_cusps(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        house_system: HouseSystem,
    ) -> Result<HouseCusps, ComputationError> {
        // swe_houses silently falls back to Porphyry inside the polar circles;
        // refuse instead of handing back cusps for a different system.
        let (c, a) = {
            let _guard = self.swe_lock.lock().unwrap_or_else(|p| p.into_inner());
            if house_system.is_polar_sensitive() {
                let obliquity = calc_ut(jd, SE_ECL_NUT as u32, FLG_SWIEPH as u32)
                    .map_err(|e| ComputationError::ProviderUnavailable {
                        path: self.ephemeris_path.display().to_string(),
                        message: format!("obliquity unavailable at JD {:.5}: {}", jd, e),
                    })?
                    .out[0];
                if beyond_polar_circle(lat, obliquity) {
                    return Err(ComputationError::DegenerateGeometry {
                        message: format!(
                            "{} houses are undefined at latitude {:.4} (polar circle {:.4})",
                            house_system,
                            lat,
                            90.0 - obliquity
                        ),
                    });
                }
            }
            houses_ex(jd, FLG_SWIEPH, lat, lon, house_system.code() as i32)
        };
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];

        let houses = HouseCusps {
            cusps: cusp_values.map(|cusp| cusp.rem_euclid(360.0)),
            ascendant: ascmc.ascendant.rem_euclid(360.0),
            midheaven: ascmc.mc.rem_euclid(360.0),
        };

        if !houses.is_cyclically_ordered() {
            return Err(ComputationError::DegenerateGeometry {
                message: format!(
                    "{} cusps at lat {:.2}, lon {:.2} do not divide the circle",
                    house_system, lat, lon
                ),
            });
        }

        debug!(
            "houses ({}) at JD {:.5}: asc {:.4}, mc {:.4}",
            house_system, jd, houses.ascendant, houses.midheaven
        );
        Ok(houses)
    }
}

fn resolve_ephemeris_path(configured: Option<PathBuf>) -> PathBuf {
    configured.unwrap_or_else(|| {
        env::var(EPHEMERIS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
    })
}

/// The directory must exist, be readable, and contain at least one `.se1` file.
fn validate_ephemeris_dir(path: &Path) -> Result<(), ComputationError> {
    let unavailable = |message: String| ComputationError::ProviderUnavailable {
        path: path.display().to_string(),
        message,
    };

    if !path.is_dir() {
        return Err(unavailable(
            "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed."
                .to_string(),
        ));
    }

    let entries = fs::read_dir(path).map_err(|e| unavailable(e.to_string()))?;
    let has_data = entries
        .filter_map(Result::ok)
        .any(|entry| entry.path().extension().is_some_and(|ext| ext == "se1"));

    if !has_data {
        return Err(unavailable("No .se1 ephemeris files found".to_string()));
    }
    Ok(())
}

/// Semi-arc systems have no solution once the pole of the ecliptic can reach
/// the horizon, i.e. at `|lat| >= 90 - obliquity` for that date.
fn beyond_polar_circle(lat: f64, obliquity: f64) -> bool {
    lat.abs() >= 90.0 - obliquity
}

/// Path the library will read: a pre-set `SE_EPHE_PATH` wins over `requested`.
fn effective_library_path(requested: &Path, preset: Option<OsString>) -> PathBuf {
    preset
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| requested.to_path_buf())
}

/// Install the data path once per process and return the path in effect.
fn configure_library_path(path: &Path) -> PathBuf {
    CONFIGURE.call_once(|| {
        let active = effective_library_path(path, env::var_os(SE_EPHE_PATH_ENV));
        if active.as_path() == path {
            env::set_var(SE_EPHE_PATH_ENV, path);
            info!("Swiss Ephemeris data path set to {}", active.display());
        } else {
            warn!(
                "{} overrides configured ephemeris path {}; library reads {}",
                SE_EPHE_PATH_ENV,
                path.display(),
                active.display()
            );
        }
        let _ = CONFIGURED_PATH.set(active);
    });

    let active = CONFIGURED_PATH
        .get()
        .cloned()
        .unwrap_or_else(|| path.to_path_buf());
    if active.as_path() != path {
        warn!(
            "Ephemeris path {} ignored; library already configured with {}",
            path.display(),
            active.display()
        );
    }
    active
}
