use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "URANIA_CONFIG";

const DEFAULT_HOUSE_SYSTEM: &str = "placidus";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UraniaSettings {
    /// Swiss Ephemeris data directory; `None` defers to the adapter's fallbacks
    pub ephemeris_path: Option<PathBuf>,
    /// House system name or one-letter code, parsed by the chart crate
    pub house_system: String,
}

impl Default for UraniaSettings {
    fn default() -> Self {
        Self {
            ephemeris_path: None,
            house_system: default_house_system(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    data_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    #[serde(default = "default_house_system")]
    house_system: String,
}

impl Default for ChartToml {
    fn default() -> Self {
        Self {
            house_system: default_house_system(),
        }
    }
}

fn default_house_system() -> String {
    DEFAULT_HOUSE_SYSTEM.to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    chart: ChartToml,
}

/// Read `urania.toml` from `$URANIA_CONFIG`, or from the common relative
/// locations when the variable is unset.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    if let Ok(explicit) = env::var(CONFIG_PATH_ENV) {
        return fs::read_to_string(&explicit)
            .map_err(|e| anyhow::anyhow!("Could not read {CONFIG_PATH_ENV}={explicit}: {e}"));
    }

    let paths = ["configs/urania.toml", "../../configs/urania.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load urania.toml from {:?}", paths);
}

pub fn parse_settings(text: &str) -> anyhow::Result<UraniaSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;
    let RootConfigToml { ephemeris, chart } = root;

    let house_system = chart.house_system.trim().to_string();
    if house_system.is_empty() {
        anyhow::bail!("[chart] house_system must not be empty");
    }

    Ok(UraniaSettings {
        ephemeris_path: ephemeris.data_path,
        house_system,
    })
}

pub fn load_settings() -> anyhow::Result<UraniaSettings> {
    let text = read_config_toml_text()?;
    parse_settings(&text)
}
