use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;

use urania::agent::{transit_summary, AgentAspect};
use urania::{
    ChartComputer, EphemerisConfig, EphemerisProvider, GeoLocation, HouseSystem, StoredChart,
    SwissEphemerisAdapter, TransitComputer, TransitResult,
};
use urania_config::UraniaSettings;

const USAGE: &str = "\
usage:
  chart_lab natal <birth RFC3339> <lat> <lon> [house-system]
  chart_lab transits <stored-chart.json> [moment RFC3339]";

#[derive(Serialize)]
struct TransitReport {
    #[serde(flatten)]
    result: TransitResult,
    summary: BTreeMap<String, AgentAspect>,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        error!("{e:#}");
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let settings = urania_config::load_settings().unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        UraniaSettings::default()
    });

    let adapter = SwissEphemerisAdapter::new(EphemerisConfig {
        data_path: settings.ephemeris_path.clone(),
    })?;
    info!("ephemeris ready at {}", adapter.ephemeris_path().display());

    match args.first().map(String::as_str) {
        Some("natal") => natal(&adapter, &settings, &args[1..]),
        Some("transits") => transits(&adapter, &args[1..]),
        _ => bail!("{USAGE}"),
    }
}

fn natal(
    adapter: &SwissEphemerisAdapter,
    settings: &UraniaSettings,
    args: &[String],
) -> anyhow::Result<()> {
    let [birth, lat, lon, rest @ ..] = args else {
        bail!("{USAGE}");
    };
    let birth = parse_moment(birth)?;
    let location = GeoLocation::new(
        lat.parse().with_context(|| format!("invalid latitude {lat}"))?,
        lon.parse().with_context(|| format!("invalid longitude {lon}"))?,
    );
    let house_system: HouseSystem = rest
        .first()
        .unwrap_or(&settings.house_system)
        .parse()?;

    let chart = ChartComputer::new(adapter).calculate_natal_chart(birth, location, house_system)?;
    let stored = StoredChart::from_chart(&chart, adapter.name());
    println!("{}", stored.to_json()?);
    Ok(())
}

fn transits(adapter: &SwissEphemerisAdapter, args: &[String]) -> anyhow::Result<()> {
    let Some(path) = args.first() else {
        bail!("{USAGE}");
    };
    let moment = args.get(1).map(|m| parse_moment(m)).transpose()?;

    let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let stored = StoredChart::from_json(&text)?;
    let positions = stored.payload.natal_positions()?;

    let result = TransitComputer::new(adapter).calculate_for_positions(&positions, moment)?;
    info!("{} aspects at {}", result.aspects.len(), result.computed_at);

    let summary = transit_summary(&result);
    let report = TransitReport { result, summary };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn parse_moment(text: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("invalid RFC3339 timestamp {text}"))?
        .with_timezone(&Utc))
}
