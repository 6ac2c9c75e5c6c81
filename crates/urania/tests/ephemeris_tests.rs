use chrono::{TimeZone, Utc};
use urania::ephemeris::datetime_to_julian_day;
use urania::{
    CelestialBody, ChartComputer, EphemerisConfig, EphemerisProvider, ErrorReason, GeoLocation,
    HouseSystem, SwissEphemerisAdapter, TransitComputer, ZodiacSign,
};

fn adapter() -> SwissEphemerisAdapter {
    SwissEphemerisAdapter::new(EphemerisConfig::default()).unwrap()
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_berlin_1990_sun_in_gemini() {
    let adapter = adapter();
    let birth = Utc.with_ymd_and_hms(1990, 6, 15, 14, 30, 0).unwrap();

    let chart = ChartComputer::new(&adapter)
        .calculate_natal_chart(birth, GeoLocation::new(52.52, 13.40), HouseSystem::Placidus)
        .unwrap();

    let sun = chart.position(CelestialBody::Sun).unwrap();
    assert!((60.0..90.0).contains(&sun.absolute_longitude));
    assert_eq!(sun.sign, ZodiacSign::Gemini);
    assert_eq!(chart.body_positions.len(), 10);
    assert!(chart
        .body_positions
        .values()
        .all(|p| matches!(p.house, Some(1..=12))));
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_swiss_julian_day_matches_default_conversion() {
    let adapter = adapter();
    let dt = Utc.with_ymd_and_hms(1990, 6, 15, 14, 30, 15).unwrap();
    assert!((adapter.julian_day(dt) - datetime_to_julian_day(dt)).abs() < 1e-8);
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_placidus_refused_above_polar_circle() {
    let adapter = adapter();
    let jd = datetime_to_julian_day(Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap());

    let err = adapter
        .house_cusps(jd, 78.22, 15.65, HouseSystem::Placidus)
        .unwrap_err();
    assert_eq!(err.reason(), ErrorReason::DegenerateGeometry);

    let houses = adapter
        .house_cusps(jd, 78.22, 15.65, HouseSystem::WholeSign)
        .unwrap();
    assert!(houses.is_cyclically_ordered());
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_transits_now() {
    let adapter = adapter();
    let birth = Utc.with_ymd_and_hms(1990, 6, 15, 14, 30, 0).unwrap();
    let chart = ChartComputer::new(&adapter)
        .calculate_natal_chart(birth, GeoLocation::new(52.52, 13.40), HouseSystem::Placidus)
        .unwrap();

    let result = TransitComputer::new(&adapter)
        .calculate_transits(&chart, None)
        .unwrap();
    for aspect in &result.aspects {
        assert!(aspect.orb <= aspect.kind.max_orb());
    }
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_polar_limit_depends_on_date() {
    let adapter = adapter();
    let jd_1900 = datetime_to_julian_day(Utc.with_ymd_and_hms(1900, 1, 1, 12, 0, 0).unwrap());
    let jd_2025 = datetime_to_julian_day(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap());

    // Polar circle near 66.548 in 1900 and 66.564 in 2025
    let err = adapter
        .house_cusps(jd_1900, 66.555, 25.0, HouseSystem::Koch)
        .unwrap_err();
    assert_eq!(err.reason(), ErrorReason::DegenerateGeometry);

    let houses = adapter
        .house_cusps(jd_2025, 66.555, 25.0, HouseSystem::Placidus)
        .unwrap();
    assert!(houses.is_cyclically_ordered());
}
