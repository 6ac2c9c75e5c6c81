use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::{ChartComputer, GeoLocation, HouseSystem, StaticEphemeris, TransitComputer};

fn bench_natal_chart(c: &mut Criterion) {
    let eph = StaticEphemeris::spread(84.3, 37.0).with_equal_houses(201.5);
    let computer = ChartComputer::new(&eph);
    let birth = Utc.with_ymd_and_hms(1990, 6, 15, 14, 30, 0).unwrap();
    let location = GeoLocation::new(52.52, 13.40);

    c.bench_function("calculate_natal_chart", |b| {
        b.iter(|| {
            computer.calculate_natal_chart(
                black_box(birth),
                black_box(location),
                black_box(HouseSystem::Placidus),
            )
        })
    });
}

fn bench_transits(c: &mut Criterion) {
    let eph = StaticEphemeris::spread(84.3, 37.0).with_equal_houses(201.5);
    let birth = Utc.with_ymd_and_hms(1990, 6, 15, 14, 30, 0).unwrap();
    let chart = ChartComputer::new(&eph)
        .calculate_natal_chart(birth, GeoLocation::new(52.52, 13.40), HouseSystem::Placidus)
        .unwrap();

    let sky = StaticEphemeris::spread(12.0, 29.0);
    let computer = TransitComputer::new(&sky);
    let moment = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();

    c.bench_function("calculate_transits", |b| {
        b.iter(|| computer.calculate_transits(black_box(&chart), black_box(Some(moment))))
    });
}

criterion_group!(benches, bench_natal_chart, bench_transits);
criterion_main!(benches);
