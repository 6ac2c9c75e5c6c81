use urania::aspects::{angular_separation, Aspect, AspectCalculator, AspectKind};
use urania::CelestialBody;

#[test]
fn test_angular_separation_examples() {
    assert_eq!(angular_separation(10.0, 10.0), 0.0);
    assert_eq!(angular_separation(10.0, 100.0), 90.0);
    assert_eq!(angular_separation(350.0, 10.0), 20.0);
    assert_eq!(angular_separation(0.0, 180.0), 180.0);
}

#[test]
fn test_angular_separation_symmetric_and_bounded() {
    let samples = [0.0, 0.5, 29.9, 90.0, 179.99, 180.0, 180.01, 271.3, 359.9];
    for &a in &samples {
        for &b in &samples {
            let ab = angular_separation(a, b);
            assert_eq!(ab, angular_separation(b, a));
            assert!((0.0..=180.0).contains(&ab), "{a} vs {b} gave {ab}");
        }
    }
}

#[test]
fn test_calculate_aspect_conjunction() {
    let calculator = AspectCalculator::new();

    // Two planets within the 8 degree conjunction orb
    let matches = calculator.classify(100.0, 102.0);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, AspectKind::Conjunction);
    assert!(matches[0].orb <= 8.0);
}

#[test]
fn test_conjunction_across_zero() {
    let matches = AspectCalculator::new().classify(357.0, 3.0);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, AspectKind::Conjunction);
    assert!((matches[0].orb - 6.0).abs() < 1e-9);
}

#[test]
fn test_calculate_aspect_opposition() {
    let calculator = AspectCalculator::new();

    // 178 degrees apart
    let matches = calculator.classify(100.0, 278.0);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, AspectKind::Opposition);
    assert!((matches[0].orb - 2.0).abs() < 1e-9);
}

#[test]
fn test_gap_between_windows_matches_nothing() {
    let calculator = AspectCalculator::new();
    assert!(calculator.classify(0.0, 40.0).is_empty());
    assert!(calculator.classify(200.0, 160.0).is_empty());
    assert!(calculator.classify(0.0, 150.0).is_empty());
}

#[test]
fn test_orb_limit_is_inclusive() {
    let calculator = AspectCalculator::new();
    let matches = calculator.classify(0.0, 98.0);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, AspectKind::Square);
    assert_eq!(matches[0].orb, 8.0);

    assert!(calculator.classify(0.0, 98.5).is_empty());
}

#[test]
fn test_aspect_table() {
    let table: Vec<_> = AspectKind::ALL
        .iter()
        .map(|k| (k.name(), k.exact_angle(), k.max_orb()))
        .collect();
    assert_eq!(
        table,
        vec![
            ("conjunction", 0.0, 8.0),
            ("sextile", 60.0, 6.0),
            ("square", 90.0, 8.0),
            ("trine", 120.0, 8.0),
            ("opposition", 180.0, 8.0),
        ]
    );
}

#[test]
fn test_classify_matches_every_row_independently() {
    // Sweep every separation and check each row against its own window.
    let calculator = AspectCalculator::new();
    let mut sep = 0.0;
    while sep <= 180.0 {
        let matches = calculator.classify(0.0, sep);
        for kind in AspectKind::ALL {
            let expected = (sep - kind.exact_angle()).abs() <= kind.max_orb();
            let found = matches.iter().any(|m| m.kind == kind);
            assert_eq!(expected, found, "{kind} at separation {sep}");
        }
        sep += 0.25;
    }
}

#[test]
fn test_exact_threshold() {
    let aspect = |orb| Aspect {
        kind: AspectKind::Trine,
        transiting_body: CelestialBody::Jupiter,
        natal_body: CelestialBody::Sun,
        orb,
    };
    assert!(aspect(0.0).is_exact());
    assert!(aspect(0.09).is_exact());
    assert!(!aspect(0.1).is_exact());
    assert!(!aspect(2.5).is_exact());
}
