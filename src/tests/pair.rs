use std::cell::Cell;

use rstest::*;

use crate::{
    prelude::{CoherenceSource, Error, Pair, Season},
    tests::{date, init_logger, sentinel, TestOrbit},
};

/// Returns a fixed coherence, counting queries
struct TestCoherence {
    value: Option<f64>,
    queries: Cell<usize>,
    last: Cell<Option<(Season, i64)>>,
}

impl TestCoherence {
    fn new(value: Option<f64>) -> Self {
        Self {
            value,
            queries: Cell::new(0),
            last: Cell::new(None),
        }
    }
}

impl CoherenceSource for TestCoherence {
    fn coherence(&self, season: Season, temporal_key: i64, _: f64, _: f64) -> Option<f64> {
        self.queries.set(self.queries.get() + 1);
        self.last.set(Some((season, temporal_key)));
        self.value
    }
}

#[test]
fn pair_ordering() {
    init_logger();

    let early = sentinel("S1_EARLY", "2021-01-01", 0.0);
    let late = sentinel("S1_LATE", "2021-01-13", 120.0);

    let forward = Pair::from_products(early.clone(), late.clone());
    let backward = Pair::from_products(late, early);

    for pair in [&forward, &backward] {
        assert_eq!(pair.reference().scene_name, "S1_EARLY");
        assert_eq!(pair.secondary().scene_name, "S1_LATE");
        assert_eq!(pair.temporal(), 12);
        assert_eq!(pair.perpendicular(), Some(120.0));
        assert_eq!(pair.dates(), (date("2021-01-01"), date("2021-01-13")));
    }
}

#[test]
fn self_pair() {
    init_logger();
    let product = sentinel("S1_SELF", "2021-01-01", 35.0);
    let pair = Pair::from_products(product.clone(), product);
    assert_eq!(pair.perpendicular(), Some(0.0));
    assert_eq!(pair.temporal(), 0);
}

#[test]
fn identical_state_vectors() {
    init_logger();
    let reference = TestOrbit::new(0.0)
        .product("S1_REF", "2021-01-01")
        .with_center(0.0, 0.0);

    let mut secondary = reference.clone();
    secondary.scene_name = "S1_TWIN".to_string();

    let pair = Pair::from_products(reference, secondary);
    assert_eq!(pair.perpendicular(), Some(0.0));
}

#[rstest]
#[case(0.0, 0.0, 75.0, 75.0)]
#[case(0.0, 2.0, -40.0, -40.0)]
#[case(45.0, 0.0, 260.0, 260.0)]
#[case(-120.0, 3.0, 1234.0, 1234.0)]
#[case(10.0, 0.0, -99_999.0, -99_999.0)]
fn known_perpendicular_baselines(
    #[case] node_longitude: f64,
    #[case] sv_shift: f64,
    #[case] cross_track: f64,
    #[case] expected: f64,
) {
    init_logger();
    let orbit = TestOrbit::new(node_longitude);
    let reference = orbit.product("S1_REF", "2021-01-01");
    let secondary = orbit
        .with_cross_track(cross_track)
        .with_sv_shift(sv_shift)
        .product("S1_SEC", "2021-01-13");

    let pair = Pair::from_products(reference, secondary);
    assert_eq!(pair.perpendicular(), Some(expected));
}

#[test]
fn unphysical_baseline() {
    init_logger();
    let reference = sentinel("S1_REF", "2021-01-01", 0.0);
    let secondary = sentinel("S1_SEC", "2021-01-13", 150_000.0);
    let pair = Pair::from_products(reference, secondary);
    assert_eq!(pair.perpendicular(), None);
    assert_eq!(pair.temporal(), 12);
}

#[test]
fn missing_state_vectors() {
    init_logger();
    let reference = sentinel("S1_REF", "2021-01-01", 0.0);
    let secondary = sentinel("S1_SEC", "2021-01-13", 50.0).with_baseline(None);
    let pair = Pair::from_products(reference, secondary);
    assert_eq!(pair.perpendicular(), None);
}

#[test]
fn pair_footprint() {
    let reference = TestOrbit::new(0.0).product("S1_REF", "2021-01-01");
    let secondary = TestOrbit::new(0.5).product("S1_SEC", "2021-01-13");

    let pair = Pair::from_products(reference, secondary);
    let footprint = pair.footprint().unwrap();
    assert!((footprint.area() - 0.5).abs() < 1.0E-9);

    let secondary = TestOrbit::new(10.0).product("S1_FAR", "2021-01-13");
    let pair = Pair::from_products(pair.reference().clone(), secondary);
    assert!(pair.footprint().is_none());
}

#[test]
fn mean_coherence() {
    init_logger();
    let reference = sentinel("S1_REF", "2021-01-01", 0.0);
    let secondary = sentinel("S1_SEC", "2021-01-08", 20.0);
    let pair = Pair::from_products(reference, secondary);

    let source = TestCoherence::new(Some(0.42));
    assert_eq!(pair.estimate_mean_coherence(&source), Ok(0.42));
    assert_eq!(source.last.get(), Some((Season::Winter, 12)));

    // resolved once
    assert_eq!(pair.estimate_mean_coherence(&source), Ok(0.42));
    let other = TestCoherence::new(Some(0.9));
    assert_eq!(pair.estimate_mean_coherence(&other), Ok(0.42));
    assert_eq!(source.queries.get(), 1);
    assert_eq!(other.queries.get(), 0);
}

#[test]
fn coherence_errors() {
    init_logger();
    let reference = sentinel("S1_REF", "2021-06-01", 0.0);

    let long = Pair::from_products(reference.clone(), sentinel("S1_LONG", "2021-08-01", 0.0));
    let source = TestCoherence::new(Some(0.5));
    assert_eq!(
        long.estimate_mean_coherence(&source),
        Err(Error::CoherenceTemporalBaseline { days: 61, max: 48 })
    );
    assert_eq!(source.queries.get(), 0);

    let short = Pair::from_products(reference, sentinel("S1_SHORT", "2021-06-13", 0.0));
    let source = TestCoherence::new(None);
    assert!(matches!(
        short.estimate_mean_coherence(&source),
        Err(Error::MissingCoherence(_, _))
    ));
    assert_eq!(source.last.get(), Some((Season::Summer, 12)));

    // failures are not cached
    let source = TestCoherence::new(Some(0.7));
    assert_eq!(short.estimate_mean_coherence(&source), Ok(0.7));
}
