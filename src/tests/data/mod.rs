mod orbits;
pub use orbits::TestOrbit;

use std::str::FromStr;

use crate::prelude::{Baseline, Epoch, NaiveDate, Product, Unit};

/// Parses a test calendar day ("%Y-%m-%d")
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .unwrap_or_else(|e| panic!("invalid test date \"{}\": {}", s, e))
}

/// Ephemeris based test [Product] on the default test orbit,
/// `cross_track_m` away from the reference track.
pub fn sentinel(scene_name: &str, date: &str, cross_track_m: f64) -> Product {
    TestOrbit::new(0.0)
        .with_cross_track(cross_track_m)
        .product(scene_name, date)
}

/// Builds one [sentinel] product per acquisition day, all on the reference track.
pub fn sentinel_series(dates: &[&str]) -> Vec<Product> {
    dates
        .iter()
        .enumerate()
        .map(|(i, date)| sentinel(&format!("S1_{:02}", i), date, 10.0 * i as f64))
        .collect()
}

/// ALOS like [Product], carrying a pre-calculated baseline
pub fn precalculated(scene_name: &str, date: &str, insar_baseline: Option<f64>) -> Product {
    let start = Epoch::from_str(&format!("{}T03:00:00 UTC", date))
        .unwrap_or_else(|e| panic!("invalid test date \"{}\": {}", date, e));

    let product = Product::new(scene_name, start, start + 15.0 * Unit::Second)
        .with_platform("ALOS")
        .with_beam_mode("FBS")
        .with_polarization("HH")
        .with_processing_level("L1.0")
        .with_center(35.0, 139.0);

    match insar_baseline {
        Some(value) => product.with_insar_baseline(value),
        None => product.with_baseline(Some(Baseline::Precalculated {
            insar_baseline: None,
        })),
    }
}
