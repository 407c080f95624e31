//! Single pass acquisition groups
use std::collections::BTreeSet;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::{
    constants::MAX_PASS_TIME_SPAN_MINUTES,
    date::epoch_date,
    prelude::{Epoch, Error, Footprint, Product},
};

mod network;
mod stack;

pub use network::{GroupPair, PairNetwork};
pub use stack::GroupStack;

/// Platforms that are only grouped at burst level
fn is_sentinel_family(platform: &str) -> bool {
    let platform = platform.trim().to_uppercase();
    platform.starts_with("SENTINEL-1") || platform.starts_with("S1")
}

/// Homogeneous set of acquisitions taken during a single satellite pass:
/// same platform and beam mode, one shared polarization at least,
/// consecutive orbit numbers and overlapping footprints.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductGroup {
    /// Products in chronological order
    products: Vec<Product>,
    orbit: u32,
    relative_orbit: u32,
    footprint: Footprint,
    start_time: Epoch,
}

impl ProductGroup {
    /// Validates and builds a new [ProductGroup].
    pub fn new(products: Vec<Product>) -> Result<Self, Error> {
        if products.is_empty() {
            return Err(Error::EmptyGroup);
        }

        let platforms = products
            .iter()
            .map(|p| p.platform.clone())
            .sorted()
            .dedup()
            .collect::<Vec<_>>();
        if platforms.len() > 1 {
            return Err(Error::MixedPlatforms(platforms));
        }

        if is_sentinel_family(&platforms[0]) {
            if let Some(product) = products
                .iter()
                .find(|p| !p.processing_level.eq_ignore_ascii_case("BURST"))
            {
                return Err(Error::UnsupportedSentinelProduct {
                    platform: product.platform.clone(),
                    processing_level: product.processing_level.clone(),
                });
            }
        }

        let beam_modes = products
            .iter()
            .map(|p| p.beam_mode.clone())
            .sorted()
            .dedup()
            .collect::<Vec<_>>();
        if beam_modes.len() > 1 {
            return Err(Error::MixedBeamModes(beam_modes));
        }

        let common = products
            .iter()
            .map(|p| p.polarizations().into_iter().collect::<BTreeSet<_>>())
            .reduce(|common, pols| common.intersection(&pols).cloned().collect())
            .unwrap_or_default();
        if common.is_empty() {
            return Err(Error::NoCommonPolarization);
        }

        Self::check_orbits(&products)?;

        let footprint = Footprint::merge(products.iter().map(|p| &p.footprint));
        if footprint.is_empty() {
            return Err(Error::NoSpatialOverlap);
        }

        let products = products
            .into_iter()
            .sorted_by(|a, b| a.start_time.cmp(&b.start_time))
            .collect::<Vec<_>>();

        Ok(Self {
            orbit: products.iter().map(|p| p.orbit).min().unwrap_or_default(),
            relative_orbit: products[0].path_number,
            start_time: products[0].start_time,
            footprint,
            products,
        })
    }

    /// Orbit numbers may only differ by one, in which case the orbit
    /// rolled over during the pass.
    fn check_orbits(products: &[Product]) -> Result<(), Error> {
        let orbits = products
            .iter()
            .map(|p| p.orbit)
            .sorted()
            .dedup()
            .collect::<Vec<_>>();

        if orbits.len() > 2 || orbits[orbits.len() - 1] - orbits[0] > 1 {
            return Err(Error::NonContiguousOrbits(orbits));
        }

        if let &[lower, upper] = orbits.as_slice() {
            let last_lower = products
                .iter()
                .filter(|p| p.orbit == lower)
                .map(|p| p.start_time)
                .max();
            let first_upper = products
                .iter()
                .filter(|p| p.orbit == upper)
                .map(|p| p.start_time)
                .min();

            if let (Some(last_lower), Some(first_upper)) = (last_lower, first_upper) {
                let minutes = (first_upper - last_lower).to_seconds().abs() / 60.0;
                if minutes > MAX_PASS_TIME_SPAN_MINUTES {
                    return Err(Error::PassTimeSpan(lower, upper, minutes));
                }
            }
        }
        Ok(())
    }

    /// Products in chronological order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Product used for baseline calculations: the earliest one
    pub fn representative(&self) -> &Product {
        &self.products[0]
    }

    /// Absolute orbit (lowest of the pass)
    pub fn orbit(&self) -> u32 {
        self.orbit
    }

    pub fn relative_orbit(&self) -> u32 {
        self.relative_orbit
    }

    pub fn platform(&self) -> &str {
        &self.products[0].platform
    }

    /// Merged outline of all footprints
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Earliest acquisition instant
    pub fn start_time(&self) -> Epoch {
        self.start_time
    }

    /// Earliest acquisition day
    pub fn date(&self) -> NaiveDate {
        epoch_date(self.start_time)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
