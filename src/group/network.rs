use chrono::NaiveDate;
use log::debug;

use crate::{
    baseline::{pair_perpendicular, temporal_days},
    cfg::NetworkConfig,
    group::{GroupStack, ProductGroup},
    prelude::Footprint,
};

/// Pair of [ProductGroup]s, the earliest one being the reference.
/// Baselines are calculated between the group representatives.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPair<'a> {
    pub reference: &'a ProductGroup,
    pub secondary: &'a ProductGroup,
    /// Days
    pub temporal_baseline: i64,
    /// Meters
    pub perpendicular_baseline: Option<f64>,
    /// Common surface
    pub footprint: Option<Footprint>,
}

impl<'a> GroupPair<'a> {
    pub fn new(lhs: &'a ProductGroup, rhs: &'a ProductGroup) -> Self {
        let (reference, secondary) = if rhs.start_time() < lhs.start_time() {
            (rhs, lhs)
        } else {
            (lhs, rhs)
        };
        let (ref_product, sec_product) = (reference.representative(), secondary.representative());
        Self {
            reference,
            secondary,
            temporal_baseline: temporal_days(ref_product, sec_product),
            perpendicular_baseline: pair_perpendicular(ref_product, sec_product),
            footprint: reference.footprint().intersection(secondary.footprint()),
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference.date()
    }

    pub fn secondary_date(&self) -> NaiveDate {
        self.secondary.date()
    }
}

/// Interferometric network of a [GroupStack], restricted by
/// temporal and perpendicular baseline thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct PairNetwork<'a> {
    cfg: NetworkConfig,
    /// Retained pairs, sorted by (reference, secondary) dates
    pairs: Vec<GroupPair<'a>>,
}

impl<'a> PairNetwork<'a> {
    pub fn new(stack: &'a GroupStack, cfg: NetworkConfig) -> Self {
        Self {
            cfg,
            pairs: Self::construct_network(stack.groups(), &cfg),
        }
    }

    /// Forms all pairs within thresholds. Groups are chronological,
    /// so secondaries are abandoned as soon as one is too far in time.
    fn construct_network(groups: &'a [ProductGroup], cfg: &NetworkConfig) -> Vec<GroupPair<'a>> {
        let mut pairs = Vec::new();

        for (i, reference) in groups.iter().enumerate() {
            for secondary in groups[i + 1..].iter() {
                let pair = GroupPair::new(reference, secondary);
                if pair.temporal_baseline > cfg.max_temporal_baseline {
                    break;
                }
                match pair.perpendicular_baseline {
                    Some(bperp) if bperp.abs() < cfg.max_perpendicular_baseline => {
                        pairs.push(pair);
                    },
                    bperp => {
                        debug!(
                            "{} - {}: rejected (bperp={:?})",
                            pair.reference_date(),
                            pair.secondary_date(),
                            bperp
                        );
                    },
                }
            }
        }

        pairs.sort_by_key(|pair| (pair.reference_date(), pair.secondary_date()));
        pairs
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.cfg
    }

    /// Retained pairs, sorted by (reference, secondary) dates
    pub fn pairs(&self) -> &[GroupPair<'a>] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// (reference, secondary) dates of all retained pairs
    pub fn dates(&self) -> Vec<(NaiveDate, NaiveDate)> {
        self.pairs
            .iter()
            .map(|pair| (pair.reference_date(), pair.secondary_date()))
            .collect()
    }

    /// Outline of all retained pair footprints
    pub fn union_footprint(&self) -> Footprint {
        Footprint::merge(self.pairs.iter().filter_map(|pair| pair.footprint.as_ref()))
    }

    /// Surface common to all retained pairs
    pub fn intersection_footprint(&self) -> Option<Footprint> {
        if self.pairs.iter().any(|pair| pair.footprint.is_none()) {
            return None;
        }
        Footprint::intersect_all(self.pairs.iter().filter_map(|pair| pair.footprint.as_ref()))
    }
}
