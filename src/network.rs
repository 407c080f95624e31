//! Small baseline subset (SBAS) networks
use chrono::NaiveDate;

use crate::{
    cfg::SbasConfig,
    constants::DAYS_PER_YEAR,
    date::MonthDay,
    pair::Pair,
    prelude::{Error, Product},
    stack::{PairFilter, Stack},
};

/// SBAS pair selection: short temporal baselines, plus year long
/// "bridge" pairs anchored on an anniversary date. Bridges connect
/// seasonal clusters that a winter gap would otherwise disconnect.
#[derive(Debug, Clone, PartialEq)]
pub struct SbasFilter {
    cfg: SbasConfig,
}

impl SbasFilter {
    pub fn new(cfg: SbasConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &SbasConfig {
        &self.cfg
    }

    fn in_season(&self, date: NaiveDate) -> bool {
        match &self.cfg.season {
            Some((start, end)) => MonthDay::window_contains(start, end, date),
            None => true,
        }
    }

    /// True if this pair qualifies as a bridge pair
    pub fn is_bridge(&self, pair: &Pair) -> bool {
        let target = match self.cfg.bridge_target_date {
            Some(target) => target,
            None => return false,
        };

        let threshold = self.cfg.temporal_baseline;
        if target.days_to_nearest(pair.reference_date()) > threshold {
            return false;
        }

        let days = pair.temporal();
        (1..=self.cfg.bridge_year_threshold as i64).any(|years| {
            let span = years * DAYS_PER_YEAR;
            span - threshold <= days && days <= span + threshold
        })
    }
}

impl PairFilter for SbasFilter {
    fn admits(&self, pair: &Pair) -> bool {
        if !self.in_season(pair.reference_date()) || !self.in_season(pair.secondary_date()) {
            return false;
        }

        if let Some(max) = self.cfg.perpendicular_baseline {
            match pair.perpendicular() {
                Some(bperp) if bperp.abs() <= max => {},
                _ => return false,
            }
        }

        pair.temporal() <= self.cfg.temporal_baseline || self.is_bridge(pair)
    }
}

/// SBAS [Stack]
pub type Network = Stack<SbasFilter>;

impl Stack<SbasFilter> {
    /// Builds an SBAS [Network] of `geo_reference`, from its candidates.
    pub fn sbas(
        geo_reference: Product,
        candidates: Vec<Product>,
        cfg: SbasConfig,
    ) -> Result<Self, Error> {
        Self::with_filter(geo_reference, candidates, SbasFilter::new(cfg))
    }

    pub fn config(&self) -> &SbasConfig {
        self.filter().config()
    }
}
