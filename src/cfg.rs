#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::date::MonthDay;

fn default_max_temporal_baseline() -> i64 {
    48
}

fn default_max_perpendicular_baseline() -> f64 {
    200.0
}

fn default_sbas_temporal_baseline() -> i64 {
    12
}

fn default_bridge_year_threshold() -> u32 {
    1
}

/// Thresholds of a grouped [PairNetwork](crate::prelude::PairNetwork)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct NetworkConfig {
    /// Maximal temporal baseline (days), inclusive
    #[cfg_attr(feature = "serde", serde(default = "default_max_temporal_baseline"))]
    pub max_temporal_baseline: i64,
    /// Maximal absolute perpendicular baseline (meters), exclusive
    #[cfg_attr(
        feature = "serde",
        serde(default = "default_max_perpendicular_baseline")
    )]
    pub max_perpendicular_baseline: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_temporal_baseline: default_max_temporal_baseline(),
            max_perpendicular_baseline: default_max_perpendicular_baseline(),
        }
    }
}

impl NetworkConfig {
    pub fn new(max_temporal_baseline: i64, max_perpendicular_baseline: f64) -> Self {
        Self {
            max_temporal_baseline,
            max_perpendicular_baseline,
        }
    }
}

/// Small baseline subset (SBAS) network settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct SbasConfig {
    /// Maximal temporal baseline (days) of regular pairs, inclusive
    #[cfg_attr(feature = "serde", serde(default = "default_sbas_temporal_baseline"))]
    pub temporal_baseline: i64,
    /// Maximal absolute perpendicular baseline (meters), inclusive.
    /// Pairs without perpendicular baseline are rejected when defined.
    #[cfg_attr(feature = "serde", serde(default))]
    pub perpendicular_baseline: Option<f64>,
    /// Anniversary around which year long bridge pairs are allowed
    #[cfg_attr(feature = "serde", serde(default))]
    pub bridge_target_date: Option<MonthDay>,
    /// Number of years a bridge pair may span
    #[cfg_attr(feature = "serde", serde(default = "default_bridge_year_threshold"))]
    pub bridge_year_threshold: u32,
    /// Acquisition window (start, end), possibly wrapping over the new year.
    /// Pairs with one acquisition out of season are rejected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub season: Option<(MonthDay, MonthDay)>,
}

impl Default for SbasConfig {
    fn default() -> Self {
        Self {
            temporal_baseline: default_sbas_temporal_baseline(),
            perpendicular_baseline: None,
            bridge_target_date: None,
            bridge_year_threshold: default_bridge_year_threshold(),
            season: None,
        }
    }
}

impl SbasConfig {
    pub fn with_temporal_baseline(&self, days: i64) -> Self {
        let mut s = self.clone();
        s.temporal_baseline = days;
        s
    }

    pub fn with_perpendicular_baseline(&self, meters: f64) -> Self {
        let mut s = self.clone();
        s.perpendicular_baseline = Some(meters);
        s
    }

    pub fn with_bridge_target_date(&self, target: MonthDay) -> Self {
        let mut s = self.clone();
        s.bridge_target_date = Some(target);
        s
    }

    pub fn with_bridge_year_threshold(&self, years: u32) -> Self {
        let mut s = self.clone();
        s.bridge_year_threshold = years;
        s
    }

    pub fn with_season(&self, start: MonthDay, end: MonthDay) -> Self {
        let mut s = self.clone();
        s.season = Some((start, end));
        s
    }
}
