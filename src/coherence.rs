use chrono::{Datelike, NaiveDate};

use crate::{
    constants::{COHERENCE_MAX_TEMPORAL_DAYS, COHERENCE_TEMPORAL_STEP_DAYS},
    prelude::Error,
};

/// Meteorological (northern) seasons, used to select coherence tables
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Season {
    /// December, January, February
    Winter,
    /// March, April, May
    Spring,
    /// June, July, August
    Summer,
    /// September, October, November
    Fall,
}

impl Season {
    /// [Season] of this calendar day
    pub fn of(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Fall,
            _ => Self::Winter,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Winter => write!(f, "winter"),
            Self::Spring => write!(f, "spring"),
            Self::Summer => write!(f, "summer"),
            Self::Fall => write!(f, "fall"),
        }
    }
}

impl std::str::FromStr for Season {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "winter" => Ok(Self::Winter),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" | "autumn" => Ok(Self::Fall),
            _ => Err(Error::UnknownSeason(s.to_string())),
        }
    }
}

/// Coherence tables are indexed by temporal baselines in multiples of 6 days.
/// Returns the table key of this temporal baseline (rounded up, at least one step).
pub fn temporal_table_key(days: i64) -> Result<i64, Error> {
    let days = days.abs();
    let steps = ((days + COHERENCE_TEMPORAL_STEP_DAYS - 1) / COHERENCE_TEMPORAL_STEP_DAYS).max(1);
    let key = steps * COHERENCE_TEMPORAL_STEP_DAYS;
    if key > COHERENCE_MAX_TEMPORAL_DAYS {
        Err(Error::CoherenceTemporalBaseline {
            days,
            max: COHERENCE_MAX_TEMPORAL_DAYS,
        })
    } else {
        Ok(key)
    }
}

/// Any seasonal coherence provider (usually a global raster)
/// should implement the [CoherenceSource] trait.
pub trait CoherenceSource {
    /// Mean coherence expected for `temporal_key` days separation,
    /// on given [Season], at given (latitude, longitude) in degrees.
    fn coherence(
        &self,
        season: Season,
        temporal_key: i64,
        latitude: f64,
        longitude: f64,
    ) -> Option<f64>;
}
