#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod cfg;
mod coherence;
mod constants;
mod date;
mod error;
mod footprint;
mod group;
mod network;
mod pair;
mod product;
mod stack;

pub mod baseline;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::baseline::{
        calculate_temporal_baselines, find_new_reference, get_baseline_from_stack,
        geodetic::calculate_perpendicular_baselines, is_usable_reference,
        precalculated::offset_perpendicular_baselines, Warning,
    };
    pub use crate::cfg::{NetworkConfig, SbasConfig};
    pub use crate::coherence::{CoherenceSource, Season};
    pub use crate::date::{DateLike, MonthDay};
    pub use crate::error::Error;
    pub use crate::footprint::Footprint;
    pub use crate::group::{GroupPair, GroupStack, PairNetwork, ProductGroup};
    pub use crate::network::{Network, SbasFilter};
    pub use crate::pair::{DatePair, Pair};
    pub use crate::product::{
        Baseline, BaselineKind, Ephemeris, Product, RelativeTimes, StateVectors,
    };
    pub use crate::stack::{PairFilter, Stack, Unfiltered};
    // re-export
    pub use chrono::NaiveDate;
    pub use hifitime::{Duration, Epoch, TimeScale, Unit};
    pub use nalgebra::Vector3;
}
