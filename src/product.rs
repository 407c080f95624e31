//! Acquisition records, as delivered by the catalog search layer.
use chrono::NaiveDate;
use itertools::Itertools;

use crate::{
    date::epoch_date,
    footprint::Footprint,
    prelude::{Epoch, Vector3},
};

/// Raw state vector payload. Any missing field disables
/// the ephemeris based baseline calculation for this product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateVectors {
    /// Position (meters, earth fixed) before the acquisition
    pub pre_position: Option<Vector3<f64>>,
    /// Position (meters, earth fixed) after the acquisition
    pub post_position: Option<Vector3<f64>>,
    /// Velocity (m/s) before the acquisition
    pub pre_velocity: Option<Vector3<f64>>,
    /// Velocity (m/s) after the acquisition
    pub post_velocity: Option<Vector3<f64>>,
    /// Sampling instant of the "pre" samples
    pub pre_position_time: Option<Epoch>,
    /// Sampling instant of the "post" samples
    pub post_position_time: Option<Epoch>,
}

impl StateVectors {
    /// Complete pre and post samples
    pub fn new(
        pre: (Epoch, Vector3<f64>, Vector3<f64>),
        post: (Epoch, Vector3<f64>, Vector3<f64>),
    ) -> Self {
        Self {
            pre_position_time: Some(pre.0),
            pre_position: Some(pre.1),
            pre_velocity: Some(pre.2),
            post_position_time: Some(post.0),
            post_position: Some(post.1),
            post_velocity: Some(post.2),
        }
    }

    /// True when all four vectors are present
    pub fn is_complete(&self) -> bool {
        self.pre_position.is_some()
            && self.post_position.is_some()
            && self.pre_velocity.is_some()
            && self.post_velocity.is_some()
    }
}

/// Ephemeris based baseline payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ephemeris {
    pub state_vectors: StateVectors,
    /// Orbital phase origin
    pub ascending_node_time: Option<Epoch>,
}

/// Baseline payload attached to a [Product]
#[derive(Debug, Clone, PartialEq)]
pub enum Baseline {
    /// Orbital state vectors, the perpendicular baseline is computed geometrically
    Ephemeris(Ephemeris),
    /// Single scalar value, relative to an arbitrary platform specific zero
    Precalculated { insar_baseline: Option<f64> },
}

/// Baseline calculation strategy of a platform
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BaselineKind {
    Ephemeris,
    Precalculated,
}

/// Acquisition times expressed relative to the ascending node (seconds)
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RelativeTimes {
    pub start: f64,
    pub center: f64,
    pub end: f64,
    pub sv_pre: f64,
    pub sv_post: f64,
}

/// SAR acquisition
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique scene name
    pub scene_name: String,
    /// Acquisition start
    pub start_time: Epoch,
    /// Acquisition end
    pub stop_time: Epoch,
    pub platform: String,
    /// Absolute orbit number
    pub orbit: u32,
    /// Relative orbit (path) number
    pub path_number: u32,
    pub beam_mode: String,
    /// Polarization descriptor, like "VV+VH"
    pub polarization: String,
    pub processing_level: String,
    pub flight_direction: String,
    /// Scene center as (latitude, longitude), degrees
    pub center: Option<(f64, f64)>,
    pub footprint: Footprint,
    pub baseline: Option<Baseline>,
    pub(crate) relative_times: Option<RelativeTimes>,
    pub(crate) no_state_vectors: bool,
    pub(crate) perpendicular_baseline: Option<f64>,
    pub(crate) temporal_baseline: Option<i64>,
}

impl Product {
    /// Builds a bare [Product]. Use the `with_` methods to describe it further.
    pub fn new(scene_name: &str, start_time: Epoch, stop_time: Epoch) -> Self {
        Self {
            scene_name: scene_name.to_string(),
            start_time,
            stop_time,
            orbit: 0,
            path_number: 0,
            center: None,
            baseline: None,
            platform: Default::default(),
            beam_mode: Default::default(),
            footprint: Default::default(),
            polarization: Default::default(),
            relative_times: Default::default(),
            processing_level: Default::default(),
            flight_direction: Default::default(),
            no_state_vectors: Default::default(),
            temporal_baseline: Default::default(),
            perpendicular_baseline: Default::default(),
        }
    }

    pub fn with_platform(&self, platform: &str) -> Self {
        let mut s = self.clone();
        s.platform = platform.to_string();
        s
    }

    pub fn with_orbit(&self, orbit: u32) -> Self {
        let mut s = self.clone();
        s.orbit = orbit;
        s
    }

    pub fn with_path_number(&self, path_number: u32) -> Self {
        let mut s = self.clone();
        s.path_number = path_number;
        s
    }

    pub fn with_beam_mode(&self, beam_mode: &str) -> Self {
        let mut s = self.clone();
        s.beam_mode = beam_mode.to_string();
        s
    }

    pub fn with_polarization(&self, polarization: &str) -> Self {
        let mut s = self.clone();
        s.polarization = polarization.to_string();
        s
    }

    pub fn with_processing_level(&self, processing_level: &str) -> Self {
        let mut s = self.clone();
        s.processing_level = processing_level.to_string();
        s
    }

    pub fn with_flight_direction(&self, flight_direction: &str) -> Self {
        let mut s = self.clone();
        s.flight_direction = flight_direction.to_string();
        s
    }

    /// Define scene center (degrees)
    pub fn with_center(&self, latitude: f64, longitude: f64) -> Self {
        let mut s = self.clone();
        s.center = Some((latitude, longitude));
        s
    }

    pub fn with_footprint(&self, footprint: Footprint) -> Self {
        let mut s = self.clone();
        s.footprint = footprint;
        s
    }

    pub fn with_ephemeris(&self, state_vectors: StateVectors, ascending_node_time: Epoch) -> Self {
        let mut s = self.clone();
        s.baseline = Some(Baseline::Ephemeris(Ephemeris {
            state_vectors,
            ascending_node_time: Some(ascending_node_time),
        }));
        s
    }

    pub fn with_insar_baseline(&self, insar_baseline: f64) -> Self {
        let mut s = self.clone();
        s.baseline = Some(Baseline::Precalculated {
            insar_baseline: Some(insar_baseline),
        });
        s
    }

    pub fn with_baseline(&self, baseline: Option<Baseline>) -> Self {
        let mut s = self.clone();
        s.baseline = baseline;
        s
    }

    /// Mid acquisition instant
    pub fn center_time(&self) -> Epoch {
        self.start_time + (self.stop_time - self.start_time) * 0.5
    }

    /// Acquisition day (UTC)
    pub fn date(&self) -> NaiveDate {
        epoch_date(self.start_time)
    }

    /// Scene center as (latitude, longitude), falling back to the footprint centroid
    pub fn center_lat_lon(&self) -> Option<(f64, f64)> {
        self.center
            .or_else(|| self.footprint.centroid().map(|(lon, lat)| (lat, lon)))
    }

    /// Individual polarization channels, "VV+VH" gives ["VH", "VV"]
    pub fn polarizations(&self) -> Vec<String> {
        self.polarization
            .split(['+', '/', ',', ' '])
            .map(|pol| pol.trim().to_uppercase())
            .filter(|pol| !pol.is_empty())
            .sorted()
            .dedup()
            .collect()
    }

    pub fn baseline_kind(&self) -> Option<BaselineKind> {
        match self.baseline {
            Some(Baseline::Ephemeris(_)) => Some(BaselineKind::Ephemeris),
            Some(Baseline::Precalculated { .. }) => Some(BaselineKind::Precalculated),
            None => None,
        }
    }

    pub fn ephemeris(&self) -> Option<&Ephemeris> {
        match &self.baseline {
            Some(Baseline::Ephemeris(ephemeris)) => Some(ephemeris),
            _ => None,
        }
    }

    /// Pre-calculated scalar baseline, if any
    pub fn insar_baseline(&self) -> Option<f64> {
        match self.baseline {
            Some(Baseline::Precalculated { insar_baseline }) => insar_baseline,
            _ => None,
        }
    }

    /// True when ephemeris are complete enough to contribute to baseline calculations
    pub fn has_state_vectors(&self) -> bool {
        self.ephemeris()
            .map(|eph| {
                eph.state_vectors.is_complete()
                    && eph.ascending_node_time.is_some()
                    && eph.state_vectors.pre_position_time.is_some()
                    && eph.state_vectors.post_position_time.is_some()
            })
            .unwrap_or(false)
    }

    /// Whether this [Product] may serve as baseline reference
    pub fn is_valid_reference(&self) -> bool {
        match self.baseline_kind() {
            Some(BaselineKind::Ephemeris) => self.has_state_vectors(),
            Some(BaselineKind::Precalculated) => self.insar_baseline().is_some(),
            None => false,
        }
    }

    /// Perpendicular baseline (meters) to the reference of the latest calculation.
    pub fn perpendicular_baseline(&self) -> Option<f64> {
        self.perpendicular_baseline
    }

    /// Temporal baseline (days) to the reference of the latest calculation.
    pub fn temporal_baseline(&self) -> Option<i64> {
        self.temporal_baseline
    }

    /// Orbital relative times, resolved by the latest ephemeris calculation
    pub fn relative_times(&self) -> Option<RelativeTimes> {
        self.relative_times
    }

    /// True if the latest ephemeris calculation flagged missing state vectors
    pub fn no_state_vectors(&self) -> bool {
        self.no_state_vectors
    }

    /// Metadata only records never carry usable baselines
    pub(crate) fn is_metadata(&self) -> bool {
        self.processing_level
            .to_uppercase()
            .starts_with("METADATA")
    }
}
