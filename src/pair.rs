use std::sync::{Arc, OnceLock};

use chrono::NaiveDate;

use crate::{
    baseline::{pair_perpendicular, temporal_days},
    coherence::{temporal_table_key, CoherenceSource, Season},
    prelude::{Error, Footprint, Product},
};

/// (reference, secondary) acquisition days
pub type DatePair = (NaiveDate, NaiveDate);

/// Interferometric pair. The earliest acquisition always serves as reference.
#[derive(Debug, Clone)]
pub struct Pair {
    reference: Arc<Product>,
    secondary: Arc<Product>,
    /// Perpendicular baseline (meters), None when it could not be calculated
    perpendicular: Option<f64>,
    /// Temporal baseline (days), positive or null
    temporal: i64,
    coherence: OnceLock<f64>,
}

impl Pair {
    /// Builds a new [Pair], products may be given in any order.
    pub fn new(lhs: Arc<Product>, rhs: Arc<Product>) -> Self {
        let (reference, secondary) = if rhs.start_time < lhs.start_time {
            (rhs, lhs)
        } else {
            (lhs, rhs)
        };
        let perpendicular = pair_perpendicular(&reference, &secondary);
        let temporal = temporal_days(&reference, &secondary);
        Self {
            reference,
            secondary,
            perpendicular,
            temporal,
            coherence: OnceLock::new(),
        }
    }

    /// Builds a new [Pair] from owned products
    pub fn from_products(lhs: Product, rhs: Product) -> Self {
        Self::new(Arc::new(lhs), Arc::new(rhs))
    }

    pub fn reference(&self) -> &Product {
        &self.reference
    }

    pub fn secondary(&self) -> &Product {
        &self.secondary
    }

    /// Perpendicular baseline in meters
    pub fn perpendicular(&self) -> Option<f64> {
        self.perpendicular
    }

    /// Temporal baseline in days
    pub fn temporal(&self) -> i64 {
        self.temporal
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference.date()
    }

    pub fn secondary_date(&self) -> NaiveDate {
        self.secondary.date()
    }

    pub fn dates(&self) -> DatePair {
        (self.reference_date(), self.secondary_date())
    }

    /// Common surface of both acquisitions
    pub fn footprint(&self) -> Option<Footprint> {
        self.reference
            .footprint
            .intersection(&self.secondary.footprint)
    }

    /// (latitude, longitude) used for location dependent estimates
    fn location(&self) -> Option<(f64, f64)> {
        self.footprint()
            .and_then(|fp| fp.centroid())
            .map(|(lon, lat)| (lat, lon))
            .or_else(|| self.reference.center_lat_lon())
    }

    /// Estimates the mean coherence of this [Pair] from seasonal tables.
    /// The estimate is cached once resolved.
    pub fn estimate_mean_coherence<C: CoherenceSource>(&self, source: &C) -> Result<f64, Error> {
        if let Some(coherence) = self.coherence.get() {
            return Ok(*coherence);
        }

        let key = temporal_table_key(self.temporal)?;
        let season = Season::of(self.reference_date());

        let (lat, lon) = self
            .location()
            .ok_or_else(|| Error::UnknownLocation(self.reference.scene_name.clone()))?;

        let coherence = source
            .coherence(season, key, lat, lon)
            .ok_or(Error::MissingCoherence(lat, lon))?;

        Ok(*self.coherence.get_or_init(|| coherence))
    }
}
