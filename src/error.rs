use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A [ProductGroup] can only be formed from at least one product.
    #[error("cannot form a product group from an empty product list")]
    EmptyGroup,

    /// All products of a [ProductGroup] must come from the same platform.
    #[error("product group mixes platforms: {0:?}")]
    MixedPlatforms(Vec<String>),

    /// Sentinel-1 family acquisitions are only grouped at burst level.
    #[error("{platform} products are only supported at BURST level (got {processing_level})")]
    UnsupportedSentinelProduct {
        platform: String,
        processing_level: String,
    },

    /// All products of a [ProductGroup] must share a beam mode.
    #[error("product group mixes beam modes: {0:?}")]
    MixedBeamModes(Vec<String>),

    /// Products of a [ProductGroup] do not share a single polarization.
    #[error("product group shares no common polarization")]
    NoCommonPolarization,

    /// Absolute orbit numbers of a [ProductGroup] span more than one orbit.
    #[error("non contiguous orbits in product group: {0:?}")]
    NonContiguousOrbits(Vec<u32>),

    /// Two consecutive orbit numbers were found, but the acquisitions are too far
    /// apart in time to belong to the same pass.
    #[error("acquisitions on orbits {0} and {1} are {2:.1} minutes apart")]
    PassTimeSpan(u32, u32, f64),

    /// Product footprints have no spatial extent in common.
    #[error("product group footprints do not overlap")]
    NoSpatialOverlap,

    /// Pre-calculated baseline platforms require the reference to carry an insar baseline.
    #[error("{0}: no insar baseline available for pre-calculated dataset")]
    MissingInsarBaseline(String),

    /// Not a single product of the stack has usable state vectors: fatal.
    #[error("no valid state vectors on any product of the stack")]
    NoStateVectorsInStack,

    /// Baseline calculation was requested on an empty stack.
    #[error("no products found matching stack parameters")]
    EmptyStack,

    /// A date like input could not be normalized into a calendar date.
    #[error("invalid date \"{0}\"")]
    InvalidDate(String),

    /// Month-day descriptor is not formatted as MM-DD or does not exist.
    #[error("invalid month-day \"{0}\" (expecting MM-DD)")]
    InvalidMonthDay(String),

    /// Coherence tables are limited in temporal baseline.
    #[error("coherence is only tabulated up to {max} days (got {days})")]
    CoherenceTemporalBaseline { days: i64, max: i64 },

    /// Season name was not recognized
    #[error("unknown season \"{0}\"")]
    UnknownSeason(String),

    /// Pair location cannot be determined (no footprint, no scene center).
    #[error("{0}: unknown scene location")]
    UnknownLocation(String),

    /// The [CoherenceSource] has no sample for this location.
    #[error("no coherence sample at lat={0} lon={1}")]
    MissingCoherence(f64, f64),
}
