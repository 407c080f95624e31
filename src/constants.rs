/// WGS84 Earth Frame Ellipsoid semi-major axis (meters)
pub const EARTH_SEMI_MAJOR_AXIS_WGS84: f64 = 6378137.0_f64;

/// WGS84 inverse flattening, as used by the baseline calculator
pub const EARTH_INVERSE_FLATTENING: f64 = 298.257224;

/// Squared (1 - flattening) term used by the ground position projection.
/// Both the cosine scaling and the polar term are built on this squared value.
pub const EARTH_FLATTENING_TERM: f64 =
    (1.0 - 1.0 / EARTH_INVERSE_FLATTENING) * (1.0 - 1.0 / EARTH_INVERSE_FLATTENING);

/// Perpendicular baselines larger than this (meters) are physical non sense
pub const MAX_PERPENDICULAR_BASELINE_M: f64 = 100_000.0;

/// Maximal time span between two consecutive orbits of a single pass (minutes)
pub const MAX_PASS_TIME_SPAN_MINUTES: f64 = 5.0;

/// Coherence tables are sampled every 6 days
pub const COHERENCE_TEMPORAL_STEP_DAYS: i64 = 6;

/// Coherence tables stop at 48 days
pub const COHERENCE_MAX_TEMPORAL_DAYS: i64 = 48;

/// Mean length of a year, in days, for bridge pairs
pub const DAYS_PER_YEAR: i64 = 365;
