//! Ephemeris based perpendicular baselines
use log::{debug, warn};

use crate::{
    baseline::interp::{shared_orbital_time, OrbitalSamples},
    constants::{EARTH_FLATTENING_TERM, EARTH_SEMI_MAJOR_AXIS_WGS84, MAX_PERPENDICULAR_BASELINE_M},
    prelude::{Product, RelativeTimes, Vector3},
};

/// Ground position (meters, earth fixed) of given latitude and longitude (degrees),
/// on the WGS84 ellipsoid surface.
pub fn ground_position(latitude_deg: f64, longitude_deg: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = latitude_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = longitude_deg.to_radians().sin_cos();

    let c = 1.0 / (cos_lat.powi(2) + EARTH_FLATTENING_TERM * sin_lat.powi(2)).sqrt();
    let s = EARTH_FLATTENING_TERM * c;

    Vector3::new(
        EARTH_SEMI_MAJOR_AXIS_WGS84 * c * cos_lat * cos_lon,
        EARTH_SEMI_MAJOR_AXIS_WGS84 * c * cos_lat * sin_lon,
        EARTH_SEMI_MAJOR_AXIS_WGS84 * s * sin_lat,
    )
}

/// Radar geometry of the reference acquisition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamVectors {
    /// Unit vector from the ground position to the satellite
    pub along_beam: Vector3<f64>,
    /// Unit vector normal to both the line of sight and the satellite velocity
    pub up_beam: Vector3<f64>,
}

impl BeamVectors {
    /// Builds [BeamVectors] from the satellite state and target ground position.
    /// Returns None on degenerated geometry.
    pub fn new(
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
        ground: &Vector3<f64>,
    ) -> Option<Self> {
        let along_beam = (position - ground).try_normalize(f64::EPSILON)?;
        let up_beam = velocity.cross(&along_beam).try_normalize(f64::EPSILON)?;
        Some(Self {
            along_beam,
            up_beam,
        })
    }

    /// Projects the secondary satellite position onto the up-beam direction.
    /// Returns the perpendicular baseline in meters, rounded half to even,
    /// or None when the value exceeds physical bounds.
    pub fn perpendicular(&self, ground: &Vector3<f64>, secondary: &Vector3<f64>) -> Option<f64> {
        let perpendicular = self.up_beam.dot(&(secondary - ground)).round_ties_even();
        if perpendicular.abs() > MAX_PERPENDICULAR_BASELINE_M {
            debug!("rejected perpendicular baseline: {}m", perpendicular);
            None
        } else {
            Some(perpendicular)
        }
    }
}

/// Resolved reference geometry, shared by all secondaries
struct ReferenceGeometry {
    samples: OrbitalSamples,
    times: RelativeTimes,
    ground: Vector3<f64>,
}

impl ReferenceGeometry {
    fn new(reference: &Product) -> Option<Self> {
        let (samples, times) = OrbitalSamples::from_product(reference)?;
        let (lat, lon) = reference.center_lat_lon()?;
        Some(Self {
            samples,
            times,
            ground: ground_position(lat, lon),
        })
    }

    fn perpendicular(&self, secondary: &OrbitalSamples, times: &RelativeTimes) -> Option<f64> {
        let t = shared_orbital_time(&self.times, times);

        let position = self.samples.position_at(t)?;
        let velocity = self.samples.velocity_at(t)?;
        let beam = BeamVectors::new(&position, &velocity, &self.ground)?;

        let secondary = secondary.position_at(t)?;
        let perpendicular = beam.perpendicular(&self.ground, &secondary);
        debug!("shared orbital time {:.3}s: bperp={:?}", t, perpendicular);
        perpendicular
    }
}

/// Perpendicular baseline (meters) of `secondary` with respect to `reference`.
/// Both products need complete ephemeris, the reference needs a scene center.
pub fn pair_perpendicular(reference: &Product, secondary: &Product) -> Option<f64> {
    let geometry = ReferenceGeometry::new(reference)?;
    let (samples, times) = OrbitalSamples::from_product(secondary)?;
    geometry.perpendicular(&samples, &times)
}

/// Calculates the perpendicular baseline of all products with respect to
/// the product named `reference_scene`, in place.
///
/// Each product is tagged with its [RelativeTimes] and missing state
/// vectors flag. Products that cannot be resolved end up with no baseline,
/// the reference itself is always set to zero.
pub fn calculate_perpendicular_baselines(reference_scene: &str, products: &mut [Product]) {
    let mut all_samples = Vec::with_capacity(products.len());

    for product in products.iter_mut() {
        let resolved = OrbitalSamples::from_product(product);
        product.no_state_vectors = resolved.is_none();
        product.relative_times = resolved.as_ref().map(|(_, times)| *times);
        product.perpendicular_baseline = if product.scene_name == reference_scene {
            Some(0.0)
        } else {
            None
        };
        all_samples.push(resolved);
    }

    let geometry = products
        .iter()
        .find(|product| product.scene_name == reference_scene)
        .and_then(ReferenceGeometry::new);

    let geometry = match geometry {
        Some(geometry) => geometry,
        None => {
            warn!(
                "{}: reference has no usable state vectors, baselines not calculated",
                reference_scene
            );
            return;
        },
    };

    for (product, resolved) in products.iter_mut().zip(all_samples.iter()) {
        if product.scene_name == reference_scene {
            product.perpendicular_baseline = Some(0.0);
            continue;
        }
        product.perpendicular_baseline = resolved
            .as_ref()
            .and_then(|(samples, times)| geometry.perpendicular(samples, times));
    }
}
