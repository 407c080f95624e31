//! State vector interpolation.
//!
//! Products carry a single pair of state vectors bracketing the acquisition.
//! Time is expressed as orbital phase: seconds since the ascending node of
//! the product's own orbit, so that two products acquired on different orbits
//! are compared at the same position along their (repeated) track.
use log::debug;

use crate::prelude::{Product, RelativeTimes, Vector3};

/// Linear interpolation
pub fn lerp(p0: f64, p1: f64, x: f64) -> f64 {
    p0 * (1.0 - x) + p1 * x
}

/// Componentwise linear interpolation
pub fn lerp_vector(p0: &Vector3<f64>, p1: &Vector3<f64>, x: f64) -> Vector3<f64> {
    Vector3::new(lerp(p0.x, p1.x, x), lerp(p0.y, p1.y, x), lerp(p0.z, p1.z, x))
}

/// Orbital time (relative to ascending node) at which both products are compared.
///
/// Whenever one of the reference samples coincides with the shared window,
/// that instant is selected so the reference vectors are used as is.
pub fn shared_orbital_time(reference: &RelativeTimes, secondary: &RelativeTimes) -> f64 {
    let start = reference.sv_pre.max(secondary.sv_pre);
    let end = reference.sv_post.max(secondary.sv_post);
    if start == reference.sv_pre {
        start
    } else if end == reference.sv_post {
        end
    } else {
        start
    }
}

/// Pre and post orbital samples of a [Product], in orbital time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalSamples {
    pub t_pre: f64,
    pub t_post: f64,
    pub pre_position: Vector3<f64>,
    pub post_position: Vector3<f64>,
    pub pre_velocity: Vector3<f64>,
    pub post_velocity: Vector3<f64>,
}

impl OrbitalSamples {
    /// Resolves the [OrbitalSamples] and [RelativeTimes] of this [Product].
    /// Returns None if ephemeris are missing or incomplete.
    pub fn from_product(product: &Product) -> Option<(Self, RelativeTimes)> {
        let ephemeris = product.ephemeris()?;
        let node = ephemeris.ascending_node_time?;
        let sv = &ephemeris.state_vectors;

        let times = RelativeTimes {
            start: (product.start_time - node).to_seconds(),
            center: (product.center_time() - node).to_seconds(),
            end: (product.stop_time - node).to_seconds(),
            sv_pre: (sv.pre_position_time? - node).to_seconds(),
            sv_post: (sv.post_position_time? - node).to_seconds(),
        };

        let samples = Self {
            t_pre: times.sv_pre,
            t_post: times.sv_post,
            pre_position: sv.pre_position?,
            post_position: sv.post_position?,
            pre_velocity: sv.pre_velocity?,
            post_velocity: sv.post_velocity?,
        };

        Some((samples, times))
    }

    /// Interpolation ratio, None when samples are not separated in time
    fn ratio(&self, t: f64) -> Option<f64> {
        let dt = self.t_post - self.t_pre;
        if dt == 0.0 {
            None
        } else {
            Some((t - self.t_pre) / dt)
        }
    }

    /// Position at orbital time `t`.
    ///
    /// The componentwise interpolation is rescaled to the interpolated
    /// orbital radius. This is an approximation of the orbit curvature,
    /// not a propagation.
    pub fn position_at(&self, t: f64) -> Option<Vector3<f64>> {
        if t == self.t_pre {
            return Some(self.pre_position);
        }
        if t == self.t_post {
            return Some(self.post_position);
        }

        let x = self.ratio(t)?;
        if !(0.0..=1.0).contains(&x) {
            debug!("extrapolating position (x={:.3})", x);
        }

        let position = lerp_vector(&self.pre_position, &self.post_position, x);
        let norm = position.norm();
        if norm == 0.0 {
            return None;
        }

        let radius = lerp(self.pre_position.norm(), self.post_position.norm(), x);
        Some(position * (radius / norm))
    }

    /// Velocity at orbital time `t`
    pub fn velocity_at(&self, t: f64) -> Option<Vector3<f64>> {
        if t == self.t_pre {
            return Some(self.pre_velocity);
        }
        if t == self.t_post {
            return Some(self.post_velocity);
        }
        let x = self.ratio(t)?;
        Some(lerp_vector(&self.pre_velocity, &self.post_velocity, x))
    }
}

#[cfg(test)]
mod test {
    use super::{lerp, shared_orbital_time, OrbitalSamples};
    use crate::prelude::{RelativeTimes, Vector3};

    fn times(sv_pre: f64, sv_post: f64) -> RelativeTimes {
        RelativeTimes {
            sv_pre,
            sv_post,
            ..Default::default()
        }
    }

    #[test]
    fn linear_interpolation() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(lerp(-4.0, 4.0, 0.5), 0.0);
    }

    #[test]
    fn shared_time_selection() {
        // reference pre sample is the latest: used as is
        assert_eq!(shared_orbital_time(&times(10.0, 20.0), &times(5.0, 25.0)), 10.0);
        // reference post sample is the latest end
        assert_eq!(shared_orbital_time(&times(5.0, 30.0), &times(10.0, 25.0)), 30.0);
        // neither: fall back to window start
        assert_eq!(shared_orbital_time(&times(5.0, 20.0), &times(10.0, 25.0)), 10.0);
    }

    #[test]
    fn radius_correction() {
        let r = 7.0E6;
        let samples = OrbitalSamples {
            t_pre: 0.0,
            t_post: 10.0,
            pre_position: Vector3::new(r, 0.0, 0.0),
            post_position: Vector3::new(0.0, r, 0.0),
            pre_velocity: Vector3::new(0.0, 7.5E3, 0.0),
            post_velocity: Vector3::new(-7.5E3, 0.0, 0.0),
        };

        assert_eq!(samples.position_at(0.0), Some(samples.pre_position));
        assert_eq!(samples.position_at(10.0), Some(samples.post_position));

        let mid = samples.position_at(5.0).unwrap();
        // componentwise interpolation would shrink the radius to r/sqrt(2)
        assert!((mid.norm() - r).abs() < 1.0E-6);
        assert!((mid.x - mid.y).abs() < 1.0E-6);

        let vel = samples.velocity_at(5.0).unwrap();
        assert!((vel.x + 3.75E3).abs() < 1.0E-9);
        assert!((vel.y - 3.75E3).abs() < 1.0E-9);
    }

    #[test]
    fn degenerated_samples() {
        let p = Vector3::new(7.0E6, 0.0, 0.0);
        let v = Vector3::new(0.0, 7.5E3, 0.0);
        let samples = OrbitalSamples {
            t_pre: 3.0,
            t_post: 3.0,
            pre_position: p,
            post_position: p,
            pre_velocity: v,
            post_velocity: v,
        };
        assert_eq!(samples.position_at(3.0), Some(p));
        assert!(samples.position_at(4.0).is_none());
        assert!(samples.velocity_at(4.0).is_none());
    }
}
