use std::str::FromStr;

use crate::prelude::{Epoch, Footprint, Product, StateVectors, Unit, Vector3};

/// Circular polar test orbit (meters)
const ORBIT_RADIUS_M: f64 = 7.07E6;

/// Angular rate (rad/s) of the test orbit
const ANGULAR_RATE: f64 = 1.062E-3;

/// Acquisition start, relative to the ascending node (s)
const START_TIME_S: f64 = 600.0;

/// Acquisition duration (s)
const DURATION_S: f64 = 20.0;

/// State vectors sampling, relative to the ascending node (s)
const SV_PRE_S: f64 = 590.0;
const SV_POST_S: f64 = 610.0;

/// Synthetic repeat pass orbit. The satellite flies over the node longitude,
/// optionally shifted along the orbit plane normal (cross track).
/// The reference ground position lies in the orbit plane, so the
/// perpendicular baseline between two [TestOrbit]s sharing a node longitude
/// is the difference of their cross track offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOrbit {
    /// Ascending node longitude (degrees)
    pub node_longitude_deg: f64,
    /// Offset (meters) along the orbit plane normal
    pub cross_track_m: f64,
    /// State vectors sampling delay (seconds)
    pub sv_shift_s: f64,
}

impl TestOrbit {
    pub fn new(node_longitude_deg: f64) -> Self {
        Self {
            node_longitude_deg,
            cross_track_m: 0.0,
            sv_shift_s: 0.0,
        }
    }

    pub fn with_cross_track(&self, meters: f64) -> Self {
        let mut s = *self;
        s.cross_track_m = meters;
        s
    }

    pub fn with_sv_shift(&self, seconds: f64) -> Self {
        let mut s = *self;
        s.sv_shift_s = seconds;
        s
    }

    fn normal(&self) -> Vector3<f64> {
        let (sin_node, cos_node) = self.node_longitude_deg.to_radians().sin_cos();
        Vector3::new(-sin_node, cos_node, 0.0)
    }

    /// Earth fixed position at orbital time `t` (s)
    pub fn position(&self, t: f64) -> Vector3<f64> {
        let (sin_node, cos_node) = self.node_longitude_deg.to_radians().sin_cos();
        let (sin_t, cos_t) = (ANGULAR_RATE * t).sin_cos();
        ORBIT_RADIUS_M * Vector3::new(cos_t * cos_node, cos_t * sin_node, sin_t)
            + self.normal() * self.cross_track_m
    }

    /// Earth fixed velocity at orbital time `t` (s)
    pub fn velocity(&self, t: f64) -> Vector3<f64> {
        let (sin_node, cos_node) = self.node_longitude_deg.to_radians().sin_cos();
        let (sin_t, cos_t) = (ANGULAR_RATE * t).sin_cos();
        ORBIT_RADIUS_M * ANGULAR_RATE * Vector3::new(-sin_t * cos_node, -sin_t * sin_node, cos_t)
    }

    /// Latitude (degrees) overflown at acquisition start
    pub fn center_latitude(&self) -> f64 {
        (ANGULAR_RATE * START_TIME_S).to_degrees()
    }

    /// Sentinel-1 like burst acquired on `date` ("%Y-%m-%d"), at 10:00 UTC.
    pub fn product(&self, scene_name: &str, date: &str) -> Product {
        let start = Epoch::from_str(&format!("{}T10:00:00 UTC", date))
            .unwrap_or_else(|e| panic!("invalid test date \"{}\": {}", date, e));

        let stop = start + DURATION_S * Unit::Second;
        let node = start - START_TIME_S * Unit::Second;

        let t_pre = SV_PRE_S + self.sv_shift_s;
        let t_post = SV_POST_S + self.sv_shift_s;

        let state_vectors = StateVectors::new(
            (
                node + t_pre * Unit::Second,
                self.position(t_pre),
                self.velocity(t_pre),
            ),
            (
                node + t_post * Unit::Second,
                self.position(t_post),
                self.velocity(t_post),
            ),
        );

        let (lat, lon) = (self.center_latitude(), self.node_longitude_deg);

        Product::new(scene_name, start, stop)
            .with_platform("SENTINEL-1A")
            .with_beam_mode("IW")
            .with_polarization("VV+VH")
            .with_processing_level("BURST")
            .with_flight_direction("ASCENDING")
            .with_path_number(1)
            .with_center(lat, lon)
            .with_footprint(Footprint::from_bounds(
                lon - 0.5,
                lat - 0.5,
                lon + 0.5,
                lat + 0.5,
            ))
            .with_ephemeris(state_vectors, node)
    }
}
