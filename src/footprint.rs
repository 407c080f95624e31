//! Acquisition footprints.
//!
//! SAR frames and bursts are convex quadrilaterals in (longitude, latitude)
//! space. Merging is done through the convex hull and intersecting through
//! convex clipping, which is exact for those shapes.
use itertools::Itertools;
use nalgebra::Vector2;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Surfaces below this value (square degrees) are considered empty
const EMPTY_AREA_DEG2: f64 = 1.0E-12;

/// Closed polygon, stored counter-clockwise without repeating the first vertex.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<(f64, f64)>"))]
pub struct Footprint {
    exterior: Vec<Vector2<f64>>,
}

fn cross(o: &Vector2<f64>, a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn signed_area(ring: &[Vector2<f64>]) -> f64 {
    ring.iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<f64>()
        / 2.0
}

impl From<Vec<(f64, f64)>> for Footprint {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(&points)
    }
}

impl Footprint {
    /// Builds a [Footprint] from (longitude, latitude) vertices, in degrees.
    /// The ring may be closed (last = first) and either oriented.
    pub fn new(points: &[(f64, f64)]) -> Self {
        let mut exterior = points
            .iter()
            .map(|(lon, lat)| Vector2::new(*lon, *lat))
            .dedup()
            .collect::<Vec<_>>();

        if exterior.len() > 1 && exterior.first() == exterior.last() {
            exterior.pop();
        }
        if signed_area(&exterior) < 0.0 {
            exterior.reverse();
        }
        Self { exterior }
    }

    /// Axis aligned (lon, lat) box
    pub fn from_bounds(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self::new(&[
            (min_lon, min_lat),
            (max_lon, min_lat),
            (max_lon, max_lat),
            (min_lon, max_lat),
        ])
    }

    /// Vertices, counter-clockwise
    pub fn exterior(&self) -> &[Vector2<f64>] {
        &self.exterior
    }

    /// Surface in square degrees
    pub fn area(&self) -> f64 {
        signed_area(&self.exterior).abs()
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.len() < 3 || self.area() < EMPTY_AREA_DEG2
    }

    /// Returns (longitude, latitude) of the area centroid.
    /// Degenerated footprints return their vertex average.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.exterior.is_empty() {
            return None;
        }
        let area = signed_area(&self.exterior);
        if area.abs() < EMPTY_AREA_DEG2 {
            let n = self.exterior.len() as f64;
            let sum = self
                .exterior
                .iter()
                .fold(Vector2::<f64>::zeros(), |acc, p| acc + p);
            return Some((sum.x / n, sum.y / n));
        }
        let (mut cx, mut cy) = (0.0, 0.0);
        for (a, b) in self.exterior.iter().circular_tuple_windows() {
            let k = a.x * b.y - b.x * a.y;
            cx += (a.x + b.x) * k;
            cy += (a.y + b.y) * k;
        }
        Some((cx / (6.0 * area), cy / (6.0 * area)))
    }

    /// Convex hull of all given footprints (merged and simplified outline).
    pub fn merge<'a, I>(footprints: I) -> Self
    where
        I: IntoIterator<Item = &'a Footprint>,
    {
        let points = footprints
            .into_iter()
            .flat_map(|fp| fp.exterior.iter().copied())
            .sorted_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)))
            .dedup()
            .collect::<Vec<_>>();

        if points.len() < 3 {
            return Self { exterior: points };
        }

        // monotone chain
        let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(points.len());
        for p in points.iter() {
            while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
            {
                lower.pop();
            }
            lower.push(*p);
        }

        let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(points.len());
        for p in points.iter().rev() {
            while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
            {
                upper.pop();
            }
            upper.push(*p);
        }

        lower.pop();
        upper.pop();
        lower.extend(upper);
        Self { exterior: lower }
    }

    /// Common surface of both footprints, if any.
    /// `other` is used as clipping window and must be convex.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if self.is_empty() || other.is_empty() {
            return None;
        }

        let mut output = self.exterior.clone();

        for (c0, c1) in other.exterior.iter().circular_tuple_windows() {
            if output.is_empty() {
                break;
            }
            let input = std::mem::take(&mut output);
            let inside = |p: &Vector2<f64>| cross(c0, c1, p) >= 0.0;

            for (prev, curr) in input.iter().circular_tuple_windows() {
                let (prev_in, curr_in) = (inside(prev), inside(curr));
                if prev_in != curr_in {
                    // edge crosses the clipping line
                    let d_prev = cross(c0, c1, prev);
                    let d_curr = cross(c0, c1, curr);
                    let t = d_prev / (d_prev - d_curr);
                    output.push(prev + (curr - prev) * t);
                }
                if curr_in {
                    output.push(*curr);
                }
            }
        }

        let clipped = Self::new(&output.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>());
        if clipped.is_empty() {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// Surface shared by all footprints, if any.
    pub fn intersect_all<'a, I>(footprints: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Footprint>,
    {
        let mut iter = footprints.into_iter();
        let first = iter.next()?.clone();
        iter.try_fold(first, |acc, fp| acc.intersection(fp))
    }
}
