//! Planar geometry helpers
//!
//! All sketch geometry is double precision. Coordinates are taken 1:1 from
//! the drawing space; no axis is inverted anywhere in the crate.

pub mod bezier;

use glam::DVec2;
use serde::{Deserialize, Serialize};

pub use bezier::{CubicBezier, from_kurbo, to_kurbo};

/// A point in drawing space
pub type Point = DVec2;

/// Distance below which two points are considered coincident
pub const POINT_EPSILON: f64 = 1e-6;

/// Check whether two points coincide within [`POINT_EPSILON`]
pub fn points_equal(a: DVec2, b: DVec2) -> bool {
    a.distance_squared(b) <= POINT_EPSILON * POINT_EPSILON
}

/// Normalize an angle in degrees to `[0, 360)`
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Angle of `point` as seen from `center`, in degrees within `[0, 360)`
pub fn angle_degrees(center: DVec2, point: DVec2) -> f64 {
    let d = point - center;
    normalize_degrees(d.y.atan2(d.x).to_degrees())
}

/// Point on a circle at the given angle in degrees
pub fn point_on_circle(center: DVec2, radius: f64, degrees: f64) -> DVec2 {
    let rad = degrees.to_radians();
    center + DVec2::new(rad.cos(), rad.sin()) * radius
}

/// Check that every coordinate of a point is finite
pub fn is_finite_point(p: DVec2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner
    pub min: DVec2,
    /// Maximum corner
    pub max: DVec2,
}

impl Bounds {
    /// Create bounds from two corners in any order
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest bounds enclosing all points, `None` when empty
    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |b, p| b.include(p)))
    }

    /// Grow the bounds to include a point
    pub fn include(self, p: DVec2) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Grow the bounds by `margin` on every side
    pub fn expand(self, margin: f64) -> Self {
        Self {
            min: self.min - DVec2::splat(margin),
            max: self.max + DVec2::splat(margin),
        }
    }

    /// Size of the bounds
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// Check whether two bounds touch or overlap
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Check whether a point lies inside (inclusive)
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
