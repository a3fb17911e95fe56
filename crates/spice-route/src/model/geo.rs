//! Geographic primitives shared by tracking and projection.

use serde::{Deserialize, Serialize};

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside the usual degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Moves `fraction` of the way from `self` to `target` on each axis.
    pub fn step_toward(&self, target: &Coordinate, fraction: f64) -> Coordinate {
        Coordinate {
            lat: self.lat + (target.lat - self.lat) * fraction,
            lng: self.lng + (target.lng - self.lng) * fraction,
        }
    }

    /// True when either axis differs from `other` by more than `epsilon` degrees.
    pub fn moved_beyond(&self, other: &Coordinate, epsilon: f64) -> bool {
        (self.lat - other.lat).abs() > epsilon || (self.lng - other.lng).abs() > epsilon
    }

    /// Planar distance in degrees. Good enough for ordering points on a city-scale map.
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        (self.lat - other.lat).hypot(self.lng - other.lng)
    }
}
