//! Point type carried through the tree.

use serde::{Deserialize, Serialize};

/// A 2D point with an opaque payload.
///
/// The payload is an inert token: the tree only ever compares it for equality
/// (removal matching) and hands it back out (queries, export). Two points are
/// equal when both coordinates and the payload match exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point<P> {
    pub x: f64,
    pub y: f64,
    pub payload: P,
}

impl<P> Point<P> {
    /// Create a new point
    pub fn new(x: f64, y: f64, payload: P) -> Self {
        Self { x, y, payload }
    }

    /// Euclidean distance to another point (payloads ignored)
    pub fn distance<Q>(&self, other: &Point<Q>) -> f64 {
        self.distance_to(other.x, other.y)
    }

    /// Euclidean distance to a raw coordinate
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }

    /// Coordinate midpoint between this point and another (payloads ignored)
    pub fn midpoint<Q>(&self, other: &Point<Q>) -> (f64, f64) {
        ((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Return a copy shifted by the given offsets, payload carried unchanged
    pub fn translate(&self, dx: f64, dy: f64) -> Self
    where
        P: Clone,
    {
        Self::new(self.x + dx, self.y + dy, self.payload.clone())
    }

    /// Return a copy rotated by `angle` radians around `(origin_x, origin_y)`,
    /// payload carried unchanged
    pub fn rotate(&self, angle: f64, origin_x: f64, origin_y: f64) -> Self
    where
        P: Clone,
    {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - origin_x;
        let dy = self.y - origin_y;
        Self::new(
            dx * cos - dy * sin + origin_x,
            dx * sin + dy * cos + origin_y,
            self.payload.clone(),
        )
    }
}

impl Point<()> {
    /// A point with no payload, useful for query targets and tests
    pub fn bare(x: f64, y: f64) -> Self {
        Self::new(x, y, ())
    }
}
