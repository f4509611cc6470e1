//! Cartesian to latitude/longitude conversion helpers.
//!
//! Trees are usually built in a local cartesian plane; map consumers want
//! degrees. The conversion here is a plain linear scale (lat = y * scale,
//! lng = x * scale), which is all the export path needs — no geodesy.

use serde::{Deserialize, Serialize};

use crate::error::{QuadmapError, Result};
use crate::geom::Boundary;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A latitude/longitude bounding box, the shape map viewports consume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

/// Linear scale between tree coordinates and degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleProjection {
    scale: f64,
}

impl Default for ScaleProjection {
    fn default() -> Self {
        Self::identity()
    }
}

impl ScaleProjection {
    /// Create a projection with the given degrees-per-unit scale. The scale
    /// must be finite and positive.
    pub fn new(scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(QuadmapError::InvalidGeometry {
                reason: format!("projection scale must be finite and positive, got {scale}"),
            });
        }
        Ok(Self { scale })
    }

    /// One tree unit per degree
    pub fn identity() -> Self {
        Self { scale: 1.0 }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Convert a cartesian coordinate to degrees
    pub fn to_latlng(&self, x: f64, y: f64) -> LatLng {
        LatLng { lat: y * self.scale, lng: x * self.scale }
    }

    /// Convert degrees back to a cartesian coordinate
    pub fn to_cartesian(&self, position: LatLng) -> (f64, f64) {
        (position.lng / self.scale, position.lat / self.scale)
    }

    /// Convert a boundary to the lat/lng bounding box covering it
    pub fn bounds(&self, boundary: &Boundary) -> LatLngBounds {
        let south_west = self.to_latlng(boundary.min_x(), boundary.min_y());
        let north_east = self.to_latlng(boundary.max_x(), boundary.max_y());
        LatLngBounds {
            lat_min: south_west.lat,
            lat_max: north_east.lat,
            lng_min: south_west.lng,
            lng_max: north_east.lng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_scale() {
        assert!(ScaleProjection::new(0.0).is_err());
        assert!(ScaleProjection::new(-2.0).is_err());
        assert!(ScaleProjection::new(f64::NAN).is_err());
        assert!(ScaleProjection::new(f64::INFINITY).is_err());
        assert!(ScaleProjection::new(0.5).is_ok());
    }

    #[test]
    fn test_roundtrip() {
        let projection = ScaleProjection::new(0.001).unwrap();
        let position = projection.to_latlng(12_500.0, -48_000.0);
        assert_eq!(position.lng, 12.5);
        assert_eq!(position.lat, -48.0);
        let (x, y) = projection.to_cartesian(position);
        assert_eq!(x, 12_500.0);
        assert_eq!(y, -48_000.0);
    }

    #[test]
    fn test_identity_is_passthrough() {
        let projection = ScaleProjection::identity();
        let position = projection.to_latlng(3.0, 4.0);
        assert_eq!((position.lng, position.lat), (3.0, 4.0));
    }

    #[test]
    fn test_boundary_bounds() {
        let boundary = Boundary::new(10.0, 20.0, 5.0, 2.0).unwrap();
        let bounds = ScaleProjection::new(2.0).unwrap().bounds(&boundary);
        assert_eq!(bounds.lng_min, 10.0);
        assert_eq!(bounds.lng_max, 30.0);
        assert_eq!(bounds.lat_min, 36.0);
        assert_eq!(bounds.lat_max, 44.0);
    }
}
