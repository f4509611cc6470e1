//! Quadmap core - point quadtree, geometry, and map-friendly export
//!
//! This crate contains the spatial index itself (boundaries, points, the
//! recursive tree) and its peripheral collaborators: GeoJSON serialization,
//! cartesian/lat-lng conversion, on-disk image storage, and layered
//! configuration.

pub mod config;
pub mod error;
pub mod export;
pub mod geom;
pub mod store;
pub mod transform;
pub mod tree;

pub use error::{QuadmapError, Result};
pub use geom::{Boundary, Point, Quadrant};
pub use tree::{FeatureRecord, Features, Neighbor, QuadTree};
