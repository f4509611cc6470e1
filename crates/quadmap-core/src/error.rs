//! Error types for quadmap

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuadmapError {
    // Geometry errors
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("Invalid node capacity {capacity}: must be at least 1")]
    InvalidCapacity { capacity: usize },

    // Export errors
    #[error("GeoJSON error: {reason}")]
    Geojson { reason: String },

    // Image store errors
    #[error("Invalid image name: {name}")]
    InvalidImageName { name: String },

    #[error("Image not found: {name}")]
    ImageNotFound { name: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QuadmapError>;
