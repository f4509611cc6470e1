use quadmap_core::transform::LatLngBounds;
use serde::Serialize;

/// Output for the query command
#[derive(Debug, Serialize)]
pub struct QueryOutput {
    pub file: String,
    pub matches: usize,
    pub skipped_out_of_bounds: usize,
    pub results: Vec<PointInfo>,
}

/// One matched or exported point
#[derive(Debug, Serialize)]
pub struct PointInfo {
    pub x: f64,
    pub y: f64,
    pub data: serde_json::Value,
}

/// Output for the nearest command
#[derive(Debug, Serialize)]
pub struct NearestOutput {
    pub target_x: f64,
    pub target_y: f64,
    pub found: Option<PointInfo>,
    pub distance: Option<f64>,
}

/// Output for the export command when writing to a file
#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub feature_count: usize,
    pub path: String,
}

/// Output for the stats command
#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub points: usize,
    pub nodes: usize,
    pub depth: usize,
    pub capacity: usize,
    pub skipped_out_of_bounds: usize,
    pub boundary: BoundaryInfo,
    pub latlng_bounds: LatLngBounds,
}

/// A boundary in plain record form
#[derive(Debug, Serialize)]
pub struct BoundaryInfo {
    pub center_x: f64,
    pub center_y: f64,
    pub half_width: f64,
    pub half_height: f64,
}
