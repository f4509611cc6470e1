use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// quadmap - point quadtree queries over GeoJSON data
#[derive(Parser, Debug)]
#[command(name = "quadmap")]
#[command(about = "Point quadtree queries over GeoJSON data", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML config file with tree defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Node capacity override
    #[arg(long, global = true)]
    pub capacity: Option<usize>,

    /// Degrees-per-unit scale for lat/lng output
    #[arg(long, global = true)]
    pub latlng_scale: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find all points within a rectangular range
    Query(QueryArgs),

    /// Find the stored point nearest to a target coordinate
    Nearest(NearestArgs),

    /// Export points as a GeoJSON feature collection in traversal order
    Export(ExportArgs),

    /// Show tree statistics for a point file
    Stats(StatsArgs),
}

#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// GeoJSON file with point features
    pub points: PathBuf,

    /// Center X of the query range
    #[arg(long, allow_negative_numbers = true)]
    pub center_x: f64,

    /// Center Y of the query range
    #[arg(long, allow_negative_numbers = true)]
    pub center_y: f64,

    /// Half-width of the query range
    #[arg(long)]
    pub half_width: f64,

    /// Half-height of the query range
    #[arg(long)]
    pub half_height: f64,
}

#[derive(Parser, Debug)]
pub struct NearestArgs {
    /// GeoJSON file with point features
    pub points: PathBuf,

    /// Target X coordinate
    #[arg(long, allow_negative_numbers = true)]
    pub x: f64,

    /// Target Y coordinate
    #[arg(long, allow_negative_numbers = true)]
    pub y: f64,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// GeoJSON file with point features
    pub points: PathBuf,

    /// Write the feature collection here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// GeoJSON file with point features
    pub points: PathBuf,
}
