//! Command implementations

mod export;
mod nearest;
mod query;
mod stats;

use anyhow::{Context, Result};
use std::path::Path;

use quadmap_core::config::{CliConfigOverrides, LayeredConfig};
use quadmap_core::{Boundary, Point, QuadTree};

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = cli.config.as_deref() {
        config = config
            .load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;
    }
    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        capacity: cli.capacity,
        latlng_scale: cli.latlng_scale,
        ..Default::default()
    });

    match cli.command {
        Commands::Query(args) => query::execute(args, &config, &output),
        Commands::Nearest(args) => nearest::execute(args, &config, &output),
        Commands::Export(args) => export::execute(args, &config, &output),
        Commands::Stats(args) => stats::execute(args, &config, &output),
    }
}

/// Load a GeoJSON point file and build a tree from it. The boundary comes
/// from the configuration when any extent value was set explicitly;
/// otherwise it is fitted to the data. Returns the tree and the number of
/// points that fell outside the boundary.
pub(crate) fn load_tree(
    path: &Path,
    config: &LayeredConfig,
) -> Result<(QuadTree<serde_json::Value>, usize)> {
    let points = quadmap_core::export::read_points_file(path)
        .with_context(|| format!("failed to load points from {}", path.display()))?;

    let boundary = if config.extent_overridden() || points.is_empty() {
        config.boundary()?
    } else {
        fitted_boundary(&points)?
    };

    let mut tree = QuadTree::new(boundary, config.capacity.value)?;
    let mut skipped = 0usize;
    for point in points {
        if !tree.insert(point) {
            skipped += 1;
        }
    }
    Ok((tree, skipped))
}

/// Smallest boundary covering every point, padded a hair so points sitting
/// exactly on the extremes survive float rounding.
fn fitted_boundary(points: &[Point<serde_json::Value>]) -> Result<Boundary> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for point in points {
        min_x = min_x.min(point.x);
        max_x = max_x.max(point.x);
        min_y = min_y.min(point.y);
        max_y = max_y.max(point.y);
    }

    let mut boundary = Boundary::new(
        (min_x + max_x) / 2.0,
        (min_y + max_y) / 2.0,
        (max_x - min_x) / 2.0,
        (max_y - min_y) / 2.0,
    )?;
    boundary.expand(1.001)?;
    Ok(boundary)
}
