use anyhow::Result;

use quadmap_core::config::LayeredConfig;

use crate::cli::StatsArgs;
use crate::output::OutputWriter;
use crate::output_types::{BoundaryInfo, StatsOutput};

pub fn execute(args: StatsArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let (tree, skipped) = super::load_tree(&args.points, config)?;
    let boundary = tree.boundary();
    let projection = config.projection()?;
    let latlng_bounds = projection.bounds(&boundary);

    let stats = StatsOutput {
        points: tree.len(),
        nodes: tree.node_count(),
        depth: tree.depth(),
        capacity: tree.capacity(),
        skipped_out_of_bounds: skipped,
        boundary: BoundaryInfo {
            center_x: boundary.center_x(),
            center_y: boundary.center_y(),
            half_width: boundary.half_width(),
            half_height: boundary.half_height(),
        },
        latlng_bounds,
    };

    if output.is_json() {
        output.data(&stats);
        return Ok(());
    }

    output.section("Tree");
    output.kv("File", args.points.display());
    output.kv("Points", stats.points);
    output.kv("Nodes", stats.nodes);
    output.kv("Depth", stats.depth);
    output.kv("Capacity", stats.capacity);
    if skipped > 0 {
        output.warning(format!("{skipped} point(s) fell outside the tree boundary"));
    }

    output.section("Extent");
    output.kv(
        "Boundary",
        format!(
            "center ({}, {}), half-extents {} x {}",
            stats.boundary.center_x,
            stats.boundary.center_y,
            stats.boundary.half_width,
            stats.boundary.half_height
        ),
    );
    output.kv(
        "Lat/Lng",
        format!(
            "lat [{:.6}, {:.6}], lng [{:.6}, {:.6}]",
            stats.latlng_bounds.lat_min,
            stats.latlng_bounds.lat_max,
            stats.latlng_bounds.lng_min,
            stats.latlng_bounds.lng_max
        ),
    );
    Ok(())
}
