use anyhow::Result;

use quadmap_core::config::LayeredConfig;

use crate::cli::NearestArgs;
use crate::output::OutputWriter;
use crate::output_types::{NearestOutput, PointInfo};

pub fn execute(args: NearestArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let (tree, skipped) = super::load_tree(&args.points, config)?;
    if skipped > 0 {
        output.warning(format!("{skipped} point(s) fell outside the tree boundary"));
    }

    let neighbor = tree.nearest_neighbor(args.x, args.y);

    if output.is_json() {
        output.data(&NearestOutput {
            target_x: args.x,
            target_y: args.y,
            found: neighbor.as_ref().map(|n| PointInfo {
                x: n.point.x,
                y: n.point.y,
                data: n.point.payload.clone(),
            }),
            distance: neighbor.as_ref().map(|n| n.distance),
        });
        return Ok(());
    }

    output.section("Nearest Neighbor");
    output.kv("Target", format!("({}, {})", args.x, args.y));
    match neighbor {
        Some(neighbor) => {
            output.kv("Found", format!("({}, {})", neighbor.point.x, neighbor.point.y));
            output.kv("Data", neighbor.point.payload.to_string());
            output.success(format!("distance {:.6}", neighbor.distance));
        }
        None => {
            output.warning("the tree holds no points");
        }
    }
    Ok(())
}
