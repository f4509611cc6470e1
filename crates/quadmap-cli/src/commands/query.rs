use anyhow::Result;
use tabled::Tabled;

use quadmap_core::config::LayeredConfig;
use quadmap_core::Boundary;

use crate::cli::QueryArgs;
use crate::output::OutputWriter;
use crate::output_types::{PointInfo, QueryOutput};

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "X")]
    x: f64,
    #[tabled(rename = "Y")]
    y: f64,
    #[tabled(rename = "Data")]
    data: String,
}

pub fn execute(args: QueryArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let range = Boundary::new(args.center_x, args.center_y, args.half_width, args.half_height)?;
    let (tree, skipped) = super::load_tree(&args.points, config)?;
    if skipped > 0 {
        output.warning(format!("{skipped} point(s) fell outside the tree boundary"));
    }

    let results: Vec<PointInfo> = tree
        .query(&range)
        .into_iter()
        .map(|point| PointInfo { x: point.x, y: point.y, data: point.payload.clone() })
        .collect();

    if output.is_json() {
        output.data(&QueryOutput {
            file: args.points.display().to_string(),
            matches: results.len(),
            skipped_out_of_bounds: skipped,
            results,
        });
        return Ok(());
    }

    output.section("Range Query");
    output.kv("File", args.points.display());
    output.kv(
        "Range",
        format!(
            "center ({}, {}), half-extents {} x {}",
            args.center_x, args.center_y, args.half_width, args.half_height
        ),
    );
    output.kv("Matches", results.len());
    output.table(
        results
            .into_iter()
            .map(|point| PointRow {
                x: point.x,
                y: point.y,
                data: point.data.to_string(),
            })
            .collect(),
    );
    Ok(())
}
