use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};

use quadmap_core::config::LayeredConfig;

use crate::cli::ExportArgs;
use crate::output::OutputWriter;
use crate::output_types::ExportOutput;

pub fn execute(args: ExportArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let (tree, skipped) = super::load_tree(&args.points, config)?;
    if skipped > 0 {
        output.warning(format!("{skipped} point(s) fell outside the tree boundary"));
    }

    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            quadmap_core::export::to_writer(&tree, file)?;

            output.success(format!(
                "exported {} feature(s) to {}",
                tree.len(),
                path.display()
            ));
            output.data(&ExportOutput {
                feature_count: tree.len(),
                path: path.display().to_string(),
            });
        }
        None => {
            // The feature collection itself goes to stdout in both modes; it
            // is already JSON.
            let content = quadmap_core::export::to_string(&tree)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
