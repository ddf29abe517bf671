//! Previewing a structure file without writing anything

use crate::builder::{self, DryRunFs};
use crate::source::{StructureLoader, StructureSource};
use crate::tree::{self, ParseOptions};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Print what scaffolding `source` under `root` would create
pub async fn preview(source: &StructureSource, root: &Path, options: &ParseOptions) -> Result<()> {
    let lines = StructureLoader::default().load(source).await?;
    let entries = tree::parse_lines(&lines, options)
        .with_context(|| format!("Failed to parse {}", source))?;

    println!(
        "{}",
        format!("Preview of {} in {}", source, root.display())
            .cyan()
            .bold()
    );
    println!();

    let mut fs = DryRunFs::new();
    let report = builder::build_hierarchy(root, &entries, &mut fs)?;
    print!("{}", builder::render_plan(root, fs.ops()));

    println!();
    println!("{} {}", "Plan:".green().bold(), builder::summarize_plan(&report));

    Ok(())
}
