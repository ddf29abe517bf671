//! Human-readable rendering of a dry-run plan

use super::fs::{EntryKind, PlannedOp};
use super::hierarchy::BuildReport;
use colored::Colorize;
use std::path::Path;

/// Render planned operations relative to `root`, one per line.
///
/// New entries are marked `+`, entries that already exist `=`.
pub fn render_plan(root: &Path, ops: &[PlannedOp]) -> String {
    let mut out = String::new();
    for op in ops {
        let rel = op.path.strip_prefix(root).unwrap_or(&op.path);
        let mut name = if rel.as_os_str().is_empty() {
            ".".to_string()
        } else {
            rel.display().to_string()
        };
        if op.kind == EntryKind::Directory {
            name.push('/');
        }

        let line = if op.existed {
            format!("  {} {}", "=".dimmed(), name.dimmed())
        } else if op.kind == EntryKind::Directory {
            format!("  {} {}", "+".green(), name.blue().bold())
        } else {
            format!("  {} {}", "+".green(), name)
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// One-line summary of a build report
pub fn summarize(report: &BuildReport) -> String {
    describe(report, "created")
}

/// One-line summary of a dry-run report
pub fn summarize_plan(report: &BuildReport) -> String {
    describe(report, "to create")
}

fn describe(report: &BuildReport, outcome: &str) -> String {
    let mut summary = format!(
        "{} directories and {} files {}",
        report.dirs_created, report.files_created, outcome
    );
    if report.existing() > 0 {
        summary.push_str(&format!(", {} already present", report.existing()));
    }
    if report.skipped_depths > 0 {
        summary.push_str(&format!(
            ", {} placed under a shallower parent",
            report.skipped_depths
        ));
    }
    summary
}
