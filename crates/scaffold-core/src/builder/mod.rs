//! Materializing a parsed tree on disk
//!
//! This module provides:
//! - The `ScaffoldFs` capability with a real and a dry-run implementation
//! - The stack-based hierarchy builder
//! - Plan rendering for previews

pub mod fs;
pub mod hierarchy;
pub mod plan;

pub use fs::{DryRunFs, EntryKind, LocalFs, PlannedOp, ScaffoldFs};
pub use hierarchy::{build_hierarchy, BuildReport, HierarchyBuilder};
pub use plan::{render_plan, summarize, summarize_plan};

use crate::error::{Result, ScaffoldError};
use crate::tree::{parse_lines, NormalizedEntry, ParseOptions};
use std::path::Path;

/// Create `root` (with parents) if missing, then build `entries` under it
pub fn build_project<F: ScaffoldFs>(
    root: &Path,
    entries: &[NormalizedEntry],
    fs: &mut F,
) -> Result<BuildReport> {
    fs.create_directory(root, true, true)
        .map_err(|e| ScaffoldError::filesystem("create project root", root, e))?;

    build_hierarchy(root, entries, fs)
}

/// Scaffold `lines` under `root`.
///
/// The whole input is normalized first, so malformed input leaves the disk
/// untouched.
pub fn scaffold<S: AsRef<str>, F: ScaffoldFs>(
    root: &Path,
    lines: &[S],
    options: &ParseOptions,
    fs: &mut F,
) -> Result<BuildReport> {
    let entries = parse_lines(lines, options)?;
    build_project(root, &entries, fs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scaffold_creates_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("projects").join("app_new_project");

        let report = scaffold(
            &root,
            &["src/", "    main.rs", "Cargo.toml"],
            &ParseOptions::default(),
            &mut LocalFs,
        )
        .unwrap();

        assert!(root.join("src/main.rs").is_file());
        assert!(root.join("Cargo.toml").is_file());
        assert_eq!(report.created(), 3);
    }

    #[test]
    fn test_hash_names_become_files_by_default() {
        let tmp = TempDir::new().unwrap();
        let lines = ["app/", "    #notes.md", "    notes #1.txt"];

        let report = scaffold(tmp.path(), &lines, &ParseOptions::default(), &mut LocalFs).unwrap();

        assert_eq!(report.files_created, 2);
        assert!(tmp.path().join("app/#notes.md").is_file());
        assert!(tmp.path().join("app/notes #1.txt").is_file());
        assert!(!tmp.path().join("app/notes").exists());
    }

    #[test]
    fn test_malformed_input_leaves_disk_untouched() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("project");
        let lines = ["app/", "    src/", "    main.rs", "├── mixed.rs"];

        let err = scaffold(&root, &lines, &ParseOptions::default(), &mut LocalFs).unwrap_err();

        assert!(matches!(err, ScaffoldError::MalformedInput { line_number: 4, .. }));
        assert!(!root.exists());
    }
}
