//! Walks normalized entries with a path stack and creates them on disk

use super::fs::ScaffoldFs;
use crate::error::{Result, ScaffoldError};
use crate::tree::NormalizedEntry;
use std::path::{Path, PathBuf};

/// What a build did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub dirs_created: usize,
    pub dirs_existing: usize,
    pub files_created: usize,
    pub files_existing: usize,
    /// Entries placed under a shallower ancestor because their depth skipped levels
    pub skipped_depths: usize,
}

impl BuildReport {
    pub fn created(&self) -> usize {
        self.dirs_created + self.files_created
    }

    pub fn existing(&self) -> usize {
        self.dirs_existing + self.files_existing
    }
}

/// Creates the directories and files described by a sequence of entries
pub struct HierarchyBuilder<'a, F: ScaffoldFs> {
    root: &'a Path,
    fs: &'a mut F,
    stack: Vec<String>,
    report: BuildReport,
}

impl<'a, F: ScaffoldFs> HierarchyBuilder<'a, F> {
    pub fn new(root: &'a Path, fs: &'a mut F) -> Self {
        Self {
            root,
            fs,
            stack: Vec::new(),
            report: BuildReport::default(),
        }
    }

    /// Process every entry in order. Stops at the first filesystem error;
    /// whatever was created before it stays on disk.
    pub fn build(mut self, entries: &[NormalizedEntry]) -> Result<BuildReport> {
        for entry in entries {
            self.apply(entry)?;
        }
        Ok(self.report)
    }

    fn target_for(&self, entry: &NormalizedEntry) -> PathBuf {
        let mut target = self.root.to_path_buf();
        target.extend(&self.stack);
        target.push(entry.bare_name());
        target
    }

    fn apply(&mut self, entry: &NormalizedEntry) -> Result<()> {
        self.stack.truncate(entry.depth);
        if self.stack.len() < entry.depth {
            // No intermediate names are invented; the entry lands under the nearest ancestor
            log::warn!(
                "line {}: '{}' is at depth {} but only {} enclosing directories are open",
                entry.line_number,
                entry.bare_name(),
                entry.depth,
                self.stack.len()
            );
            self.report.skipped_depths += 1;
        }

        let target = self.target_for(entry);

        if entry.is_dir() {
            let created = self
                .fs
                .create_directory(&target, true, true)
                .map_err(|e| ScaffoldError::filesystem("create directory", &target, e))?;
            if created {
                log::debug!("Created directory {}", target.display());
                self.report.dirs_created += 1;
            } else {
                self.report.dirs_existing += 1;
            }
            self.stack.push(entry.bare_name().to_string());
        } else {
            self.fs
                .ensure_parent_exists(&target)
                .map_err(|e| ScaffoldError::filesystem("create parent of", &target, e))?;
            let created = self
                .fs
                .create_empty_file(&target, true)
                .map_err(|e| ScaffoldError::filesystem("create file", &target, e))?;
            if created {
                log::debug!("Created file {}", target.display());
                self.report.files_created += 1;
            } else {
                self.report.files_existing += 1;
            }
        }

        Ok(())
    }
}

/// Build `entries` under `root`
pub fn build_hierarchy<F: ScaffoldFs>(
    root: &Path,
    entries: &[NormalizedEntry],
    fs: &mut F,
) -> Result<BuildReport> {
    HierarchyBuilder::new(root, fs).build(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::fs::{DryRunFs, LocalFs};
    use crate::tree::{parse_lines, ParseOptions};
    use std::io;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    fn entries(lines: &[&str]) -> Vec<NormalizedEntry> {
        parse_lines(lines, &ParseOptions::default()).unwrap()
    }

    /// Relative paths under `root`, directories suffixed with `/`
    fn snapshot(root: &Path) -> Vec<String> {
        WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|e| e.unwrap())
            .map(|e| {
                let rel = e
                    .path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");
                if e.file_type().is_dir() {
                    format!("{}/", rel)
                } else {
                    rel
                }
            })
            .collect()
    }

    #[test]
    fn test_builds_space_indented_tree() {
        let tmp = TempDir::new().unwrap();
        let lines = ["my_app/", "    src/", "        main.py", "    README.md"];

        let report = build_hierarchy(tmp.path(), &entries(&lines), &mut LocalFs).unwrap();

        assert!(tmp.path().join("my_app").is_dir());
        assert!(tmp.path().join("my_app/src").is_dir());
        assert!(tmp.path().join("my_app/src/main.py").is_file());
        assert!(tmp.path().join("my_app/README.md").is_file());
        assert_eq!(report.dirs_created, 2);
        assert_eq!(report.files_created, 2);
    }

    #[test]
    fn test_builds_glyph_tree() {
        let tmp = TempDir::new().unwrap();
        let lines = ["lib/", "│ core.py", "│ util/", "│ │ strings.py", "setup.py"];

        build_hierarchy(tmp.path(), &entries(&lines), &mut LocalFs).unwrap();

        assert_eq!(
            snapshot(tmp.path()),
            vec![
                "lib/",
                "lib/core.py",
                "lib/util/",
                "lib/util/strings.py",
                "setup.py",
            ]
        );
    }

    #[test]
    fn test_file_goes_under_preceding_directory() {
        let tmp = TempDir::new().unwrap();
        build_hierarchy(tmp.path(), &entries(&["lib/", "    core.py"]), &mut LocalFs).unwrap();

        assert!(tmp.path().join("lib/core.py").is_file());
        assert!(!tmp.path().join("core.py").exists());
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let tmp = TempDir::new().unwrap();
        let tree = entries(&[
            "my_app/",
            "    src/",
            "        main.py",
            "    tests/",
            "        test_main.py",
            "    README.md",
        ]);

        let first = build_hierarchy(tmp.path(), &tree, &mut LocalFs).unwrap();
        std::fs::write(tmp.path().join("my_app/README.md"), "# my_app").unwrap();
        let before = snapshot(tmp.path());

        let second = build_hierarchy(tmp.path(), &tree, &mut LocalFs).unwrap();

        assert_eq!(snapshot(tmp.path()), before);
        assert_eq!(first.created(), 6);
        assert_eq!(second.created(), 0);
        assert_eq!(second.existing(), 6);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("my_app/README.md")).unwrap(),
            "# my_app"
        );
    }

    #[test]
    fn test_counts_match_entry_kinds() {
        let tmp = TempDir::new().unwrap();
        let tree = entries(&[
            "a/",
            "    b/",
            "        c.txt",
            "        d/",
            "    e.txt",
            "f/",
            "g.txt",
        ]);
        let dirs = tree.iter().filter(|e| e.is_dir()).count();

        let report = build_hierarchy(tmp.path(), &tree, &mut LocalFs).unwrap();

        assert_eq!(report.dirs_created, dirs);
        assert_eq!(report.files_created, tree.len() - dirs);
    }

    #[test]
    fn test_returning_to_shallower_level() {
        let tmp = TempDir::new().unwrap();
        let tree = entries(&[
            "app/",
            "    src/",
            "        deep/",
            "            leaf.rs",
            "    Cargo.toml",
            "docs/",
            "    index.md",
        ]);

        build_hierarchy(tmp.path(), &tree, &mut LocalFs).unwrap();

        assert_eq!(
            snapshot(tmp.path()),
            vec![
                "app/",
                "app/Cargo.toml",
                "app/src/",
                "app/src/deep/",
                "app/src/deep/leaf.rs",
                "docs/",
                "docs/index.md",
            ]
        );
    }

    // Depth jumps are accepted: the entry lands under whatever ancestors are
    // open and no intermediate directories are made up.
    #[test]
    fn test_skipped_depth_uses_remaining_ancestors() {
        let tmp = TempDir::new().unwrap();
        let tree = entries(&["app/", "            deep.txt", "    src/"]);

        let report = build_hierarchy(tmp.path(), &tree, &mut LocalFs).unwrap();

        assert_eq!(report.skipped_depths, 1);
        assert_eq!(snapshot(tmp.path()), vec!["app/", "app/deep.txt", "app/src/"]);
    }

    #[test]
    fn test_entry_after_file_stays_at_file_level() {
        let tmp = TempDir::new().unwrap();
        let tree = entries(&["app/", "    main.py", "        helper.py"]);

        let report = build_hierarchy(tmp.path(), &tree, &mut LocalFs).unwrap();

        assert!(tmp.path().join("app/helper.py").is_file());
        assert_eq!(report.skipped_depths, 1);
    }

    #[test]
    fn test_nested_directory_name() {
        let tmp = TempDir::new().unwrap();
        build_hierarchy(tmp.path(), &entries(&["src/bin/", "    cli.rs"]), &mut LocalFs).unwrap();
        assert!(tmp.path().join("src/bin/cli.rs").is_file());
    }

    #[test]
    fn test_filesystem_error_keeps_earlier_entries() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("blocked"), "").unwrap();
        let tree = entries(&["ok/", "blocked/", "    never.txt"]);

        let err = build_hierarchy(tmp.path(), &tree, &mut LocalFs).unwrap_err();

        match err {
            ScaffoldError::Filesystem { path, .. } => {
                assert_eq!(path, tmp.path().join("blocked"))
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(tmp.path().join("ok").is_dir());
        assert!(!tmp.path().join("never.txt").exists());
    }

    struct FailingFs;

    impl ScaffoldFs for FailingFs {
        fn create_directory(&mut self, _: &Path, _: bool, _: bool) -> io::Result<bool> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn create_empty_file(&mut self, _: &Path, _: bool) -> io::Result<bool> {
            Ok(true)
        }

        fn ensure_parent_exists(&mut self, _: &Path) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_error_names_the_action() {
        let err = build_hierarchy(Path::new("root"), &entries(&["app/"]), &mut FailingFs)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("create directory"));
        assert!(message.contains("app"));
    }

    #[test]
    fn test_dry_run_plans_without_writing() {
        let tmp = TempDir::new().unwrap();
        let tree = entries(&["app/", "    src/", "        main.rs"]);
        let mut fs = DryRunFs::new();

        let report = build_hierarchy(tmp.path(), &tree, &mut fs).unwrap();

        assert_eq!(report.created(), 3);
        assert_eq!(fs.ops().len(), 3);
        assert!(snapshot(tmp.path()).is_empty());
    }
}
