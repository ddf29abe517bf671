//! Filesystem capability used by the hierarchy builder

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// The filesystem operations the builder needs.
///
/// All operations are no-ops when the target already exists in the required
/// form. The returned `bool` tells whether something was newly created.
pub trait ScaffoldFs {
    fn create_directory(
        &mut self,
        path: &Path,
        create_parents: bool,
        ok_if_exists: bool,
    ) -> io::Result<bool>;

    fn create_empty_file(&mut self, path: &Path, ok_if_exists: bool) -> io::Result<bool>;

    fn ensure_parent_exists(&mut self, path: &Path) -> io::Result<()>;
}

/// Writes to the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl ScaffoldFs for LocalFs {
    fn create_directory(
        &mut self,
        path: &Path,
        create_parents: bool,
        ok_if_exists: bool,
    ) -> io::Result<bool> {
        if path.is_dir() {
            if ok_if_exists {
                return Ok(false);
            }
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "directory already exists",
            ));
        }

        if create_parents {
            fs::create_dir_all(path)?;
        } else {
            fs::create_dir(path)?;
        }
        Ok(true)
    }

    fn create_empty_file(&mut self, path: &Path, ok_if_exists: bool) -> io::Result<bool> {
        // create_new never truncates, so existing content survives
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && ok_if_exists && path.is_file() => {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn ensure_parent_exists(&mut self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

/// Kind of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One operation recorded by [`DryRunFs`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOp {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Already present on disk (or earlier in the plan); nothing would change
    pub existed: bool,
}

/// Records what would be created without touching the disk.
///
/// Existing entries are looked up on the real filesystem so the plan matches
/// what [`LocalFs`] would do.
#[derive(Debug, Default)]
pub struct DryRunFs {
    ops: Vec<PlannedOp>,
    planned_dirs: HashSet<PathBuf>,
    planned_files: HashSet<PathBuf>,
}

impl DryRunFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[PlannedOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<PlannedOp> {
        self.ops
    }

    fn dir_exists(&self, path: &Path) -> bool {
        self.planned_dirs.contains(path) || path.is_dir()
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.planned_files.contains(path) || path.is_file()
    }

    fn conflict(path: &Path, what: &str) -> io::Error {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists as a {}", path.display(), what),
        )
    }

    /// Plan `path` and every missing ancestor, outermost first
    fn plan_dir_chain(&mut self, path: &Path) -> io::Result<()> {
        let mut missing = Vec::new();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() || self.dir_exists(ancestor) {
                break;
            }
            if self.file_exists(ancestor) {
                return Err(Self::conflict(ancestor, "file"));
            }
            missing.push(ancestor.to_path_buf());
        }

        for dir in missing.into_iter().rev() {
            self.planned_dirs.insert(dir.clone());
            self.ops.push(PlannedOp {
                path: dir,
                kind: EntryKind::Directory,
                existed: false,
            });
        }
        Ok(())
    }
}

impl ScaffoldFs for DryRunFs {
    fn create_directory(
        &mut self,
        path: &Path,
        create_parents: bool,
        ok_if_exists: bool,
    ) -> io::Result<bool> {
        if self.dir_exists(path) {
            if !ok_if_exists {
                return Err(Self::conflict(path, "directory"));
            }
            self.ops.push(PlannedOp {
                path: path.to_path_buf(),
                kind: EntryKind::Directory,
                existed: true,
            });
            return Ok(false);
        }

        if !create_parents {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !self.dir_exists(parent) {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("{} does not exist", parent.display()),
                    ));
                }
            }
        }

        self.plan_dir_chain(path)?;
        Ok(true)
    }

    fn create_empty_file(&mut self, path: &Path, ok_if_exists: bool) -> io::Result<bool> {
        if self.dir_exists(path) {
            return Err(Self::conflict(path, "directory"));
        }
        if self.file_exists(path) {
            if !ok_if_exists {
                return Err(Self::conflict(path, "file"));
            }
            self.ops.push(PlannedOp {
                path: path.to_path_buf(),
                kind: EntryKind::File,
                existed: true,
            });
            return Ok(false);
        }

        self.planned_files.insert(path.to_path_buf());
        self.ops.push(PlannedOp {
            path: path.to_path_buf(),
            kind: EntryKind::File,
            existed: false,
        });
        Ok(true)
    }

    fn ensure_parent_exists(&mut self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.plan_dir_chain(parent),
            _ => Ok(()),
        }
    }
}
