//! Error types for parsing structure files and scaffolding them onto disk

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core library
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Everything that can stop a scaffold run
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A line could not be resolved to an unambiguous entry.
    /// Raised while normalizing, so nothing has been written yet.
    #[error("line {line_number}: {kind} (in {line:?})")]
    MalformedInput {
        line_number: usize,
        line: String,
        #[source]
        kind: Malformation,
    },

    /// Creating a directory or file failed. Entries from earlier lines stay on disk.
    #[error("failed to {action} {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The structure file (or URL) could not be located or read
    #[error("structure source not found: {location} ({reason})")]
    MissingStructureSource { location: String, reason: String },

    /// The settings file exists but could not be read or parsed
    #[error("invalid configuration in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl ScaffoldError {
    pub(crate) fn malformed(line_number: usize, line: &str, kind: Malformation) -> Self {
        Self::MalformedInput {
            line_number,
            line: line.to_string(),
            kind,
        }
    }

    pub(crate) fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// The malformation kind, if this is a malformed-input error
    pub fn malformation(&self) -> Option<&Malformation> {
        match self {
            Self::MalformedInput { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// Why a line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformation {
    #[error("indented with {found} but the file uses {expected} indentation")]
    MixedIndentation {
        expected: &'static str,
        found: &'static str,
    },

    #[error("tab characters in indentation have no fixed width")]
    TabIndent,

    #[error("indentation of {width} spaces is not a multiple of {unit}")]
    UnalignedIndent { width: usize, unit: usize },

    #[error("depth {found} skips levels (deepest allowed here is {max})")]
    DepthJump { max: usize, found: usize },

    #[error("entry is nested under a file")]
    NestedUnderFile,

    #[error("entry has no name")]
    EmptyName,

    #[error("absolute paths are not allowed")]
    AbsoluteName,

    #[error("'.' and '..' path components are not allowed")]
    RelativeComponent,
}
