//! Where structure files come from
//!
//! A structure source is either a local path or an `http(s)` URL. Both are
//! read into raw lines before any parsing happens.

pub mod loader;

pub use loader::StructureLoader;

use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable overriding the default structure source
pub const STRUCTURE_ENV: &str = "SCAFFOLD_STRUCTURE";

/// Structure file used when nothing else is configured
pub const DEFAULT_STRUCTURE_FILE: &str = "structure.txt";

/// Structure source - either a local file or a remote URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureSource {
    Local(PathBuf),
    Remote(Url),
}

impl StructureSource {
    /// Interpret user input: `http://` and `https://` URLs are remote, everything else is a path.
    /// Relative paths are resolved against `base`; a leading `~` expands to the home directory.
    pub fn parse(input: &str, base: &Path) -> Self {
        let input = input.trim();
        if let Ok(url) = Url::parse(input) {
            if matches!(url.scheme(), "http" | "https") {
                return Self::Remote(url);
            }
        }

        let path = expand_home(input);
        if path.is_absolute() {
            Self::Local(path)
        } else {
            Self::Local(base.join(path))
        }
    }

    /// Default source: `$SCAFFOLD_STRUCTURE`, then the configured value, then `structure.txt`
    pub fn default_input(configured: Option<&str>) -> String {
        std::env::var(STRUCTURE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| configured.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_STRUCTURE_FILE.to_string())
    }
}

impl fmt::Display for StructureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureSource::Local(path) => write!(f, "{}", path.display()),
            StructureSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(input: &str) -> PathBuf {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    match (input.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            PathBuf::from(home).join(rest.trim_start_matches(['/', '\\']))
        }
        _ => PathBuf::from(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote() {
        let source = StructureSource::parse(
            "https://example.com/trees/structure.txt",
            Path::new("/work"),
        );
        assert!(matches!(source, StructureSource::Remote(_)));
    }

    #[test]
    fn test_parse_relative_path() {
        let source = StructureSource::parse("structure.txt", Path::new("/work"));
        assert_eq!(
            source,
            StructureSource::Local(PathBuf::from("/work/structure.txt"))
        );
    }

    #[test]
    fn test_parse_absolute_path() {
        let source = StructureSource::parse("/etc/tree.txt", Path::new("/work"));
        assert_eq!(source, StructureSource::Local(PathBuf::from("/etc/tree.txt")));
    }

    #[test]
    fn test_other_schemes_are_paths() {
        let source = StructureSource::parse("ftp://example.com/tree.txt", Path::new("/work"));
        assert!(matches!(source, StructureSource::Local(_)));
    }

    #[test]
    fn test_expand_home_leaves_other_tildes() {
        assert_eq!(expand_home("~backup/x"), PathBuf::from("~backup/x"));
        assert_eq!(expand_home("a/~/b"), PathBuf::from("a/~/b"));
    }

    #[test]
    fn test_display() {
        let source = StructureSource::Local(PathBuf::from("/work/structure.txt"));
        assert_eq!(source.to_string(), "/work/structure.txt");
    }
}
