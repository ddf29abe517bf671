//! `scaffold.yaml` settings

use crate::error::{Result, ScaffoldError};
use crate::tree::depth::{is_tree_glyph, DEFAULT_GLYPH, DEFAULT_INDENT_WIDTH, TREE_GLYPHS};
use crate::tree::{IndentStyle, ParseOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory
pub const CONFIG_FILE: &str = "scaffold.yaml";

/// Project name offered when none is configured
pub const DEFAULT_PROJECT_NAME: &str = "app_new_project";

/// Command-line overrides for the parser settings of a [`ScaffoldConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOverrides {
    pub indent: Option<IndentStyle>,
    pub indent_width: Option<usize>,
    pub strict_depth: bool,
    pub comments: bool,
}

/// Settings for a scaffold run. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaffoldConfig {
    /// Indentation convention of structure files (`auto`, `glyph`, `spaces`)
    pub indent: IndentStyle,

    /// Spaces per level for space-indented files
    pub indent_width: usize,

    /// Glyph counted per level for glyph-drawn files
    pub glyph: char,

    /// Reject entries that skip levels
    pub strict_depth: bool,

    /// Strip `# comments` from entries (off unless enabled)
    pub inline_comments: bool,

    /// Directory new projects are created in
    pub base_dir: Option<PathBuf>,

    /// Default project name
    pub project_name: String,

    /// Default structure file path or URL
    pub structure: Option<String>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            indent: IndentStyle::Auto,
            indent_width: DEFAULT_INDENT_WIDTH,
            glyph: DEFAULT_GLYPH,
            strict_depth: false,
            inline_comments: false,
            base_dir: None,
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            structure: None,
        }
    }
}

impl ScaffoldConfig {
    /// Parse settings from YAML text
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self> {
        // An empty file deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).map_err(|e| ScaffoldError::Config {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Read settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ScaffoldError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_yaml(&content, path)
    }

    /// Load `explicit` if given (it must exist), otherwise `scaffold.yaml` in `dir`
    /// if present, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            log::debug!("Using settings from {}", candidate.display());
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self, origin: &Path) -> Result<()> {
        if self.indent_width == 0 {
            return Err(ScaffoldError::Config {
                path: origin.to_path_buf(),
                reason: "indent_width must be at least 1".to_string(),
            });
        }
        if !is_tree_glyph(self.glyph) {
            let allowed: String = TREE_GLYPHS.iter().collect();
            return Err(ScaffoldError::Config {
                path: origin.to_path_buf(),
                reason: format!("glyph {:?} must be one of {}", self.glyph, allowed),
            });
        }
        Ok(())
    }

    /// Parser options described by these settings
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            indent: self.indent,
            indent_width: self.indent_width,
            glyph: self.glyph,
            strict_depth: self.strict_depth,
            inline_comments: self.inline_comments,
        }
    }

    /// Parser options with command-line overrides applied on top
    pub fn parse_options_with(&self, overrides: &ParseOverrides) -> ParseOptions {
        let mut options = self.parse_options();
        if let Some(indent) = overrides.indent {
            options.indent = indent;
        }
        if let Some(width) = overrides.indent_width {
            options.indent_width = width.max(1);
        }
        options.strict_depth |= overrides.strict_depth;
        options.inline_comments |= overrides.comments;
        options
    }
}
