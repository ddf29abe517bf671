//! Turns raw tree-diagram lines into `(depth, name)` entries

use super::depth::{is_tree_glyph, DepthPolicy, IndentStyle, DEFAULT_GLYPH, DEFAULT_INDENT_WIDTH};
use crate::error::{Malformation, Result, ScaffoldError};
use std::path::Path;

/// Suffix that marks an entry as a directory
pub const DIR_MARKER: char = '/';

/// Options controlling how a structure file is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Indentation convention, or `Auto` to detect it
    pub indent: IndentStyle,
    /// Spaces per level when whitespace indentation is used
    pub indent_width: usize,
    /// Glyph counted when glyph indentation is used
    pub glyph: char,
    /// Reject entries that skip levels instead of placing them under the nearest ancestor
    pub strict_depth: bool,
    /// Treat `#` at the start of a name or after whitespace as a comment. Off by
    /// default, so names such as `#notes.md` are kept verbatim.
    pub inline_comments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            indent: IndentStyle::Auto,
            indent_width: DEFAULT_INDENT_WIDTH,
            glyph: DEFAULT_GLYPH,
            strict_depth: false,
            inline_comments: false,
        }
    }
}

/// One entry of the tree: nesting level plus the cleaned name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    /// 0 for top-level entries
    pub depth: usize,
    /// Cleaned name, still carrying the trailing `/` for directories
    pub name: String,
    /// 1-based line in the structure file
    pub line_number: usize,
}

impl NormalizedEntry {
    pub fn is_dir(&self) -> bool {
        self.name.ends_with(DIR_MARKER)
    }

    /// Name without the directory marker, as used for path construction
    pub fn bare_name(&self) -> &str {
        self.name.trim_end_matches(DIR_MARKER)
    }
}

/// Remove tree glyphs and surrounding whitespace from a line.
///
/// `"│   └── test.py"` becomes `"test.py"`.
pub fn clean_line(line: &str) -> String {
    line.chars()
        .filter(|c| !is_tree_glyph(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Cut a `#` comment off a cleaned name. The `#` must start the name or follow whitespace.
fn strip_comment(name: &str) -> &str {
    let mut prev_is_space = true;
    for (idx, c) in name.char_indices() {
        if c == '#' && prev_is_space {
            return name[..idx].trim_end();
        }
        prev_is_space = c.is_whitespace();
    }
    name
}

fn extract_name(line: &str, inline_comments: bool) -> String {
    let cleaned = clean_line(line);
    if inline_comments {
        strip_comment(&cleaned).to_string()
    } else {
        cleaned
    }
}

fn validate_name(name: &str) -> std::result::Result<(), Malformation> {
    let bare = name.trim_end_matches(DIR_MARKER);
    if bare.is_empty() {
        return Err(Malformation::EmptyName);
    }
    if name.starts_with(DIR_MARKER) || Path::new(bare).has_root() {
        return Err(Malformation::AbsoluteName);
    }
    if bare.split(DIR_MARKER).any(|c| c == "." || c == "..") {
        return Err(Malformation::RelativeComponent);
    }
    Ok(())
}

/// Normalizes single lines with a fixed depth policy
#[derive(Debug)]
pub struct LineNormalizer {
    policy: Box<dyn DepthPolicy>,
    inline_comments: bool,
}

impl LineNormalizer {
    pub fn new(policy: Box<dyn DepthPolicy>, inline_comments: bool) -> Self {
        Self {
            policy,
            inline_comments,
        }
    }

    pub fn policy(&self) -> &dyn DepthPolicy {
        self.policy.as_ref()
    }

    /// Normalize one line. Returns `None` for lines that are empty once cleaned.
    pub fn normalize(&self, line_number: usize, line: &str) -> Result<Option<NormalizedEntry>> {
        let name = extract_name(line, self.inline_comments);
        if name.is_empty() {
            return Ok(None);
        }

        let depth = self
            .policy
            .depth(line)
            .map_err(|kind| ScaffoldError::malformed(line_number, line, kind))?;
        validate_name(&name).map_err(|kind| ScaffoldError::malformed(line_number, line, kind))?;

        Ok(Some(NormalizedEntry {
            depth,
            name,
            line_number,
        }))
    }
}

/// Reject an entry that skips a level or sits under a file
fn check_nesting(
    previous: Option<&NormalizedEntry>,
    entry: &NormalizedEntry,
) -> std::result::Result<(), Malformation> {
    let max = match previous {
        None => 0,
        Some(prev) if prev.is_dir() => prev.depth + 1,
        Some(prev) => prev.depth,
    };
    if entry.depth <= max {
        return Ok(());
    }

    match previous {
        Some(prev) if !prev.is_dir() && entry.depth == prev.depth + 1 => {
            Err(Malformation::NestedUnderFile)
        }
        _ => Err(Malformation::DepthJump {
            max,
            found: entry.depth,
        }),
    }
}

/// Normalize a whole structure file.
///
/// Every line is checked before anything is returned, so a malformed file is
/// rejected as a whole. Blank lines, and lines holding only glyphs or a
/// comment, are skipped; line numbers still refer to the original input.
pub fn parse_lines<S: AsRef<str>>(
    lines: &[S],
    options: &ParseOptions,
) -> Result<Vec<NormalizedEntry>> {
    let candidates: Vec<(usize, &str)> = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.as_ref()))
        .filter(|(_, line)| !extract_name(line, options.inline_comments).is_empty())
        .collect();

    let policy = options
        .indent
        .select(&candidates, options.glyph, options.indent_width)?;
    log::debug!(
        "Reading {} entries with {} indentation",
        candidates.len(),
        policy.kind().label()
    );
    let normalizer = LineNormalizer::new(policy, options.inline_comments);

    let mut entries: Vec<NormalizedEntry> = Vec::with_capacity(candidates.len());
    for (line_number, line) in candidates {
        let Some(entry) = normalizer.normalize(line_number, line)? else {
            continue;
        };

        if options.strict_depth {
            check_nesting(entries.last(), &entry)
                .map_err(|kind| ScaffoldError::malformed(line_number, line, kind))?;
        }

        entries.push(entry);
    }

    Ok(entries)
}
