//! Depth policies: how the leading decoration of a line maps to a nesting level

use crate::error::{Malformation, Result, ScaffoldError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Box-drawing characters used by tree diagrams
pub const TREE_GLYPHS: &[char] = &['│', '├', '└', '─'];

/// Vertical-continuation glyph counted by [`GlyphDepth`] unless configured otherwise
pub const DEFAULT_GLYPH: char = '│';

/// Spaces per level for [`IndentWidthDepth`] unless configured otherwise
pub const DEFAULT_INDENT_WIDTH: usize = 4;

pub fn is_tree_glyph(c: char) -> bool {
    TREE_GLYPHS.contains(&c)
}

/// Leading run of whitespace and tree glyphs before the entry name
pub fn indent_prefix(line: &str) -> &str {
    let end = line
        .find(|c: char| !c.is_whitespace() && !is_tree_glyph(c))
        .unwrap_or(line.len());
    &line[..end]
}

/// Indentation convention a single line is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentKind {
    /// No leading decoration at all
    Flat,
    /// Leading whitespace only
    Whitespace,
    /// Leading decoration containing at least one tree glyph
    Glyph,
}

impl IndentKind {
    pub fn of(line: &str) -> Self {
        let prefix = indent_prefix(line);
        if prefix.chars().any(is_tree_glyph) {
            IndentKind::Glyph
        } else if prefix.is_empty() {
            IndentKind::Flat
        } else {
            IndentKind::Whitespace
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IndentKind::Flat => "no",
            IndentKind::Whitespace => "whitespace",
            IndentKind::Glyph => "glyph",
        }
    }
}

/// Derives the nesting depth of a raw line from its formatting
pub trait DepthPolicy: fmt::Debug {
    /// Nesting level of `line`, 0 for top-level entries
    fn depth(&self, line: &str) -> std::result::Result<usize, Malformation>;

    /// The indentation convention this policy reads
    fn kind(&self) -> IndentKind;
}

/// Counts occurrences of the vertical-continuation glyph in the line's prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphDepth {
    glyph: char,
}

impl GlyphDepth {
    pub fn new(glyph: char) -> Self {
        Self { glyph }
    }
}

impl Default for GlyphDepth {
    fn default() -> Self {
        Self::new(DEFAULT_GLYPH)
    }
}

impl DepthPolicy for GlyphDepth {
    fn depth(&self, line: &str) -> std::result::Result<usize, Malformation> {
        if IndentKind::of(line) == IndentKind::Whitespace {
            return Err(Malformation::MixedIndentation {
                expected: IndentKind::Glyph.label(),
                found: IndentKind::Whitespace.label(),
            });
        }
        Ok(indent_prefix(line)
            .chars()
            .filter(|c| *c == self.glyph)
            .count())
    }

    fn kind(&self) -> IndentKind {
        IndentKind::Glyph
    }
}

/// Divides the width of the leading spaces by a fixed unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentWidthDepth {
    unit: usize,
}

impl IndentWidthDepth {
    pub fn new(unit: usize) -> Self {
        Self { unit: unit.max(1) }
    }

    pub fn unit(&self) -> usize {
        self.unit
    }
}

impl Default for IndentWidthDepth {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_WIDTH)
    }
}

impl DepthPolicy for IndentWidthDepth {
    fn depth(&self, line: &str) -> std::result::Result<usize, Malformation> {
        if IndentKind::of(line) == IndentKind::Glyph {
            return Err(Malformation::MixedIndentation {
                expected: IndentKind::Whitespace.label(),
                found: IndentKind::Glyph.label(),
            });
        }

        let prefix = indent_prefix(line);
        if prefix.contains('\t') {
            return Err(Malformation::TabIndent);
        }

        let width = prefix.chars().count();
        if width % self.unit != 0 {
            return Err(Malformation::UnalignedIndent {
                width,
                unit: self.unit,
            });
        }
        Ok(width / self.unit)
    }

    fn kind(&self) -> IndentKind {
        IndentKind::Whitespace
    }
}

/// Which depth policy to use for an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    /// Detect from the input; files mixing glyphs and whitespace are rejected
    #[default]
    Auto,
    /// Count vertical-continuation glyphs
    Glyph,
    /// Fixed-width space indentation
    Spaces,
}

impl IndentStyle {
    /// Choose the depth policy for the given `(line_number, line)` pairs.
    ///
    /// Only `Auto` inspects the lines. An explicit style defers mismatches to
    /// the per-line depth check, which reports them just the same.
    pub fn select(
        self,
        lines: &[(usize, &str)],
        glyph: char,
        indent_width: usize,
    ) -> Result<Box<dyn DepthPolicy>> {
        match self {
            IndentStyle::Glyph => Ok(Box::new(GlyphDepth::new(glyph))),
            IndentStyle::Spaces => Ok(Box::new(IndentWidthDepth::new(indent_width))),
            IndentStyle::Auto => {
                let mut first_glyph = None;
                let mut first_whitespace = None;

                for &(line_number, line) in lines {
                    let kind = IndentKind::of(line);
                    let slot = match kind {
                        IndentKind::Glyph => &mut first_glyph,
                        IndentKind::Whitespace => &mut first_whitespace,
                        IndentKind::Flat => continue,
                    };
                    if slot.is_none() {
                        *slot = Some(line_number);
                    }

                    if let (Some(g), Some(w)) = (first_glyph, first_whitespace) {
                        let expected = if g < w {
                            IndentKind::Glyph
                        } else {
                            IndentKind::Whitespace
                        };
                        return Err(ScaffoldError::malformed(
                            line_number,
                            line,
                            Malformation::MixedIndentation {
                                expected: expected.label(),
                                found: kind.label(),
                            },
                        ));
                    }
                }

                if first_glyph.is_some() {
                    Ok(Box::new(GlyphDepth::new(glyph)))
                } else {
                    Ok(Box::new(IndentWidthDepth::new(indent_width)))
                }
            }
        }
    }
}

impl fmt::Display for IndentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndentStyle::Auto => "auto",
            IndentStyle::Glyph => "glyph",
            IndentStyle::Spaces => "spaces",
        };
        write!(f, "{}", name)
    }
}
