//! Tree-diagram parsing
//!
//! This module provides:
//! - Depth policies for glyph-drawn and space-indented diagrams
//! - Line cleaning and whole-file normalization into `(depth, name)` entries

pub mod depth;
pub mod normalize;

pub use depth::{DepthPolicy, GlyphDepth, IndentKind, IndentStyle, IndentWidthDepth};
pub use normalize::{clean_line, parse_lines, LineNormalizer, NormalizedEntry, ParseOptions};
