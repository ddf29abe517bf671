//! Scaffold Core - Shared library for scaffolding projects from tree diagrams
//!
//! This library turns a plain-text tree listing into directories and empty
//! files on disk. It is used by the `scaffold` binary but works on its own.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Line normalization (`tree`) and the stack-based
//!   hierarchy builder over a pluggable filesystem (`builder`)
//! - **Layer 2: Inputs** - Structure sources (local or remote) and `scaffold.yaml` settings
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```no_run
//! use scaffold_core::{scaffold, LocalFs, ParseOptions};
//! use std::path::Path;
//!
//! let lines = ["my_app/", "    src/", "        main.py", "    README.md"];
//! let report = scaffold(Path::new("projects"), &lines, &ParseOptions::default(), &mut LocalFs)?;
//! println!("{} entries created", report.created());
//! # Ok::<(), scaffold_core::ScaffoldError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod preview;
pub mod source;
pub mod tree;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use builder::{
    build_hierarchy, build_project, scaffold, BuildReport, DryRunFs, LocalFs, ScaffoldFs,
};
pub use config::ScaffoldConfig;
pub use error::{Malformation, Result, ScaffoldError};
pub use preview::preview;
pub use source::{StructureLoader, StructureSource};
pub use tree::{parse_lines, IndentStyle, NormalizedEntry, ParseOptions};

#[cfg(feature = "tui")]
pub use tui::run;
