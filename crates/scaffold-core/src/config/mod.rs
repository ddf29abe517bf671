//! Configuration file support

pub mod settings;

pub use settings::{ParseOverrides, ScaffoldConfig, CONFIG_FILE, DEFAULT_PROJECT_NAME};
