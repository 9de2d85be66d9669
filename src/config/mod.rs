//! Configuration loading and management for the compensation engine.
//!
//! This module loads engine settings, imported rate brackets and registry
//! records from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use compensation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded deployment: {}", config.settings().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DirectoryConfig, EngineSettings, RateFile, RegionsConfig};
