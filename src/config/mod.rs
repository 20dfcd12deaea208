//! Configuration loading and management for the payroll engine.
//!
//! This module loads the regulatory tables from YAML files: table metadata,
//! the IMSS region list and one rate set per effective date.
//!
//! # Example
//!
//! ```no_run
//! use nomina_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/mx").unwrap();
//! println!("Loaded tables: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionConfig, EngineConfig, EngineMetadata, IsrConfig, RateConfig, RegionsConfig,
    SeveranceConfig, SubsidyConfig,
};
