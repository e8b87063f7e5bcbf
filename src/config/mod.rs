//! Configuration loading and management for the Redundancy Engine.
//!
//! This module loads the agreement metadata, fiscal-year tax-free cap
//! constants and input defaults from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use redundancy_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/paso").unwrap();
//! println!("Loaded agreement: {}", config.agreement().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AgreementConfig, AgreementMetadata, AgreementReference, EngineDefaults, TaxFreeCapConstants,
    TaxFreeCapsConfig,
};
