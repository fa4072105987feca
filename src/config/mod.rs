//! Configuration loading and management for the Payroll Calculation Engine.
//!
//! This module provides functionality to load payroll configurations from YAML
//! files, including engine metadata, server settings and seed templates.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Loaded engine: {}", config.engine().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineFile, EngineMetadata, PayrollConfig, ServerConfig, TemplatesConfig};
