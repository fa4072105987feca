//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::CompensationTemplate;
use crate::store::DEFAULT_TEMPLATE_ID;

/// Metadata about the engine deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// The human-readable name of the payroll deployment.
    pub name: String,
    /// The version of the configuration set.
    pub version: String,
    /// The ISO currency code amounts are expressed in (e.g., "INR").
    pub currency: String,
    /// Decimal places shown when amounts are presented.
    #[serde(default = "default_presentation_scale")]
    pub presentation_scale: u32,
}

fn default_presentation_scale() -> u32 {
    2
}

impl Default for EngineMetadata {
    fn default() -> Self {
        Self {
            name: "Payroll Engine".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            currency: "INR".to_string(),
            presentation_scale: default_presentation_scale(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// The socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// engine.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineFile {
    /// Engine metadata.
    pub engine: EngineMetadata,
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// templates.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    /// The template reselected when an active template is deleted.
    #[serde(default = "default_template_id")]
    pub default_template: String,
    /// Seed templates, in display order.
    pub templates: Vec<CompensationTemplate>,
}

fn default_template_id() -> String {
    DEFAULT_TEMPLATE_ID.to_string()
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Engine metadata.
    metadata: EngineMetadata,
    /// Server settings.
    server: ServerConfig,
    /// Seed templates.
    templates: TemplatesConfig,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(metadata: EngineMetadata, server: ServerConfig, templates: TemplatesConfig) -> Self {
        Self {
            metadata,
            server,
            templates,
        }
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Returns the seed template configuration.
    pub fn templates(&self) -> &TemplatesConfig {
        &self.templates
    }
}
