//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::CompensationTemplate;
use crate::store::{DEFAULT_TEMPLATE_ID, TemplateStore, builtin_templates};

use super::types::{
    EngineFile, EngineMetadata, PayrollConfig, ServerConfig, TemplatesConfig,
};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and builds the seed [`TemplateStore`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/payroll/
/// ├── engine.yaml      # Engine metadata and server settings
/// └── templates.yaml   # Seed compensation templates
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll").unwrap();
/// let store = loader.template_store().unwrap();
/// println!("Loaded {} templates", store.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/payroll")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        // Load engine.yaml
        let engine_path = path.join("engine.yaml");
        let engine_file = Self::load_yaml::<EngineFile>(&engine_path)?;

        // Load templates.yaml
        let templates_path = path.join("templates.yaml");
        let templates = Self::load_yaml::<TemplatesConfig>(&templates_path)?;

        if templates.templates.is_empty() {
            return Err(EngineError::ConfigParseError {
                path: templates_path.display().to_string(),
                message: "at least one template must be configured".to_string(),
            });
        }

        let config = PayrollConfig::new(engine_file.engine, engine_file.server, templates);

        Ok(Self { config })
    }

    /// Returns a configuration holding the built-in templates and default
    /// settings, without reading any file.
    pub fn builtin() -> Self {
        let templates = TemplatesConfig {
            default_template: DEFAULT_TEMPLATE_ID.to_string(),
            templates: builtin_templates(),
        };
        Self {
            config: PayrollConfig::new(EngineMetadata::default(), ServerConfig::default(), templates),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        self.config.engine()
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        self.config.server()
    }

    /// Gets a seed template by its ID.
    ///
    /// # Returns
    ///
    /// Returns the template if configured, or `TemplateNotFound` error.
    pub fn get_template(&self, id: &str) -> EngineResult<&CompensationTemplate> {
        self.config
            .templates()
            .templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::TemplateNotFound { id: id.to_string() })
    }

    /// Builds a template store seeded with the configured templates.
    ///
    /// # Returns
    ///
    /// Returns an `InvalidTemplate` error if a configured template is invalid
    /// or two share an ID.
    pub fn template_store(&self) -> EngineResult<TemplateStore> {
        let templates = self.config.templates();
        TemplateStore::new(templates.templates.clone(), templates.default_template.clone())
    }
}
