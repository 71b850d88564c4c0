//! Configuration management
//!
//! This module handles loading and validation of the authentication
//! configuration: the list of scopes, each with its path pattern, scheme
//! order and credential sources.

pub mod models;

pub use models::{AuthGateConfig, ScopeConfig, SourceConfig};

use crate::utils::error::{GateError, Result};
use std::path::Path;
use tracing::{debug, info};

impl AuthGateConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .map_err(|e| GateError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: AuthGateConfig = serde_yaml::from_str(content)
            .map_err(|e| GateError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!(scopes = config.scopes.len(), "configuration loaded");
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.scopes.is_empty() {
            return Err(GateError::Config(
                "configuration defines no scopes".to_string(),
            ));
        }

        for scope in &self.scopes {
            scope
                .validate()
                .map_err(|e| GateError::Config(format!("Scope config error: {}", e)))?;
        }

        for (idx, scope) in self.scopes.iter().enumerate() {
            if self.scopes[..idx].iter().any(|s| s.pattern == scope.pattern) {
                return Err(GateError::Config(format!(
                    "Scope config error: pattern '{}' defined more than once",
                    scope.pattern
                )));
            }
        }

        Ok(())
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| GateError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
