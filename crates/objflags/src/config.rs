//! Flag subsystem configuration.
//!
//! ```toml
//! god = 1
//! protected_objects = [0, 2, 43]
//! flag_access = [
//!     "haven wizard",
//!     "head=royalty",
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{Dbref, FlagRegistry};

/// Configuration consumed by the access policies and the registry loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagConfig {
    /// The singular top authority
    pub god: Dbref,
    /// Objects that may never be marked GOING (start room, homes, master room).
    /// Object #0 and God are always protected as well.
    pub protected_objects: Vec<Dbref>,
    /// `<flag-name> <access-policy-name>` directives, applied in order
    pub flag_access: Vec<String>,
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            god: Dbref(1),
            protected_objects: vec![Dbref(0), Dbref(2)],
            flag_access: Vec::new(),
        }
    }
}

impl FlagConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a file. `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text)?,
            _ => Self::from_toml(&text)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.god.is_valid() {
            return Err(ConfigError::InvalidGod(self.god));
        }
        if let Some(bad) = self.protected_objects.iter().find(|d| !d.is_valid()) {
            return Err(ConfigError::InvalidProtectedObject(*bad));
        }
        Ok(())
    }

    /// Whether `target` may never be marked GOING.
    pub fn is_protected(&self, target: Dbref) -> bool {
        target == Dbref(0) || target == self.god || self.protected_objects.contains(&target)
    }

    /// Apply the `flag_access` directives. Each one stands alone: a bad
    /// directive is logged and skipped. Returns how many were applied.
    pub fn apply_access(&self, registry: &mut FlagRegistry) -> usize {
        let mut applied = 0;
        for directive in &self.flag_access {
            match registry.apply_access_directive(directive) {
                Ok(()) => applied += 1,
                Err(e) => tracing::warn!("Ignoring flag_access '{}': {}", directive, e),
            }
        }
        applied
    }
}
