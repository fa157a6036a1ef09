//! Engine configuration
//!
//! Loaded from TOML; every field has a default so an empty document is a
//! valid configuration.

use serde::Deserialize;
use std::path::Path;

use crate::errors::{FormBindError, Result};
use crate::logging_facility::Profile;

/// Which subtypes the child type resolver enumerates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtypeScope {
    /// Only subtypes declared in the reference type's own namespace
    #[default]
    DefiningNamespace,
    /// Every registered subtype
    Registry,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub log_profile: Profile,
    /// Source kinds accepted by `can_handle`
    pub accepted_source_kinds: Vec<String>,
    pub subtype_scope: SubtypeScope,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_profile: Profile::default(),
            accepted_source_kinds: vec!["view".to_string()],
            subtype_scope: SubtypeScope::default(),
        }
    }
}

impl EngineConfig {
    /// # Errors
    ///
    /// Returns `Config` if the text is not valid TOML for this shape.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FormBindError::Config {
            reason: e.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FormBindError::Config {
            reason: format!("{}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }
}
