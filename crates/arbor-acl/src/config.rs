//! Configuration of the in-memory collaborators.
//!
//! An [`AclConfig`] describes the privilege table, the supported
//! restrictions, and the known principals as a TOML document:
//!
//! ```toml
//! everyone = "everyone"
//!
//! [[privileges]]
//! name = "jcr:read"
//!
//! [[privileges]]
//! name = "app:publish"
//!
//! [[privileges]]
//! name = "app:all"
//! aggregates = ["jcr:read", "app:publish"]
//!
//! [[restrictions]]
//! name = "rep:glob"
//! type = "string"
//!
//! [[principals]]
//! name = "editors"
//! group = true
//! ```
//!
//! Omitted sections fall back to [`AclConfig::default`].

use crate::error::{Error, Result};
use crate::principal::{EVERYONE, Principal};
use crate::privilege::{PrivilegeDefinition, builtin_definitions};
use crate::restriction::{REP_GLOB, RestrictionDefinition};
use arbor_core::PropertyType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A principal known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalConfig {
    /// Principal name.
    pub name: String,

    /// Whether the principal is a group.
    #[serde(default)]
    pub group: bool,
}

impl PrincipalConfig {
    /// The directory entry for this principal.
    pub fn to_principal(&self) -> Principal {
        if self.group {
            Principal::group(self.name.clone())
        } else {
            Principal::user(self.name.clone())
        }
    }
}

/// Configuration for a [`SecurityContext`](crate::SecurityContext).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    /// Name of the everyone group.
    pub everyone: String,

    /// Privilege table.
    pub privileges: Vec<PrivilegeDefinition>,

    /// Supported restrictions for every node path.
    pub restrictions: Vec<RestrictionDefinition>,

    /// Principals registered in the directory.
    pub principals: Vec<PrincipalConfig>,
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            everyone: EVERYONE.to_string(),
            privileges: builtin_definitions(),
            restrictions: vec![RestrictionDefinition::new(
                REP_GLOB,
                PropertyType::String,
                false,
            )],
            principals: Vec::new(),
        }
    }
}

impl AclConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse config: {e}")))
    }

    /// Loads a TOML document from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| arbor_core::Error::io_with_path(e, path))?;
        log::debug!("Loading access-control configuration from {}", path.display());
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}
