//! Restrictions and restriction validation.
//!
//! A restriction narrows when an entry applies, e.g. `rep:glob = "/.*"`.
//! Which restrictions may be used, their required types, and which are
//! mandatory all come from a [`RestrictionCatalog`] for the list's path.

use crate::error::{Error, Result};
use arbor_core::{PropertyType, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Glob restriction supported by the default catalog.
pub const REP_GLOB: &str = "rep:glob";

/// Restriction values as submitted by a caller, keyed by name.
pub type RestrictionValues = BTreeMap<String, Value>;

/// Declaration of a supported restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionDefinition {
    /// Restriction name.
    pub name: String,

    /// Type a submitted value must have.
    #[serde(rename = "type")]
    pub required_type: PropertyType,

    /// Whether every new entry must carry this restriction.
    #[serde(default)]
    pub mandatory: bool,
}

impl RestrictionDefinition {
    /// Creates a definition.
    pub fn new<S: Into<String>>(name: S, required_type: PropertyType, mandatory: bool) -> Self {
        Self {
            name: name.into(),
            required_type,
            mandatory,
        }
    }
}

/// A validated restriction attached to an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restriction {
    /// Restriction name.
    pub name: String,
    /// Restriction value.
    pub value: Value,
    /// Copied from the definition at validation time.
    pub mandatory: bool,
}

/// Immutable set of restrictions, unique by name.
///
/// Two sets are equal when they hold the same `(name, value)` pairs; the
/// mandatory flag does not take part in equality or hashing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestrictionSet {
    restrictions: BTreeMap<String, Restriction>,
}

impl RestrictionSet {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the set holds no restriction.
    pub fn is_empty(&self) -> bool {
        self.restrictions.is_empty()
    }

    /// Number of restrictions.
    pub fn len(&self) -> usize {
        self.restrictions.len()
    }

    /// Looks up a restriction by name.
    pub fn get(&self, name: &str) -> Option<&Restriction> {
        self.restrictions.get(name)
    }

    /// Restriction names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.restrictions.keys().map(String::as_str)
    }

    /// Restrictions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Restriction> {
        self.restrictions.values()
    }
}

impl PartialEq for RestrictionSet {
    fn eq(&self, other: &Self) -> bool {
        self.restrictions.len() == other.restrictions.len()
            && self
                .restrictions
                .iter()
                .zip(&other.restrictions)
                .all(|((a_name, a), (b_name, b))| a_name == b_name && a.value == b.value)
    }
}

impl Eq for RestrictionSet {}

impl Hash for RestrictionSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.restrictions.len().hash(state);
        for (name, r) in &self.restrictions {
            name.hash(state);
            r.value.hash(state);
        }
    }
}

impl fmt::Display for RestrictionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .restrictions
            .iter()
            .map(|(name, r)| format!("{name}={}", r.value))
            .collect();
        write!(f, "[{}]", pairs.join(", "))
    }
}

/// Source of supported restriction definitions per path.
pub trait RestrictionCatalog: Send + Sync {
    /// Definitions supported for `path`; `None` is the repository level.
    fn supported_restrictions(&self, path: Option<&str>) -> Vec<RestrictionDefinition>;
}

/// In-memory [`RestrictionCatalog`] with one set of definitions for every
/// node path. The repository level supports no restrictions.
#[derive(Debug, Clone, Default)]
pub struct StaticRestrictionCatalog {
    definitions: Vec<RestrictionDefinition>,
}

impl StaticRestrictionCatalog {
    /// Catalog over the given definitions.
    ///
    /// Fails with [`Error::Config`] on duplicate or empty names.
    pub fn new(definitions: Vec<RestrictionDefinition>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for def in &definitions {
            if def.name.trim().is_empty() {
                return Err(Error::config("restriction name must not be empty"));
            }
            if !seen.insert(def.name.as_str()) {
                return Err(Error::config(format!(
                    "duplicate restriction '{}'",
                    def.name
                )));
            }
        }
        Ok(Self { definitions })
    }

    /// Catalog supporting only an optional `rep:glob` string restriction.
    pub fn default_glob() -> Self {
        Self {
            definitions: vec![RestrictionDefinition::new(
                REP_GLOB,
                PropertyType::String,
                false,
            )],
        }
    }
}

impl RestrictionCatalog for StaticRestrictionCatalog {
    fn supported_restrictions(&self, path: Option<&str>) -> Vec<RestrictionDefinition> {
        match path {
            Some(_) => self.definitions.clone(),
            None => Vec::new(),
        }
    }
}

/// Validates submitted restriction values against the catalog for `path`.
///
/// Names are checked for support first, then value types, then mandatory
/// definitions are checked for presence.
pub fn validate_restrictions(
    catalog: &dyn RestrictionCatalog,
    path: Option<&str>,
    values: &RestrictionValues,
) -> Result<RestrictionSet> {
    let supported = catalog.supported_restrictions(path);
    let by_name: BTreeMap<&str, &RestrictionDefinition> =
        supported.iter().map(|d| (d.name.as_str(), d)).collect();

    if let Some(name) = values.keys().find(|n| !by_name.contains_key(n.as_str())) {
        return Err(Error::UnsupportedRestriction { name: name.clone() });
    }

    let mut restrictions = BTreeMap::new();
    for (name, value) in values {
        let Some(def) = by_name.get(name.as_str()) else {
            continue;
        };
        if !def.required_type.accepts(value.property_type()) {
            return Err(Error::InvalidRestrictionType {
                name: name.clone(),
                expected: def.required_type,
                actual: value.property_type(),
            });
        }
        restrictions.insert(
            name.clone(),
            Restriction {
                name: name.clone(),
                value: value.clone(),
                mandatory: def.mandatory,
            },
        );
    }

    if let Some(missing) = supported
        .iter()
        .find(|d| d.mandatory && !values.contains_key(&d.name))
    {
        return Err(Error::MissingMandatoryRestriction {
            name: missing.name.clone(),
        });
    }

    Ok(RestrictionSet { restrictions })
}
