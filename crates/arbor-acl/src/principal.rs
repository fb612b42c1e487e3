//! Principals and the principal acceptance check.
//!
//! A [`Principal`] is one of a closed set of variants. Users and groups are
//! native to the security model and always admissible. An
//! [`External`](Principal::External) principal comes from some other source
//! and is admissible only when the [`PrincipalDirectory`] knows its name.
//!
//! Principals are matched by name everywhere in the engine: a native user
//! named `alice` and an external principal named `alice` are the same
//! principal for merge purposes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the everyone group unless configured otherwise.
pub const EVERYONE: &str = "everyone";

/// A principal reference submitted with an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Principal {
    /// Native individual principal.
    User(String),
    /// Native group principal.
    Group(String),
    /// Principal supplied by a third-party implementation.
    External(String),
}

impl Principal {
    /// Native user principal.
    pub fn user<S: Into<String>>(name: S) -> Self {
        Self::User(name.into())
    }

    /// Native group principal.
    pub fn group<S: Into<String>>(name: S) -> Self {
        Self::Group(name.into())
    }

    /// Third-party principal.
    pub fn external<S: Into<String>>(name: S) -> Self {
        Self::External(name.into())
    }

    /// The principal's name, which is its identity for matching.
    pub fn name(&self) -> &str {
        match self {
            Self::User(name) | Self::Group(name) | Self::External(name) => name,
        }
    }

    /// Returns `true` for users and groups.
    pub fn is_native(&self) -> bool {
        matches!(self, Self::User(_) | Self::Group(_))
    }

    /// Returns `true` for groups.
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lookup of principals by name.
pub trait PrincipalDirectory: Send + Sync {
    /// Returns the principal registered under `name`, if any.
    fn resolve_by_name(&self, name: &str) -> Option<Principal>;

    /// The group every principal belongs to.
    fn everyone(&self) -> Principal;
}

/// In-memory [`PrincipalDirectory`].
///
/// The everyone group always resolves, whether or not it was registered.
#[derive(Debug, Clone)]
pub struct StaticPrincipalDirectory {
    everyone: String,
    principals: BTreeMap<String, Principal>,
}

impl StaticPrincipalDirectory {
    /// Empty directory whose everyone group is named [`EVERYONE`].
    pub fn new() -> Self {
        Self::with_everyone(EVERYONE)
    }

    /// Empty directory with a custom everyone group name.
    pub fn with_everyone<S: Into<String>>(name: S) -> Self {
        Self {
            everyone: name.into(),
            principals: BTreeMap::new(),
        }
    }

    /// Registers a principal, replacing any with the same name.
    pub fn register(&mut self, principal: Principal) {
        self.principals
            .insert(principal.name().to_string(), principal);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.register(principal);
        self
    }
}

impl Default for StaticPrincipalDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl PrincipalDirectory for StaticPrincipalDirectory {
    fn resolve_by_name(&self, name: &str) -> Option<Principal> {
        if name == self.everyone {
            return Some(self.everyone());
        }
        self.principals.get(name).cloned()
    }

    fn everyone(&self) -> Principal {
        Principal::Group(self.everyone.clone())
    }
}

/// Decides whether `principal` may appear in an entry and returns its key.
///
/// Native principals are accepted without a directory lookup. Any other
/// principal must resolve by name. Empty names are always rejected.
pub fn accept_principal(principal: &Principal, directory: &dyn PrincipalDirectory) -> Result<String> {
    let name = principal.name();
    if name.is_empty() {
        return Err(Error::invalid_principal(name));
    }
    if principal.is_native() || directory.resolve_by_name(name).is_some() {
        Ok(name.to_string())
    } else {
        Err(Error::invalid_principal(name))
    }
}
