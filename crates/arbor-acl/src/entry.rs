//! Access-control entries.

use crate::restriction::RestrictionSet;
use arbor_core::PrivilegeBits;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Identifier stamped on an entry each time the list creates or rewrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Creates a new random entry ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Merge key: entries with equal keys and equal polarity are always merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    /// Principal name.
    pub principal: String,
    /// Canonical restriction set.
    pub restrictions: RestrictionSet,
}

/// One principal/privileges/polarity/restrictions binding.
///
/// Equality and hashing are structural and ignore [`EntryId`], so an entry
/// built by a caller matches a stored entry with the same content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessControlEntry {
    id: EntryId,
    principal: String,
    privileges: PrivilegeBits,
    allow: bool,
    restrictions: RestrictionSet,
}

impl AccessControlEntry {
    /// Creates an entry with a fresh id.
    pub fn new<S: Into<String>>(
        principal: S,
        privileges: PrivilegeBits,
        allow: bool,
        restrictions: RestrictionSet,
    ) -> Self {
        Self {
            id: EntryId::new(),
            principal: principal.into(),
            privileges,
            allow,
            restrictions,
        }
    }

    /// Copy of this entry with different privileges and a fresh id.
    pub(crate) fn with_privileges(&self, privileges: PrivilegeBits) -> Self {
        Self {
            id: EntryId::new(),
            principal: self.principal.clone(),
            privileges,
            allow: self.allow,
            restrictions: self.restrictions.clone(),
        }
    }

    /// Identifier assigned when this entry was created.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Principal name.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Granted or denied privileges.
    pub fn privileges(&self) -> PrivilegeBits {
        self.privileges
    }

    /// `true` for an allow entry, `false` for a deny entry.
    pub fn is_allow(&self) -> bool {
        self.allow
    }

    /// Attached restrictions.
    pub fn restrictions(&self) -> &RestrictionSet {
        &self.restrictions
    }

    /// Merge key of this entry.
    pub fn key(&self) -> EntryKey {
        EntryKey {
            principal: self.principal.clone(),
            restrictions: self.restrictions.clone(),
        }
    }

    pub(crate) fn has_key(&self, key: &EntryKey) -> bool {
        self.principal == key.principal && self.restrictions == key.restrictions
    }
}

impl PartialEq for AccessControlEntry {
    fn eq(&self, other: &Self) -> bool {
        self.principal == other.principal
            && self.privileges == other.privileges
            && self.allow == other.allow
            && self.restrictions == other.restrictions
    }
}

impl Eq for AccessControlEntry {}

impl Hash for AccessControlEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.principal.hash(state);
        self.privileges.hash(state);
        self.allow.hash(state);
        self.restrictions.hash(state);
    }
}

impl fmt::Display for AccessControlEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let polarity = if self.allow { "allow" } else { "deny" };
        write!(f, "{polarity} {} {}", self.principal, self.privileges)?;
        if !self.restrictions.is_empty() {
            write!(f, " {}", self.restrictions)?;
        }
        Ok(())
    }
}
