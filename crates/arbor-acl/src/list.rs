//! The access-control list and its merge engine.
//!
//! [`AccessControlList::add_entry`] keeps the list minimal: for a given
//! principal and restriction set there is at most one allow entry and one
//! deny entry. Existing entries for the request's key are considered in list
//! order:
//!
//! | First entry for the same key   | Outcome |
//! |--------------------------------|---------|
//! | same polarity, covers request  | unchanged, returns `false` |
//! | same polarity, partial         | bits grow in place; a later complementary entry is kept |
//! | opposite polarity              | shrinks in place or is removed, then the request is merged into a later same-polarity entry or appended |
//! | none                           | appended at the end |
//!
//! Every check runs before the first mutation, so a failed call leaves the
//! list untouched.

use crate::context::SecurityContext;
use crate::entry::{AccessControlEntry, EntryKey};
use crate::error::{Error, Result};
use crate::principal::{Principal, accept_principal};
use crate::restriction::{RestrictionValues, validate_restrictions};
use crate::store::EntryStore;
use arbor_core::{PrivilegeBits, PropertyType};

/// Ordered access-control entries for one path.
///
/// Not synchronized; callers sharing a list across threads must serialize
/// access themselves.
#[derive(Debug, Clone)]
pub struct AccessControlList {
    path: Option<String>,
    context: SecurityContext,
    store: EntryStore,
}

impl AccessControlList {
    /// Empty list for `path`; `None` is the repository-level list.
    pub fn new(path: Option<&str>, context: SecurityContext) -> Self {
        Self {
            path: path.map(str::to_string),
            context,
            store: EntryStore::new(),
        }
    }

    /// List seeded with previously stored entries, in order.
    ///
    /// Seeded entries go through the same merge rules as
    /// [`add_entry`](Self::add_entry) but are not re-validated; entries with
    /// no privileges are dropped.
    pub fn with_entries<I>(path: Option<&str>, context: SecurityContext, entries: I) -> Self
    where
        I: IntoIterator<Item = AccessControlEntry>,
    {
        let mut acl = Self::new(path, context);
        for entry in entries {
            if entry.privileges().is_empty() {
                log::debug!("Dropping empty entry for '{}'", entry.principal());
                continue;
            }
            let key = entry.key();
            acl.merge(key, entry.privileges(), entry.is_allow());
        }
        acl
    }

    /// Path this list applies to.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Collaborators consulted by this list.
    pub fn context(&self) -> &SecurityContext {
        &self.context
    }

    /// Adds an entry, merging it with existing entries for the same principal
    /// and restrictions.
    ///
    /// Returns `true` if the list changed.
    ///
    /// # Errors
    ///
    /// In order of checking: [`Error::EmptyPrivileges`],
    /// [`Error::InvalidPrivilege`], [`Error::InvalidPrincipal`], then the
    /// restriction errors.
    pub fn add_entry(
        &mut self,
        principal: &Principal,
        privileges: &[&str],
        allow: bool,
        restrictions: &RestrictionValues,
    ) -> Result<bool> {
        let (key, bits) = self
            .validate(principal, privileges, restrictions)
            .inspect_err(|e| log::debug!("Rejected entry for '{}': {e}", principal.name()))?;
        Ok(self.merge(key, bits, allow))
    }

    /// Adds an allow entry without restrictions.
    pub fn add_access_control_entry(
        &mut self,
        principal: &Principal,
        privileges: &[&str],
    ) -> Result<bool> {
        self.add_entry(principal, privileges, true, &RestrictionValues::new())
    }

    /// Removes the entry structurally equal to `entry`.
    ///
    /// # Errors
    ///
    /// [`Error::EntryNotFound`] if no such entry is in the list.
    pub fn remove_entry(&mut self, entry: &AccessControlEntry) -> Result<()> {
        let position = self.position_of(entry)?;
        self.store.replace_at(position, None);
        log::debug!("Removed entry at {position}: {entry}");
        Ok(())
    }

    /// Moves `src` to just before `dest`, or to the end when `dest` is `None`.
    ///
    /// # Errors
    ///
    /// [`Error::EntryNotFound`] if `src`, or a given `dest`, is not in the list.
    pub fn order_before(
        &mut self,
        src: &AccessControlEntry,
        dest: Option<&AccessControlEntry>,
    ) -> Result<()> {
        let from = self.position_of(src)?;
        let to = dest.map(|d| self.position_of(d)).transpose()?;
        self.store.move_before(from, to);
        log::debug!("Reordered {src} from {from} to before {to:?}");
        Ok(())
    }

    /// Entries in evaluation order.
    pub fn entries(&self) -> &[AccessControlEntry] {
        self.store.as_slice()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the list holds no entry.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Names of the restrictions supported at this list's path.
    pub fn restriction_names(&self) -> Vec<String> {
        self.context
            .restrictions()
            .supported_restrictions(self.path())
            .into_iter()
            .map(|d| d.name)
            .collect()
    }

    /// Required type of a supported restriction, or
    /// [`PropertyType::Undefined`] if the name is not supported here.
    pub fn restriction_type(&self, name: &str) -> PropertyType {
        self.context
            .restrictions()
            .supported_restrictions(self.path())
            .into_iter()
            .find(|d| d.name == name)
            .map_or(PropertyType::Undefined, |d| d.required_type)
    }

    /// Privilege names of an entry as reported by the registry.
    pub fn privilege_names(&self, entry: &AccessControlEntry) -> Vec<String> {
        self.context.privileges().expand(entry.privileges())
    }

    fn validate(
        &self,
        principal: &Principal,
        privileges: &[&str],
        restrictions: &RestrictionValues,
    ) -> Result<(EntryKey, PrivilegeBits)> {
        if privileges.is_empty() {
            return Err(Error::EmptyPrivileges);
        }
        let bits = self.context.privileges().resolve(privileges)?;
        if bits.is_empty() {
            return Err(Error::EmptyPrivileges);
        }
        let principal = accept_principal(principal, self.context.principals())?;
        let restrictions =
            validate_restrictions(self.context.restrictions(), self.path(), restrictions)?;
        Ok((
            EntryKey {
                principal,
                restrictions,
            },
            bits,
        ))
    }

    fn merge(&mut self, key: EntryKey, bits: PrivilegeBits, allow: bool) -> bool {
        let same = self.store.find(&key, allow);
        if let Some(pos) = same
            && self.store.as_slice()[pos].privileges().contains(bits)
        {
            log::debug!("Entry for '{}' already covers {bits}", key.principal);
            return false;
        }

        // Entries are visited in list order: a same-polarity entry ahead of the
        // complementary one absorbs the request and the later entry is kept.
        let opposite = self
            .store
            .find(&key, !allow)
            .filter(|o| same.is_none_or(|s| *o < s));
        if let Some(pos) = opposite {
            self.reduce(pos, bits);
        }

        match self.store.find(&key, allow) {
            Some(pos) => {
                let existing = &self.store.as_slice()[pos];
                let merged = existing.with_privileges(existing.privileges() | bits);
                log::debug!("Merged {bits} into entry at {pos}: {merged}");
                self.store.replace_at(pos, Some(merged));
            }
            None => {
                let entry = AccessControlEntry::new(key.principal, bits, allow, key.restrictions);
                log::debug!("Appended entry at {}: {entry}", self.store.len());
                self.store.append(entry);
            }
        }
        true
    }

    fn reduce(&mut self, pos: usize, bits: PrivilegeBits) {
        let Some(entry) = self.store.get(pos) else {
            return;
        };
        let remaining = entry.privileges() - bits;
        if remaining.is_empty() {
            log::debug!("Removed complementary entry at {pos}: {entry}");
            self.store.replace_at(pos, None);
        } else if remaining != entry.privileges() {
            let updated = entry.with_privileges(remaining);
            log::debug!("Reduced complementary entry at {pos} to {updated}");
            self.store.replace_at(pos, Some(updated));
        }
    }

    fn position_of(&self, entry: &AccessControlEntry) -> Result<usize> {
        self.store
            .index_of(entry)
            .ok_or_else(|| Error::EntryNotFound {
                entry: entry.to_string(),
            })
    }
}
