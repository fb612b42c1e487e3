//! # arbor-acl
//!
//! Access-control lists for Arbor content trees.
//!
//! This crate keeps per-path lists of allow and deny entries minimal:
//! - Privilege names resolved to bit sets through a registry
//! - Principal acceptance through a directory
//! - Restriction validation against a catalog
//! - Merge and split of entries sharing a principal and restrictions
//! - Explicit reordering and removal
//!
//! ```
//! use arbor_acl::{AccessControlList, Principal, RestrictionValues, SecurityContext};
//! use arbor_acl::privilege::names::{JCR_READ, JCR_WRITE};
//!
//! let mut acl = AccessControlList::new(Some("/content"), SecurityContext::builtin());
//! let alice = Principal::user("alice");
//! acl.add_entry(&alice, &[JCR_READ, JCR_WRITE], true, &RestrictionValues::new())?;
//! acl.add_entry(&alice, &[JCR_WRITE], false, &RestrictionValues::new())?;
//! assert_eq!(acl.len(), 2);
//! # Ok::<(), arbor_acl::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod list;
pub mod principal;
pub mod privilege;
pub mod restriction;
pub mod store;

mod proptests;

pub use config::{AclConfig, PrincipalConfig};
pub use context::SecurityContext;
pub use entry::{AccessControlEntry, EntryId, EntryKey};
pub use error::{Error, Result};
pub use list::AccessControlList;
pub use principal::{EVERYONE, Principal, PrincipalDirectory, StaticPrincipalDirectory};
pub use privilege::{PrivilegeDefinition, PrivilegeRegistry, StaticPrivilegeRegistry};
pub use restriction::{
    REP_GLOB, RestrictionCatalog, RestrictionDefinition, RestrictionSet, RestrictionValues,
    StaticRestrictionCatalog,
};
pub use store::EntryStore;

pub use arbor_core::{PrivilegeBits, PropertyType, Value};
