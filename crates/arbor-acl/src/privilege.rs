//! Privilege registry.
//!
//! The registry maps privilege names to [`PrivilegeBits`] and back. Aggregate
//! privileges (such as `jcr:write`) expand to the union of their members;
//! every non-aggregate privilege owns one id in the dense id space.
//!
//! ```
//! use arbor_acl::privilege::{names, PrivilegeRegistry, StaticPrivilegeRegistry};
//!
//! let registry = StaticPrivilegeRegistry::builtin();
//! let write = registry.resolve(&[names::JCR_WRITE]).unwrap();
//! let props = registry.resolve(&[names::JCR_MODIFY_PROPERTIES]).unwrap();
//! assert!(write.contains(props));
//! assert_eq!(registry.expand(write), vec![names::JCR_WRITE.to_string()]);
//! ```

use crate::error::{Error, Result};
use arbor_core::PrivilegeBits;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Well-known privilege names.
pub mod names {
    /// Read nodes and properties.
    pub const JCR_READ: &str = "jcr:read";
    /// Set, modify, and remove properties.
    pub const JCR_MODIFY_PROPERTIES: &str = "jcr:modifyProperties";
    /// Add child nodes.
    pub const JCR_ADD_CHILD_NODES: &str = "jcr:addChildNodes";
    /// Remove the node itself.
    pub const JCR_REMOVE_NODE: &str = "jcr:removeNode";
    /// Remove child nodes.
    pub const JCR_REMOVE_CHILD_NODES: &str = "jcr:removeChildNodes";
    /// Read access-control content.
    pub const JCR_READ_ACCESS_CONTROL: &str = "jcr:readAccessControl";
    /// Modify access-control content.
    pub const JCR_MODIFY_ACCESS_CONTROL: &str = "jcr:modifyAccessControl";
    /// Change primary and mixin types.
    pub const JCR_NODE_TYPE_MANAGEMENT: &str = "jcr:nodeTypeManagement";
    /// Lock and unlock nodes.
    pub const JCR_LOCK_MANAGEMENT: &str = "jcr:lockManagement";
    /// Versioning operations.
    pub const JCR_VERSION_MANAGEMENT: &str = "jcr:versionManagement";
    /// Lifecycle operations.
    pub const JCR_LIFECYCLE_MANAGEMENT: &str = "jcr:lifecycleManagement";
    /// Retention and hold operations.
    pub const JCR_RETENTION_MANAGEMENT: &str = "jcr:retentionManagement";
    /// Namespace registration (repository level).
    pub const JCR_NAMESPACE_MANAGEMENT: &str = "jcr:namespaceManagement";
    /// Node type registration (repository level).
    pub const JCR_NODE_TYPE_DEFINITION_MANAGEMENT: &str = "jcr:nodeTypeDefinitionManagement";
    /// Workspace creation and removal (repository level).
    pub const JCR_WORKSPACE_MANAGEMENT: &str = "jcr:workspaceManagement";
    /// Privilege registration (repository level).
    pub const REP_PRIVILEGE_MANAGEMENT: &str = "rep:privilegeManagement";
    /// Aggregate of the four content-modification privileges.
    pub const JCR_WRITE: &str = "jcr:write";
    /// `jcr:write` plus node type management.
    pub const REP_WRITE: &str = "rep:write";
    /// Every privilege.
    pub const JCR_ALL: &str = "jcr:all";
}

/// Maps privilege names to bit sets.
pub trait PrivilegeRegistry: Send + Sync {
    /// Resolves names to the union of their bits.
    ///
    /// Fails with [`Error::InvalidPrivilege`] for an unknown or abstract name.
    fn resolve(&self, names: &[&str]) -> Result<PrivilegeBits>;

    /// Names the privileges in `bits`, preferring aggregates where they are
    /// fully covered.
    fn expand(&self, bits: PrivilegeBits) -> Vec<String>;
}

/// Declaration of one privilege.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeDefinition {
    /// Qualified name, e.g. `jcr:read`.
    pub name: String,

    /// Member privileges; empty for a non-aggregate privilege.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aggregates: Vec<String>,

    /// Abstract privileges can be declared but never granted.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
}

impl PrivilegeDefinition {
    /// A non-aggregate privilege.
    pub fn simple<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            aggregates: Vec::new(),
            is_abstract: false,
        }
    }

    /// An aggregate privilege over the given members.
    pub fn aggregate<S: Into<String>>(name: S, members: &[&str]) -> Self {
        Self {
            name: name.into(),
            aggregates: members.iter().map(|m| m.to_string()).collect(),
            is_abstract: false,
        }
    }

    /// Returns `true` if this privilege aggregates others.
    pub fn is_aggregate(&self) -> bool {
        !self.aggregates.is_empty()
    }
}

/// The built-in privilege table.
pub fn builtin_definitions() -> Vec<PrivilegeDefinition> {
    use names::*;

    let simple = [
        JCR_READ,
        JCR_MODIFY_PROPERTIES,
        JCR_ADD_CHILD_NODES,
        JCR_REMOVE_NODE,
        JCR_REMOVE_CHILD_NODES,
        JCR_READ_ACCESS_CONTROL,
        JCR_MODIFY_ACCESS_CONTROL,
        JCR_NODE_TYPE_MANAGEMENT,
        JCR_LOCK_MANAGEMENT,
        JCR_VERSION_MANAGEMENT,
        JCR_LIFECYCLE_MANAGEMENT,
        JCR_RETENTION_MANAGEMENT,
        JCR_NAMESPACE_MANAGEMENT,
        JCR_NODE_TYPE_DEFINITION_MANAGEMENT,
        JCR_WORKSPACE_MANAGEMENT,
        REP_PRIVILEGE_MANAGEMENT,
    ];

    let mut defs: Vec<PrivilegeDefinition> =
        simple.iter().map(|n| PrivilegeDefinition::simple(*n)).collect();
    defs.push(PrivilegeDefinition::aggregate(
        JCR_WRITE,
        &[
            JCR_MODIFY_PROPERTIES,
            JCR_ADD_CHILD_NODES,
            JCR_REMOVE_NODE,
            JCR_REMOVE_CHILD_NODES,
        ],
    ));
    defs.push(PrivilegeDefinition::aggregate(
        REP_WRITE,
        &[JCR_WRITE, JCR_NODE_TYPE_MANAGEMENT],
    ));
    let mut all: Vec<&str> = simple.to_vec();
    all.push(JCR_WRITE);
    defs.push(PrivilegeDefinition::aggregate(JCR_ALL, &all));
    defs
}

#[derive(Debug, Clone)]
struct RegisteredPrivilege {
    bits: PrivilegeBits,
    is_abstract: bool,
    aggregate: bool,
    order: usize,
}

/// In-memory [`PrivilegeRegistry`] built from a fixed table.
#[derive(Debug, Clone)]
pub struct StaticPrivilegeRegistry {
    privileges: BTreeMap<String, RegisteredPrivilege>,
}

impl StaticPrivilegeRegistry {
    /// Builds a registry from definitions.
    ///
    /// Non-aggregate privileges receive ids in declaration order. Fails with
    /// [`Error::Config`] on duplicate names, unknown aggregate members,
    /// aggregate cycles, or more privileges than [`PrivilegeBits::CAPACITY`].
    pub fn new(definitions: &[PrivilegeDefinition]) -> Result<Self> {
        let mut by_name: BTreeMap<&str, &PrivilegeDefinition> = BTreeMap::new();
        for def in definitions {
            if def.name.trim().is_empty() {
                return Err(Error::config("privilege name must not be empty"));
            }
            if by_name.insert(def.name.as_str(), def).is_some() {
                return Err(Error::config(format!("duplicate privilege '{}'", def.name)));
            }
        }

        let mut simple_bits: BTreeMap<&str, PrivilegeBits> = BTreeMap::new();
        for def in definitions.iter().filter(|d| !d.is_aggregate()) {
            let bits = PrivilegeBits::from_id(simple_bits.len()).ok_or_else(|| {
                Error::config(format!(
                    "too many privileges: at most {} can be registered",
                    PrivilegeBits::CAPACITY
                ))
            })?;
            simple_bits.insert(def.name.as_str(), bits);
        }

        let mut privileges = BTreeMap::new();
        for (order, def) in definitions.iter().enumerate() {
            let bits = if def.is_aggregate() {
                let mut visiting = HashSet::new();
                aggregate_bits(&def.name, &by_name, &simple_bits, &mut visiting)?
            } else {
                simple_bits[def.name.as_str()]
            };
            privileges.insert(
                def.name.clone(),
                RegisteredPrivilege {
                    bits,
                    is_abstract: def.is_abstract,
                    aggregate: def.is_aggregate(),
                    order,
                },
            );
        }

        Ok(Self { privileges })
    }

    /// Registry over [`builtin_definitions`].
    ///
    /// Falls back to an empty registry, logged at error level, if the
    /// built-in table is rejected.
    pub fn builtin() -> Self {
        Self::new(&builtin_definitions()).unwrap_or_else(|e| {
            log::error!("Built-in privilege table rejected, registry is empty: {e}");
            Self {
                privileges: BTreeMap::new(),
            }
        })
    }

    /// Returns `true` if the name is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.privileges.contains_key(name)
    }

    /// Number of registered privileges, aggregates included.
    pub fn len(&self) -> usize {
        self.privileges.len()
    }

    /// Returns `true` if no privilege is registered.
    pub fn is_empty(&self) -> bool {
        self.privileges.is_empty()
    }
}

fn aggregate_bits<'a>(
    name: &'a str,
    by_name: &BTreeMap<&'a str, &'a PrivilegeDefinition>,
    simple_bits: &BTreeMap<&'a str, PrivilegeBits>,
    visiting: &mut HashSet<&'a str>,
) -> Result<PrivilegeBits> {
    let Some(def) = by_name.get(name) else {
        return Err(Error::config(format!("unknown aggregate member '{name}'")));
    };
    if !def.is_aggregate() {
        return Ok(simple_bits.get(name).copied().unwrap_or_default());
    }
    if !visiting.insert(name) {
        return Err(Error::config(format!(
            "aggregate privilege '{name}' contains itself"
        )));
    }
    let mut bits = PrivilegeBits::empty();
    for member in &def.aggregates {
        bits |= aggregate_bits(member.as_str(), by_name, simple_bits, visiting)?;
    }
    visiting.remove(name);
    Ok(bits)
}

impl PrivilegeRegistry for StaticPrivilegeRegistry {
    fn resolve(&self, names: &[&str]) -> Result<PrivilegeBits> {
        let mut bits = PrivilegeBits::empty();
        for name in names {
            match self.privileges.get(*name) {
                Some(p) if !p.is_abstract => bits |= p.bits,
                _ => return Err(Error::invalid_privilege(*name)),
            }
        }
        Ok(bits)
    }

    fn expand(&self, bits: PrivilegeBits) -> Vec<String> {
        let mut aggregates: Vec<(&String, &RegisteredPrivilege)> =
            self.privileges.iter().filter(|(_, p)| p.aggregate).collect();
        aggregates.sort_by(|(_, a), (_, b)| {
            b.bits
                .len()
                .cmp(&a.bits.len())
                .then(a.order.cmp(&b.order))
        });

        let mut remaining = bits;
        let mut names = Vec::new();
        for (name, p) in aggregates {
            if !p.bits.is_empty() && remaining.contains(p.bits) {
                names.push(name.clone());
                remaining = remaining - p.bits;
            }
        }

        let mut simple: Vec<(&String, &RegisteredPrivilege)> = self
            .privileges
            .iter()
            .filter(|(_, p)| !p.aggregate && remaining.contains(p.bits))
            .collect();
        simple.sort_by_key(|(_, p)| p.order);
        names.extend(simple.into_iter().map(|(name, _)| name.clone()));
        names
    }
}
