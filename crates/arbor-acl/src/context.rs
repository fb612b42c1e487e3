//! The external collaborators an access-control list consults.

use crate::config::AclConfig;
use crate::error::Result;
use crate::principal::{PrincipalDirectory, StaticPrincipalDirectory};
use crate::privilege::{PrivilegeRegistry, StaticPrivilegeRegistry};
use crate::restriction::{RestrictionCatalog, StaticRestrictionCatalog};
use std::fmt;
use std::sync::Arc;

/// Read-only handles to the privilege registry, principal directory, and
/// restriction catalog.
///
/// Cheap to clone (Arc internals); many lists can share one context.
#[derive(Clone)]
pub struct SecurityContext {
    privileges: Arc<dyn PrivilegeRegistry>,
    principals: Arc<dyn PrincipalDirectory>,
    restrictions: Arc<dyn RestrictionCatalog>,
}

impl SecurityContext {
    /// Context over caller-supplied collaborators.
    pub fn new(
        privileges: Arc<dyn PrivilegeRegistry>,
        principals: Arc<dyn PrincipalDirectory>,
        restrictions: Arc<dyn RestrictionCatalog>,
    ) -> Self {
        Self {
            privileges,
            principals,
            restrictions,
        }
    }

    /// Built-in privileges, an empty directory, and the `rep:glob` catalog.
    pub fn builtin() -> Self {
        Self::new(
            Arc::new(StaticPrivilegeRegistry::builtin()),
            Arc::new(StaticPrincipalDirectory::new()),
            Arc::new(StaticRestrictionCatalog::default_glob()),
        )
    }

    /// Builds the in-memory collaborators described by `config`.
    pub fn from_config(config: &AclConfig) -> Result<Self> {
        let privileges = StaticPrivilegeRegistry::new(&config.privileges)?;
        let restrictions = StaticRestrictionCatalog::new(config.restrictions.clone())?;
        let mut principals = StaticPrincipalDirectory::with_everyone(config.everyone.clone());
        for p in &config.principals {
            principals.register(p.to_principal());
        }
        log::info!(
            "Security context ready: {} privileges, {} restrictions, {} principals",
            privileges.len(),
            config.restrictions.len(),
            config.principals.len()
        );
        Ok(Self::new(
            Arc::new(privileges),
            Arc::new(principals),
            Arc::new(restrictions),
        ))
    }

    /// Replaces the restriction catalog.
    pub fn with_restrictions(mut self, restrictions: Arc<dyn RestrictionCatalog>) -> Self {
        self.restrictions = restrictions;
        self
    }

    /// Replaces the principal directory.
    pub fn with_principals(mut self, principals: Arc<dyn PrincipalDirectory>) -> Self {
        self.principals = principals;
        self
    }

    /// The privilege registry.
    pub fn privileges(&self) -> &dyn PrivilegeRegistry {
        self.privileges.as_ref()
    }

    /// The principal directory.
    pub fn principals(&self) -> &dyn PrincipalDirectory {
        self.principals.as_ref()
    }

    /// The restriction catalog.
    pub fn restrictions(&self) -> &dyn RestrictionCatalog {
        self.restrictions.as_ref()
    }
}

impl Default for SecurityContext {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for SecurityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityContext")
            .field("everyone", &self.principals.everyone())
            .finish_non_exhaustive()
    }
}
