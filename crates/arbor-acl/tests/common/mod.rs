//! Common test utilities and harness for arbor-acl integration tests.

#![allow(dead_code)]

use arbor_acl::{
    AccessControlList, Principal, PrivilegeBits, REP_GLOB, RestrictionCatalog, RestrictionValues,
    SecurityContext, StaticPrincipalDirectory, Value,
};
use std::sync::Arc;

/// Path every harness list is created for.
pub const TEST_PATH: &str = "/testRoot";

/// Name of the principal registered in the harness directory.
pub const TEST_USER: &str = "testuser";

/// Test harness for integration tests.
///
/// Holds a security context whose directory knows [`TEST_USER`] and builds
/// lists for [`TEST_PATH`].
pub struct TestHarness {
    /// Shared collaborators
    pub context: SecurityContext,
}

impl TestHarness {
    /// Creates a harness over the built-in privileges and `rep:glob`.
    pub fn new() -> Self {
        let directory = StaticPrincipalDirectory::new().with_principal(Principal::user(TEST_USER));
        let context = SecurityContext::builtin().with_principals(Arc::new(directory));
        Self { context }
    }

    /// Creates a harness with a custom restriction catalog.
    pub fn with_restrictions(catalog: Arc<dyn RestrictionCatalog>) -> Self {
        let harness = Self::new();
        Self {
            context: harness.context.with_restrictions(catalog),
        }
    }

    /// Empty list at [`TEST_PATH`].
    pub fn acl(&self) -> AccessControlList {
        AccessControlList::new(Some(TEST_PATH), self.context.clone())
    }

    /// Empty repository-level list.
    pub fn repository_acl(&self) -> AccessControlList {
        AccessControlList::new(None, self.context.clone())
    }

    /// Resolves privilege names with the harness registry.
    pub fn bits(&self, names: &[&str]) -> PrivilegeBits {
        self.context.privileges().resolve(names).unwrap()
    }

    /// The registered test principal, as an external principal.
    pub fn test_principal(&self) -> Principal {
        Principal::external(TEST_USER)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Restriction values holding only `rep:glob`.
pub fn glob(pattern: &str) -> RestrictionValues {
    let mut values = RestrictionValues::new();
    values.insert(REP_GLOB.to_string(), Value::string(pattern));
    values
}

/// No restrictions.
pub fn unrestricted() -> RestrictionValues {
    RestrictionValues::new()
}
