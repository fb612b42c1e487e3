//! Tests for error construction and classification.

use arbor_acl::{Error, PropertyType};

#[test]
fn test_config_error() {
    let err = Error::config("duplicate privilege 'jcr:read'");
    assert_eq!(
        err.to_string(),
        "Configuration error: duplicate privilege 'jcr:read'"
    );
    assert!(!err.is_access_control_error());
}

#[test]
fn test_invalid_principal_error() {
    let err = Error::invalid_principal("unknown");
    assert_eq!(err.to_string(), "Invalid principal: 'unknown'");
    assert!(err.is_access_control_error());
}

#[test]
fn test_invalid_privilege_error() {
    let err = Error::invalid_privilege("rep:unknown");
    assert_eq!(err.to_string(), "Invalid privilege: 'rep:unknown'");
    assert!(err.is_access_control_error());
}

#[test]
fn test_restriction_type_error() {
    let err = Error::InvalidRestrictionType {
        name: "rep:glob".to_string(),
        expected: PropertyType::String,
        actual: PropertyType::Boolean,
    };
    assert_eq!(
        err.to_string(),
        "Invalid type for restriction 'rep:glob': expected String, got Boolean"
    );
    assert!(err.is_access_control_error());
}

#[test]
fn test_core_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: Error = arbor_core::Error::io_with_path(io, "/etc/arbor/acl.toml").into();
    assert!(matches!(err, Error::Core(_)));
    assert!(err.to_string().contains("/etc/arbor/acl.toml"));
    assert!(!err.is_access_control_error());
}

#[test]
fn test_empty_privileges_and_not_found() {
    assert_eq!(
        Error::EmptyPrivileges.to_string(),
        "Privileges must not be empty"
    );
    let err = Error::EntryNotFound {
        entry: "allow alice {0}".to_string(),
    };
    assert_eq!(err.to_string(), "Entry not found: allow alice {0}");
}
