//! Integration tests for contexts built from configuration files.

use std::io::Write;

use arbor_acl::{AccessControlList, AclConfig, Error, Principal, SecurityContext};

const CONFIG: &str = r#"
everyone = "anyone"

[[privileges]]
name = "app:read"

[[privileges]]
name = "app:publish"

[[privileges]]
name = "app:internal"
abstract = true

[[privileges]]
name = "app:all"
aggregates = ["app:read", "app:publish"]

[[restrictions]]
name = "app:channel"
type = "string"

[[principals]]
name = "partner"
"#;

fn load_context() -> SecurityContext {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    let config = AclConfig::load(file.path()).expect("config should load");
    SecurityContext::from_config(&config).expect("config should be consistent")
}

#[test]
fn test_list_over_configured_context() {
    let context = load_context();
    let mut acl = AccessControlList::new(Some("/site"), context);
    let partner = Principal::external("partner");

    acl.add_access_control_entry(&partner, &["app:all"]).unwrap();
    acl.add_entry(&partner, &["app:publish"], false, &Default::default())
        .unwrap();

    assert_eq!(acl.len(), 2);
    assert_eq!(acl.privilege_names(&acl.entries()[0]), vec!["app:read"]);
    assert_eq!(acl.restriction_names(), vec!["app:channel".to_string()]);
}

#[test]
fn test_configured_everyone_group() {
    let context = load_context();
    assert_eq!(context.principals().everyone(), Principal::group("anyone"));

    let mut acl = AccessControlList::new(Some("/site"), context);
    acl.add_access_control_entry(&Principal::external("anyone"), &["app:read"])
        .unwrap();
    assert_eq!(acl.entries()[0].principal(), "anyone");
}

#[test]
fn test_abstract_privilege_rejected() {
    let mut acl = AccessControlList::new(Some("/site"), load_context());

    let err = acl
        .add_access_control_entry(&Principal::user("alice"), &["app:internal"])
        .unwrap_err();

    assert!(matches!(err, Error::InvalidPrivilege { ref name } if name == "app:internal"));
}

#[test]
fn test_builtin_privileges_absent_from_custom_table() {
    let mut acl = AccessControlList::new(Some("/site"), load_context());

    assert!(matches!(
        acl.add_access_control_entry(&Principal::user("alice"), &["jcr:read"]),
        Err(Error::InvalidPrivilege { .. })
    ));
}

#[test]
fn test_inconsistent_config_rejected() {
    let config = AclConfig::from_toml_str(
        r#"
[[privileges]]
name = "app:loop"
aggregates = ["app:loop"]
"#,
    )
    .unwrap();

    let err = SecurityContext::from_config(&config).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(!err.is_access_control_error());
}
