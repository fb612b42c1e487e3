//! Integration tests for storing entries and reloading them into a list.

use arbor_acl::privilege::names::*;
use arbor_acl::{AccessControlEntry, AccessControlList, Principal};

use crate::common::{TEST_PATH, TestHarness, glob, unrestricted};

#[test]
fn test_entries_survive_json_roundtrip() {
    let harness = TestHarness::new();
    let mut acl = harness.acl();
    acl.add_access_control_entry(&harness.test_principal(), &[JCR_READ])
        .unwrap();
    acl.add_entry(&Principal::user("alice"), &[JCR_WRITE], false, &glob("*/draft"))
        .unwrap();

    let json = serde_json::to_string(acl.entries()).expect("entries should serialize");
    let stored: Vec<AccessControlEntry> =
        serde_json::from_str(&json).expect("entries should deserialize");
    let reloaded = AccessControlList::with_entries(Some(TEST_PATH), harness.context.clone(), stored);

    assert_eq!(reloaded.entries(), acl.entries());
    assert_eq!(reloaded.path(), Some(TEST_PATH));
}

#[test]
fn test_reloaded_list_keeps_merging() {
    let harness = TestHarness::new();
    let mut acl = harness.acl();
    acl.add_access_control_entry(&harness.test_principal(), &[REP_WRITE])
        .unwrap();

    let mut reloaded = AccessControlList::with_entries(
        Some(TEST_PATH),
        harness.context.clone(),
        acl.entries().to_vec(),
    );
    reloaded
        .add_entry(&harness.test_principal(), &[JCR_NODE_TYPE_MANAGEMENT], false, &unrestricted())
        .unwrap();

    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.privilege_names(&reloaded.entries()[0]), vec![JCR_WRITE]);
}

#[test]
fn test_seeded_duplicates_collapse() {
    let harness = TestHarness::new();
    let read = harness.bits(&[JCR_READ]);
    let seed = vec![
        AccessControlEntry::new("testuser", read, true, Default::default()),
        AccessControlEntry::new("testuser", read, true, Default::default()),
        AccessControlEntry::new("testuser", read, false, Default::default()),
    ];

    let acl = AccessControlList::with_entries(Some(TEST_PATH), harness.context.clone(), seed);

    assert_eq!(acl.len(), 1);
    assert!(!acl.entries()[0].is_allow());
}
