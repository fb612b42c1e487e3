//! Integration tests for entry order, removal, and reordering.

use arbor_acl::privilege::names::*;
use arbor_acl::{AccessControlEntry, Error, Principal, RestrictionSet};

use crate::common::{TestHarness, unrestricted};

fn principals(entries: &[AccessControlEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.principal()).collect()
}

fn three_entries(harness: &TestHarness) -> arbor_acl::AccessControlList {
    let mut acl = harness.acl();
    for name in ["first", "second", "third"] {
        acl.add_access_control_entry(&Principal::user(name), &[JCR_READ])
            .unwrap();
    }
    acl
}

#[test]
fn test_new_entries_are_appended() {
    let harness = TestHarness::new();
    let acl = three_entries(&harness);
    assert_eq!(principals(acl.entries()), vec!["first", "second", "third"]);
}

#[test]
fn test_merge_keeps_position() {
    let harness = TestHarness::new();
    let mut acl = three_entries(&harness);

    acl.add_access_control_entry(&Principal::user("first"), &[JCR_WRITE])
        .unwrap();

    assert_eq!(principals(acl.entries()), vec!["first", "second", "third"]);
    assert_eq!(
        acl.entries()[0].privileges(),
        harness.bits(&[JCR_READ, JCR_WRITE])
    );
}

#[test]
fn test_complementary_removal_shifts_and_appends() {
    let harness = TestHarness::new();
    let mut acl = three_entries(&harness);

    acl.add_entry(&Principal::user("first"), &[JCR_READ], false, &unrestricted())
        .unwrap();

    assert_eq!(principals(acl.entries()), vec!["second", "third", "first"]);
    assert!(!acl.entries()[2].is_allow());
}

#[test]
fn test_remove_entry() {
    let harness = TestHarness::new();
    let mut acl = three_entries(&harness);

    let second = acl.entries()[1].clone();
    acl.remove_entry(&second).unwrap();

    assert_eq!(principals(acl.entries()), vec!["first", "third"]);
}

#[test]
fn test_remove_by_equal_content() {
    let harness = TestHarness::new();
    let mut acl = three_entries(&harness);

    let lookalike = AccessControlEntry::new(
        "third",
        harness.bits(&[JCR_READ]),
        true,
        RestrictionSet::new(),
    );
    acl.remove_entry(&lookalike).unwrap();

    assert_eq!(principals(acl.entries()), vec!["first", "second"]);
}

#[test]
fn test_remove_stale_entry_fails() {
    let harness = TestHarness::new();
    let mut acl = three_entries(&harness);

    let stale = acl.entries()[0].clone();
    acl.add_access_control_entry(&Principal::user("first"), &[JCR_WRITE])
        .unwrap();

    let err = acl.remove_entry(&stale).unwrap_err();
    assert!(matches!(err, Error::EntryNotFound { .. }));
    assert_eq!(acl.len(), 3);
}

#[test]
fn test_order_before_earlier_entry() {
    let harness = TestHarness::new();
    let mut acl = three_entries(&harness);

    let third = acl.entries()[2].clone();
    let first = acl.entries()[0].clone();
    acl.order_before(&third, Some(&first)).unwrap();

    assert_eq!(principals(acl.entries()), vec!["third", "first", "second"]);
}

#[test]
fn test_order_before_later_entry() {
    let harness = TestHarness::new();
    let mut acl = three_entries(&harness);

    let first = acl.entries()[0].clone();
    let third = acl.entries()[2].clone();
    acl.order_before(&first, Some(&third)).unwrap();

    assert_eq!(principals(acl.entries()), vec!["second", "first", "third"]);
}

#[test]
fn test_order_to_end() {
    let harness = TestHarness::new();
    let mut acl = three_entries(&harness);

    let first = acl.entries()[0].clone();
    acl.order_before(&first, None).unwrap();

    assert_eq!(principals(acl.entries()), vec!["second", "third", "first"]);
}

#[test]
fn test_order_with_unknown_entries_fails() {
    let harness = TestHarness::new();
    let mut acl = three_entries(&harness);
    let unknown = AccessControlEntry::new(
        "nobody",
        harness.bits(&[JCR_READ]),
        true,
        RestrictionSet::new(),
    );
    let first = acl.entries()[0].clone();

    assert!(matches!(
        acl.order_before(&unknown, Some(&first)),
        Err(Error::EntryNotFound { .. })
    ));
    assert!(matches!(
        acl.order_before(&first, Some(&unknown)),
        Err(Error::EntryNotFound { .. })
    ));
    assert_eq!(principals(acl.entries()), vec!["first", "second", "third"]);
}
