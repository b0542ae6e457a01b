//! Permissions and session info

use crate::common;
use serde_json::json;
use sitevault_core::{Error, FieldChange, Identity};

#[test]
fn only_the_owner_may_mutate() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    let intruder = Identity::new("mallory");

    let change = FieldChange::new("hero.title", json!("defaced")).unwrap();
    let err = vault
        .apply_changes(&id, &intruder, 1, std::slice::from_ref(&change))
        .unwrap_err();
    match err {
        Error::Forbidden { identity, document } => {
            assert_eq!(identity, intruder);
            assert_eq!(document, id);
        }
        other => panic!("unexpected error {:?}", other),
    }

    let err = vault.checkpoint(&id, &intruder).unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
}

#[test]
fn reads_are_not_gated() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    // Anyone can read the document and its history.
    assert!(vault.get_document(&id).is_ok());
    assert!(vault.history(&id, None).is_ok());
}

#[test]
fn session_info_for_owner() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    let info = vault.session_info(&id, &common::owner()).unwrap();
    assert_eq!(info.current_version, 1);
    assert!(info.can_edit);
}

#[test]
fn session_info_for_stranger_reports_read_only() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    let info = vault.session_info(&id, &Identity::new("visitor")).unwrap();
    assert!(!info.can_edit);
    assert_eq!(info.current_version, 1);
}

#[test]
fn session_info_tracks_mutations() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    let change = FieldChange::new("hero.title", json!("new")).unwrap();
    vault
        .apply_changes(&id, &common::owner(), 1, std::slice::from_ref(&change))
        .unwrap();
    let info = vault.session_info(&id, &common::owner()).unwrap();
    assert_eq!(info.current_version, 2);
}
