//! Batch application semantics

use crate::common;
use serde_json::json;
use sitevault_core::{ApplyOutcome, Error, FieldChange};

fn change(path: &str, value: serde_json::Value) -> FieldChange {
    FieldChange::new(path, value).unwrap()
}

#[test]
fn changes_apply_in_order_last_write_wins() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    vault
        .apply_changes(
            &id,
            &common::owner(),
            1,
            &[
                change("hero.title", json!("first")),
                change("hero.title", json!("second")),
            ],
        )
        .unwrap();
    let doc = vault.get_document(&id).unwrap();
    assert_eq!(doc.content["hero"]["title"], json!("second"));
}

#[test]
fn one_bad_change_aborts_the_whole_batch() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    let err = vault
        .apply_changes(
            &id,
            &common::owner(),
            1,
            &[
                change("hero.title", json!("landed?")),
                // hero.title is a string; descending into it must fail.
                change("hero.title.deep", json!("nope")),
            ],
        )
        .unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
    let doc = vault.get_document(&id).unwrap();
    assert_eq!(doc.version, 1);
    assert_eq!(doc.content["hero"]["title"], json!("Welcome"));
}

#[test]
fn array_index_paths_mutate_sections() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    vault
        .apply_changes(
            &id,
            &common::owner(),
            1,
            &[change("sections.0.body", json!("Rewritten"))],
        )
        .unwrap();
    let doc = vault.get_document(&id).unwrap();
    assert_eq!(doc.content["sections"][0]["body"], json!("Rewritten"));
    assert_eq!(doc.content["sections"][1]["kind"], json!("image"));
}

#[test]
fn out_of_range_index_pads_with_null() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    vault
        .apply_changes(
            &id,
            &common::owner(),
            1,
            &[change("sections.4", json!({"kind": "footer"}))],
        )
        .unwrap();
    let doc = vault.get_document(&id).unwrap();
    let sections = doc.content["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 5);
    assert_eq!(sections[2], json!(null));
    assert_eq!(sections[3], json!(null));
    assert_eq!(sections[4]["kind"], json!("footer"));
}

#[test]
fn runaway_index_cannot_balloon_the_document() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    // A single syntactically valid change must not be able to materialize
    // millions of null slots in the stored document.
    let err = vault
        .apply_changes(
            &id,
            &common::owner(),
            1,
            &[change("sections.9999999", json!({"kind": "footer"}))],
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPath(_)));

    let doc = vault.get_document(&id).unwrap();
    assert_eq!(doc.version, 1);
    assert_eq!(doc.content["sections"].as_array().unwrap().len(), 2);
}

#[test]
fn missing_objects_are_created_along_the_path() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    vault
        .apply_changes(
            &id,
            &common::owner(),
            1,
            &[change("footer.links.contact", json!("/contact"))],
        )
        .unwrap();
    let doc = vault.get_document(&id).unwrap();
    assert_eq!(doc.content["footer"]["links"]["contact"], json!("/contact"));
}

#[test]
fn empty_batch_is_valid_and_advances_version() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    let outcome = vault.apply_changes(&id, &common::owner(), 1, &[]).unwrap();
    assert!(matches!(outcome, ApplyOutcome::Applied { version: 2, .. }));
    let doc = vault.get_document(&id).unwrap();
    assert_eq!(doc.content, common::page_content());
}

#[test]
fn malformed_paths_are_rejected() {
    for bad in ["", ".hero", "hero.", "hero..title"] {
        let err = FieldChange::new(bad, json!("x")).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)), "path {:?}", bad);
    }
}
