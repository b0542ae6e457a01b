//! Version history listings

use crate::common;
use serde_json::json;
use sitevault_core::{Error, FieldChange};
use sitevault_engine::VaultConfig;

fn change(path: &str, value: serde_json::Value) -> FieldChange {
    FieldChange::new(path, value).unwrap()
}

fn vault_with_history(mutations: u64) -> (sitevault_engine::Vault, sitevault_core::DocumentId) {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    for expected in 1..=mutations {
        vault
            .apply_changes(
                &id,
                &common::owner(),
                expected,
                &[change("hero.title", json!(expected))],
            )
            .unwrap();
    }
    (vault, id)
}

#[test]
fn history_is_newest_first() {
    let (vault, id) = vault_with_history(5);
    let history = vault.history(&id, None).unwrap();
    assert_eq!(history.len(), 5);
    assert!(history.windows(2).all(|w| w[0].id > w[1].id));
    assert!(history.windows(2).all(|w| w[0].version > w[1].version));
}

#[test]
fn limit_truncates_the_listing() {
    let (vault, id) = vault_with_history(10);
    let history = vault.history(&id, Some(4)).unwrap();
    assert_eq!(history.len(), 4);
    // The four newest, not the four oldest.
    assert_eq!(history[0].version, 10);
}

#[test]
fn default_limit_comes_from_config() {
    let config = VaultConfig {
        history_limit: 3,
        ..VaultConfig::default()
    };
    let vault = common::memory_vault_with(config);
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    for expected in 1..=8 {
        vault
            .apply_changes(
                &id,
                &common::owner(),
                expected,
                &[change("hero.title", json!(expected))],
            )
            .unwrap();
    }
    assert_eq!(vault.history(&id, None).unwrap().len(), 3);
}

#[test]
fn fresh_document_has_empty_history() {
    let vault = common::memory_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    assert!(vault.history(&id, None).unwrap().is_empty());
}

#[test]
fn history_of_missing_document_is_not_found() {
    let vault = common::memory_vault();
    let err = vault.history(&common::doc_id("nope"), None).unwrap_err();
    assert!(matches!(err, Error::DocumentNotFound(_)));
}

#[test]
fn entries_carry_descriptions() {
    let (vault, id) = vault_with_history(1);
    let history = vault.history(&id, None).unwrap();
    assert_eq!(history[0].description, "Auto-save at version 1");
}
