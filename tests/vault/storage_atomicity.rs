//! On-disk behavior: atomic writes, reopening, and migration

use crate::common;
use serde_json::json;
use sitevault_core::FieldChange;
use sitevault_engine::Vault;
use tempfile::TempDir;

fn change(path: &str, value: serde_json::Value) -> FieldChange {
    FieldChange::new(path, value).unwrap()
}

#[test]
fn documents_survive_reopening() {
    let dir = TempDir::new().unwrap();
    let id = common::doc_id("site");
    {
        let vault = Vault::open(dir.path()).unwrap();
        vault
            .create_document(&id, &common::owner(), common::page_content())
            .unwrap();
        vault
            .apply_changes(&id, &common::owner(), 1, &[change("hero.title", json!("v2"))])
            .unwrap();
    }
    let vault = Vault::open(dir.path()).unwrap();
    let doc = vault.get_document(&id).unwrap();
    assert_eq!(doc.version, 2);
    assert_eq!(doc.content["hero"]["title"], json!("v2"));
    assert_eq!(vault.history(&id, None).unwrap().len(), 1);
}

#[test]
fn no_temp_files_linger_after_writes() {
    let (vault, dir) = common::fs_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    vault
        .apply_changes(&id, &common::owner(), 1, &[change("hero.title", json!("x"))])
        .unwrap();

    let mut stack = vec![dir.path().to_path_buf()];
    while let Some(path) = stack.pop() {
        for entry in std::fs::read_dir(&path).unwrap() {
            let entry = entry.unwrap();
            if entry.file_type().unwrap().is_dir() {
                stack.push(entry.path());
            } else {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                assert!(!name.ends_with(".tmp"), "leftover temp file {}", name);
            }
        }
    }
}

#[test]
fn crash_leftover_temp_files_are_swept_on_open() {
    let dir = TempDir::new().unwrap();
    let id = common::doc_id("site");
    {
        let vault = Vault::open(dir.path()).unwrap();
        vault
            .create_document(&id, &common::owner(), common::page_content())
            .unwrap();
    }
    // Simulate a crash mid-write.
    let doc_dir = dir.path().join("documents").join("site");
    std::fs::write(doc_dir.join(".document.json.tmp"), b"garbage").unwrap();

    let vault = Vault::open(dir.path()).unwrap();
    assert!(!doc_dir.join(".document.json.tmp").exists());
    // The real blob was untouched.
    assert_eq!(vault.get_document(&id).unwrap().version, 1);
}

#[test]
fn legacy_unversioned_document_is_migrated_on_read() {
    let dir = TempDir::new().unwrap();
    let doc_dir = dir.path().join("documents").join("legacy");
    std::fs::create_dir_all(&doc_dir).unwrap();
    // A pre-versioning blob: content and owner only.
    std::fs::write(
        doc_dir.join("document.json"),
        serde_json::to_vec_pretty(&json!({
            "content": {"hero": {"title": "Old site"}},
            "owner": "alice"
        }))
        .unwrap(),
    )
    .unwrap();

    let vault = Vault::open(dir.path()).unwrap();
    let id = common::doc_id("legacy");
    let doc = vault.get_document(&id).unwrap();
    assert_eq!(doc.version, 1);

    // Migration was persisted, and the migrated form is editable.
    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(doc_dir.join("document.json")).unwrap()).unwrap();
    assert_eq!(raw["version"], json!(1));
    assert!(raw.get("lastModified").is_some());

    let outcome = vault
        .apply_changes(&id, &common::owner(), 1, &[change("hero.title", json!("New"))])
        .unwrap();
    assert!(outcome.is_applied());
}

#[test]
fn documents_are_pretty_json_on_disk() {
    let (vault, dir) = common::fs_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    let raw = std::fs::read_to_string(
        dir.path().join("documents").join("site").join("document.json"),
    )
    .unwrap();
    assert!(raw.contains('\n'));
    assert!(raw.contains("\"version\": 1"));
}

#[test]
fn checkpoints_live_under_their_document() {
    let (vault, dir) = common::fs_vault();
    let id = common::doc_id("site");
    vault
        .create_document(&id, &common::owner(), common::page_content())
        .unwrap();
    let ckpt = vault.checkpoint(&id, &common::owner()).unwrap();
    let path = dir
        .path()
        .join("documents")
        .join("site")
        .join("checkpoints")
        .join(format!("ckpt-{}.json", ckpt.timestamp));
    assert!(path.exists());
}

#[test]
fn config_file_is_written_on_first_open() {
    let dir = TempDir::new().unwrap();
    let _vault = Vault::open(dir.path()).unwrap();
    let text = std::fs::read_to_string(dir.path().join("sitevault.toml")).unwrap();
    assert!(text.contains("max_checkpoints = 50"));
    assert!(text.contains("history_limit = 20"));
}
