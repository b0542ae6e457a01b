//! Shared helpers for the vault test suites

#![allow(dead_code)]

use serde_json::{json, Map, Value};
use sitevault_core::{BlobStore, CheckpointId, DocumentId, Error, Identity, Result};
use sitevault_engine::{MemoryBlobStore, Vault, VaultConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

pub fn doc_id(name: &str) -> DocumentId {
    DocumentId::new(name).unwrap()
}

pub fn owner() -> Identity {
    Identity::new("alice")
}

/// A typical landing-page content tree
pub fn page_content() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(
        "hero".to_string(),
        json!({"title": "Welcome", "subtitle": "Build sites visually"}),
    );
    map.insert(
        "sections".to_string(),
        json!([
            {"kind": "text", "body": "First section"},
            {"kind": "image", "src": "/img/banner.png"}
        ]),
    );
    map
}

/// In-memory vault with default config
pub fn memory_vault() -> Vault {
    Vault::with_store(Arc::new(MemoryBlobStore::new()), VaultConfig::default())
}

/// In-memory vault with a custom config
pub fn memory_vault_with(config: VaultConfig) -> Vault {
    Vault::with_store(Arc::new(MemoryBlobStore::new()), config)
}

/// On-disk vault rooted in a fresh temp dir; keep the guard alive
pub fn fs_vault() -> (Vault, TempDir) {
    let dir = TempDir::new().unwrap();
    let vault = Vault::open(dir.path()).unwrap();
    (vault, dir)
}

/// Blob store whose checkpoint or document writes can be made to fail,
/// for exercising the best-effort paths
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryBlobStore,
    pub fail_checkpoint_writes: AtomicBool,
    pub fail_document_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        FlakyStore::default()
    }

    fn injected_failure(&self, what: &str) -> Error {
        Error::WriteFailed {
            path: what.into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "injected failure"),
        }
    }
}

impl BlobStore for FlakyStore {
    fn read_document(&self, id: &DocumentId) -> Result<Option<Vec<u8>>> {
        self.inner.read_document(id)
    }

    fn write_document(&self, id: &DocumentId, bytes: &[u8]) -> Result<()> {
        if self.fail_document_writes.load(Ordering::SeqCst) {
            return Err(self.injected_failure("document"));
        }
        self.inner.write_document(id, bytes)
    }

    fn read_checkpoint(
        &self,
        id: &DocumentId,
        checkpoint: CheckpointId,
    ) -> Result<Option<Vec<u8>>> {
        self.inner.read_checkpoint(id, checkpoint)
    }

    fn write_checkpoint(
        &self,
        id: &DocumentId,
        checkpoint: CheckpointId,
        bytes: &[u8],
    ) -> Result<()> {
        if self.fail_checkpoint_writes.load(Ordering::SeqCst) {
            return Err(self.injected_failure("checkpoint"));
        }
        self.inner.write_checkpoint(id, checkpoint, bytes)
    }

    fn list_checkpoints(&self, id: &DocumentId) -> Result<Vec<CheckpointId>> {
        self.inner.list_checkpoints(id)
    }

    fn remove_checkpoint(&self, id: &DocumentId, checkpoint: CheckpointId) -> Result<()> {
        self.inner.remove_checkpoint(id, checkpoint)
    }
}
