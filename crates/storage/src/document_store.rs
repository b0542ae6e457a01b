//! Typed document persistence
//!
//! Serializes [`Document`]s as pretty JSON over the blob trait. Documents
//! that predate versioning are migrated on read: a missing `version` field
//! is initialized to 1 and the upgraded blob is persisted immediately.

use serde_json::{json, Value};
use sitevault_core::{BlobStore, Document, DocumentId, Error, Result, Timestamp};
use std::sync::Arc;
use tracing::info;

/// Typed load/save layer over the blob trait
#[derive(Clone)]
pub struct DocumentStore {
    blobs: Arc<dyn BlobStore>,
}

impl DocumentStore {
    /// Wrap a blob store
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        DocumentStore { blobs }
    }

    /// Check whether a document blob exists
    pub fn exists(&self, id: &DocumentId) -> Result<bool> {
        Ok(self.blobs.read_document(id)?.is_some())
    }

    /// Load a document, healing pre-versioning blobs
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` when no blob exists
    /// - `CorruptData` when the blob cannot be parsed
    pub fn load(&self, id: &DocumentId) -> Result<Document> {
        let bytes = self
            .blobs
            .read_document(id)?
            .ok_or_else(|| Error::DocumentNotFound(id.clone()))?;

        let mut raw: Value = serde_json::from_slice(&bytes)
            .map_err(|e| Error::corrupt(blob_path(id), e))?;

        let mut migrated = false;
        if let Some(obj) = raw.as_object_mut() {
            if !obj.contains_key("version") {
                obj.insert("version".to_string(), json!(1));
                migrated = true;
            }
            if !obj.contains_key("lastModified") {
                obj.insert(
                    "lastModified".to_string(),
                    json!(Timestamp::now().as_millis()),
                );
                migrated = true;
            }
        }

        let document: Document =
            serde_json::from_value(raw).map_err(|e| Error::corrupt(blob_path(id), e))?;

        if migrated {
            self.save(id, &document)?;
            info!(document = %id, version = document.version, "migrated unversioned document");
        }
        Ok(document)
    }

    /// Persist a document atomically
    pub fn save(&self, id: &DocumentId, document: &Document) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| Error::corrupt(blob_path(id), e))?;
        self.blobs.write_document(id, &bytes)
    }
}

fn blob_path(id: &DocumentId) -> String {
    format!("documents/{}/document.json", id)
}
