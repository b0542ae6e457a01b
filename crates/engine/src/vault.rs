//! The vault: document lifecycle, optimistic versioning, checkpoints

use crate::checkpoints::CheckpointManager;
use crate::config::{VaultConfig, CONFIG_FILE_NAME};
use crate::permissions;
use serde_json::{Map, Value};
use sitevault_core::{
    apply_changes, ApplyOutcome, BlobStore, Checkpoint, CheckpointId, CheckpointKind, Document,
    DocumentId, Error, FieldChange, HistoryEntry, Identity, RestoreOutcome, Result, SessionInfo,
    VersionConflict,
};
use sitevault_storage::{CheckpointStore, DocumentStore, FsBlobStore, RetentionPolicy};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// An embedded versioned document store
///
/// All operations are synchronous and act on one document at a time. There
/// is no locking between load and save: two concurrent load-mutate-save
/// cycles that both pass the version check will both succeed, and the
/// second save overwrites the first. The strict version equality check in
/// [`Vault::apply_changes`] catches every conflict where the first write
/// lands before the second writer loads, which is the guarantee clients
/// rely on.
pub struct Vault {
    documents: DocumentStore,
    checkpoints: CheckpointManager,
    retention: RetentionPolicy,
    config: VaultConfig,
}

impl Vault {
    /// Open a vault on a data directory, loading `sitevault.toml` (and
    /// writing the commented default if the file is missing)
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let config = VaultConfig::write_default_if_missing(&data_dir.join(CONFIG_FILE_NAME))?;
        Self::open_with_config(data_dir, config)
    }

    /// Open a vault on a data directory with an explicit config, ignoring
    /// any `sitevault.toml` present
    pub fn open_with_config(data_dir: &Path, config: VaultConfig) -> Result<Self> {
        let store = FsBlobStore::open(data_dir)?;
        Ok(Self::with_store(std::sync::Arc::new(store), config))
    }

    /// Build a vault over any blob store
    pub fn with_store(store: std::sync::Arc<dyn BlobStore>, config: VaultConfig) -> Self {
        Vault {
            documents: DocumentStore::new(store.clone()),
            checkpoints: CheckpointManager::new(CheckpointStore::new(store)),
            retention: config.retention(),
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Create a document at version 1 owned by `owner`
    pub fn create_document(
        &self,
        id: &DocumentId,
        owner: &Identity,
        content: Map<String, Value>,
    ) -> Result<Document> {
        if self.documents.exists(id)? {
            return Err(Error::AlreadyExists(id.clone()));
        }
        let document = Document::new(owner.clone(), content);
        self.documents.save(id, &document)?;
        info!(document = %id, owner = %owner, "document created");
        Ok(document)
    }

    /// Load the current state of a document. Unversioned legacy blobs are
    /// migrated on read.
    pub fn get_document(&self, id: &DocumentId) -> Result<Document> {
        self.documents.load(id)
    }

    /// Apply a batch of field changes under optimistic concurrency control
    ///
    /// A version mismatch is reported as [`ApplyOutcome::Conflict`], not an
    /// error. The batch is all-or-nothing: one invalid change aborts the
    /// whole call with the stored document untouched.
    pub fn apply_changes(
        &self,
        id: &DocumentId,
        identity: &Identity,
        expected_version: u64,
        changes: &[FieldChange],
    ) -> Result<ApplyOutcome> {
        let started = Instant::now();
        let mut document = self.documents.load(id)?;
        permissions::verify_edit(identity, id, &document)?;

        if expected_version != document.version {
            info!(document = %id, current = document.version, expected = expected_version,
                  "stale write rejected");
            return Ok(ApplyOutcome::Conflict(VersionConflict {
                current_version: document.version,
                expected_version,
                server_content: document.content,
            }));
        }

        // Validates the whole batch before any change lands.
        let mut content = document.content.clone();
        apply_changes(&mut content, changes)?;

        if let Err(error) = self
            .checkpoints
            .create(id, &document, CheckpointKind::Auto)
        {
            warn!(document = %id, %error, "auto checkpoint failed, continuing");
        }

        document.content = content;
        document.touch();
        self.documents.save(id, &document)?;

        if let Err(error) = self.checkpoints.prune(id, self.retention) {
            warn!(document = %id, %error, "retention prune failed, continuing");
        }

        self.warn_if_slow("apply_changes", id, started);
        info!(document = %id, version = document.version, changes = changes.len(),
              "changes applied");
        Ok(ApplyOutcome::Applied {
            version: document.version,
            timestamp: document.last_modified,
        })
    }

    /// Restore a document to a checkpoint's content
    ///
    /// Restore moves forward: the new state gets `version = live + 1` and
    /// records where it came from. A before-restore checkpoint of the live
    /// state is attempted first so the restore itself is recoverable.
    pub fn restore(
        &self,
        id: &DocumentId,
        identity: &Identity,
        checkpoint: CheckpointId,
    ) -> Result<RestoreOutcome> {
        let started = Instant::now();
        let mut document = self.documents.load(id)?;
        permissions::verify_edit(identity, id, &document)?;
        let snapshot = self.checkpoints.load(id, checkpoint)?;

        if let Err(error) = self
            .checkpoints
            .create(id, &document, CheckpointKind::BeforeRestore)
        {
            warn!(document = %id, %error, "before-restore checkpoint failed, continuing");
        }

        document.content = snapshot.data.content.clone();
        document.touch();
        document.restored_from = Some(snapshot.version);
        document.restored_at = Some(document.last_modified);
        self.documents.save(id, &document)?;

        self.warn_if_slow("restore", id, started);
        info!(document = %id, checkpoint = %checkpoint,
              restored_from = snapshot.version, version = document.version,
              "document restored");
        Ok(RestoreOutcome {
            restored_from_version: snapshot.version,
            new_version: document.version,
            checkpoint,
        })
    }

    /// Take a manual checkpoint of the current state
    ///
    /// Unlike auto checkpoints, write failures surface to the caller and
    /// no retention prune runs.
    pub fn checkpoint(&self, id: &DocumentId, identity: &Identity) -> Result<Checkpoint> {
        let document = self.documents.load(id)?;
        permissions::verify_edit(identity, id, &document)?;
        self.checkpoints.create(id, &document, CheckpointKind::Manual)
    }

    /// List checkpoint history, newest first
    ///
    /// `limit = None` uses the configured default.
    pub fn history(&self, id: &DocumentId, limit: Option<usize>) -> Result<Vec<HistoryEntry>> {
        if !self.documents.exists(id)? {
            return Err(Error::DocumentNotFound(id.clone()));
        }
        self.checkpoints
            .history(id, limit.unwrap_or(self.config.history_limit))
    }

    /// Describe a document from `identity`'s point of view
    ///
    /// Never fails for a non-owner; `can_edit` reports the answer instead.
    pub fn session_info(&self, id: &DocumentId, identity: &Identity) -> Result<SessionInfo> {
        let document = self.documents.load(id)?;
        Ok(SessionInfo {
            current_version: document.version,
            last_modified: document.last_modified,
            can_edit: permissions::can_edit(identity, &document),
        })
    }

    fn warn_if_slow(&self, operation: &str, id: &DocumentId, started: Instant) {
        if let Some(threshold) = self.config.slow_op_ms {
            let elapsed = started.elapsed().as_millis() as u64;
            if elapsed > threshold {
                warn!(document = %id, operation, elapsed_ms = elapsed,
                      threshold_ms = threshold, "slow operation");
            }
        }
    }
}
