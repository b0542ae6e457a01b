//! Filesystem blob store
//!
//! On-disk layout under the data directory:
//!
//! ```text
//! <data_dir>/
//!   documents/
//!     <doc_id>/
//!       document.json                 # current document
//!       checkpoints/
//!         ckpt-<millis>.json          # one blob per checkpoint
//!         .ckpt-<millis>.json.tmp     # in-flight write (crash leftover)
//! ```
//!
//! Every blob, document and checkpoint alike, is written with the
//! write-fsync-rename protocol:
//!
//! 1. Write the full blob to a dot-prefixed `.…tmp` sibling
//! 2. fsync the temp file
//! 3. Atomic rename over the final name
//! 4. fsync the containing directory
//!
//! On any failure the temp file is removed best-effort and the previous
//! blob version remains intact. Crash leftovers are swept on open.

use sitevault_core::{BlobStore, CheckpointId, DocumentId, Error, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DOCUMENTS_DIR: &str = "documents";
const DOCUMENT_FILE: &str = "document.json";
const CHECKPOINTS_DIR: &str = "checkpoints";

/// Filesystem-backed blob store
#[derive(Debug)]
pub struct FsBlobStore {
    documents_dir: PathBuf,
}

impl FsBlobStore {
    /// Open (creating if needed) a blob store under a data directory
    ///
    /// Sweeps temp files left behind by crashed writes.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let documents_dir = data_dir.as_ref().join(DOCUMENTS_DIR);
        fs::create_dir_all(&documents_dir)?;

        let store = FsBlobStore { documents_dir };
        match store.sweep_temp_files() {
            Ok(0) => {}
            Ok(n) => debug!(removed = n, "cleaned up leftover temp files"),
            Err(e) => warn!(error = %e, "temp file cleanup failed"),
        }
        Ok(store)
    }

    fn document_dir(&self, id: &DocumentId) -> PathBuf {
        self.documents_dir.join(id.as_str())
    }

    fn document_path(&self, id: &DocumentId) -> PathBuf {
        self.document_dir(id).join(DOCUMENT_FILE)
    }

    fn checkpoints_dir(&self, id: &DocumentId) -> PathBuf {
        self.document_dir(id).join(CHECKPOINTS_DIR)
    }

    fn checkpoint_path(&self, id: &DocumentId, checkpoint: CheckpointId) -> PathBuf {
        self.checkpoints_dir(id)
            .join(format!("ckpt-{}.json", checkpoint))
    }

    /// Remove `.…tmp` leftovers across all document directories
    ///
    /// Returns the number of files removed.
    pub fn sweep_temp_files(&self) -> io::Result<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.documents_dir)? {
            let doc_dir = entry?.path();
            if !doc_dir.is_dir() {
                continue;
            }
            removed += cleanup_temp_files(&doc_dir)?;
            let ckpt_dir = doc_dir.join(CHECKPOINTS_DIR);
            if ckpt_dir.is_dir() {
                removed += cleanup_temp_files(&ckpt_dir)?;
            }
        }
        Ok(removed)
    }
}

/// Remove in-flight write leftovers (`.….tmp`) from one directory
pub fn cleanup_temp_files(dir: &Path) -> io::Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') && name.ends_with(".tmp") {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Write a blob with the write-fsync-rename protocol
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| Error::WriteFailed {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "blob path has no parent"),
        })?;
    fs::create_dir_all(dir)?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::WriteFailed {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "blob path has no file name"),
        })?;
    let temp_path = dir.join(format!(".{}.tmp", file_name));

    let result = (|| -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, path)?;

        let dir_handle = File::open(dir)?;
        dir_handle.sync_all()?;
        Ok(())
    })();

    if let Err(source) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::WriteFailed {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl BlobStore for FsBlobStore {
    fn read_document(&self, id: &DocumentId) -> Result<Option<Vec<u8>>> {
        read_optional(&self.document_path(id))
    }

    fn write_document(&self, id: &DocumentId, bytes: &[u8]) -> Result<()> {
        write_atomic(&self.document_path(id), bytes)
    }

    fn read_checkpoint(
        &self,
        id: &DocumentId,
        checkpoint: CheckpointId,
    ) -> Result<Option<Vec<u8>>> {
        read_optional(&self.checkpoint_path(id, checkpoint))
    }

    fn write_checkpoint(
        &self,
        id: &DocumentId,
        checkpoint: CheckpointId,
        bytes: &[u8],
    ) -> Result<()> {
        write_atomic(&self.checkpoint_path(id, checkpoint), bytes)
    }

    fn list_checkpoints(&self, id: &DocumentId) -> Result<Vec<CheckpointId>> {
        let dir = self.checkpoints_dir(id);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let name = entry?.file_name();
            let name = name.to_string_lossy();
            if let Some(millis) = name
                .strip_prefix("ckpt-")
                .and_then(|rest| rest.strip_suffix(".json"))
                .and_then(|digits| digits.parse::<u64>().ok())
            {
                ids.push(CheckpointId::from_millis(millis));
            }
        }
        Ok(ids)
    }

    fn remove_checkpoint(&self, id: &DocumentId, checkpoint: CheckpointId) -> Result<()> {
        match fs::remove_file(self.checkpoint_path(id, checkpoint)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
