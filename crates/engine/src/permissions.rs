//! Edit authorization
//!
//! Single-owner model: the identity recorded on the document at creation is
//! the only one allowed to mutate it. Reads are open to any caller.

use sitevault_core::{Document, DocumentId, Error, Identity, Result};

/// True when `identity` may mutate `document`
pub fn can_edit(identity: &Identity, document: &Document) -> bool {
    document.owner == *identity
}

/// Fail with [`Error::Forbidden`] unless `identity` owns the document
pub fn verify_edit(identity: &Identity, id: &DocumentId, document: &Document) -> Result<()> {
    if can_edit(identity, document) {
        Ok(())
    } else {
        Err(Error::Forbidden {
            identity: identity.clone(),
            document: id.clone(),
        })
    }
}
