//! sitevault: an embedded versioned document store for visual site editors.
//!
//! Documents are schemaless JSON trees guarded by optimistic concurrency:
//! every save carries the version the editor last saw, and a mismatch comes
//! back as a conflict carrying the authoritative server content instead of
//! an error. Each successful mutation leaves behind a full checkpoint, so
//! any earlier state can be restored — forward, onto a new version, never
//! by rewinding history.
//!
//! ```no_run
//! use sitevault::{DocumentId, SiteVault};
//!
//! # fn main() -> sitevault::Result<()> {
//! let vault = SiteVault::open(std::path::Path::new("./data"))?;
//! let id = DocumentId::new("landing-page").unwrap();
//! let doc = vault.get_document(&id)?;
//! println!("version {}", doc.version);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use sitevault_api::*;
