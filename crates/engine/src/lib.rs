//! Vault engine: configuration, permissions, checkpoints, and the
//! optimistic-concurrency mutation pipeline.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checkpoints;
pub mod config;
pub mod permissions;
pub mod vault;

pub use checkpoints::CheckpointManager;
pub use config::{default_toml, VaultConfig, CONFIG_FILE_NAME};
pub use vault::Vault;

// Storage backends callers wire into a vault.
pub use sitevault_storage::{FsBlobStore, MemoryBlobStore, RetentionPolicy};
