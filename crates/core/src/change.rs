//! Field changes and atomic batch application

use crate::error::Result;
use crate::path::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single field edit: write `value` at `field`
///
/// Serializes as `{"field": "hero.title", "value": ...}`, so a malformed
/// path is rejected at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Where to write
    pub field: FieldPath,
    /// What to write
    pub value: Value,
}

impl FieldChange {
    /// Build a change from a raw path string
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPath` if the path fails the syntactic rules.
    pub fn new(field: &str, value: Value) -> Result<Self> {
        Ok(FieldChange {
            field: FieldPath::parse(field)?,
            value,
        })
    }
}

/// Apply an ordered batch of changes to a content map, all-or-nothing
///
/// The whole batch is applied to a working copy first; `content` is only
/// replaced once every change has succeeded. The first failing change aborts
/// the batch with its error and leaves `content` untouched. Later changes
/// targeting the same path overwrite earlier ones.
///
/// An empty batch is valid and leaves the content as-is; versioning of the
/// resulting no-op mutation is the caller's concern.
pub fn apply_changes(content: &mut Map<String, Value>, changes: &[FieldChange]) -> Result<()> {
    let mut working = Value::Object(content.clone());
    for change in changes {
        change.field.set(&mut working, change.value.clone())?;
    }
    if let Value::Object(map) = working {
        *content = map;
    }
    Ok(())
}
