//! Identifier and time types
//!
//! Documents are addressed by a user-facing `DocumentId`, mutations are
//! attributed to an opaque `Identity`, and both wall-clock metadata and
//! checkpoint identity are expressed in epoch milliseconds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a document id, in bytes
pub const MAX_DOCUMENT_ID_LENGTH: usize = 128;

/// User-facing identifier for a document
///
/// Document ids double as directory names in the filesystem backend, so the
/// character set is restricted to shapes that cannot traverse paths.
///
/// ## Validation Rules
///
/// - Length: 1-128 bytes
/// - Characters: `[a-zA-Z0-9_.-]`
/// - Cannot start with `-` or `.`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

/// Error when validating a document id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentIdError {
    /// Id is empty
    Empty,
    /// Id exceeds maximum length
    TooLong {
        /// Actual length of the id
        length: usize,
        /// Maximum allowed length
        max: usize,
    },
    /// Id contains an invalid character
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position of the invalid character
        position: usize,
    },
    /// Id starts with an invalid character
    InvalidStart {
        /// The invalid starting character
        char: char,
    },
}

impl fmt::Display for DocumentIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentIdError::Empty => write!(f, "document id must not be empty"),
            DocumentIdError::TooLong { length, max } => {
                write!(f, "document id is {} bytes, over the {}-byte limit", length, max)
            }
            DocumentIdError::InvalidChar { char, position } => {
                write!(
                    f,
                    "document id has disallowed character '{}' at byte {}; use ASCII letters, digits, '-', '_' or '.'",
                    char, position
                )
            }
            DocumentIdError::InvalidStart { char } => {
                write!(
                    f,
                    "document id must begin with a letter, digit, or underscore, not '{}'",
                    char
                )
            }
        }
    }
}

impl std::error::Error for DocumentIdError {}

impl DocumentId {
    /// Create a new DocumentId, validating the input
    ///
    /// # Errors
    ///
    /// Returns `DocumentIdError` if the id is invalid.
    pub fn new(id: impl Into<String>) -> Result<Self, DocumentIdError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(DocumentId(id))
    }

    /// Create a DocumentId without validation
    ///
    /// The caller must ensure the id is valid. Use `new()` for untrusted input.
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        DocumentId(id.into())
    }

    /// Validate a document id
    pub fn validate(id: &str) -> Result<(), DocumentIdError> {
        if id.is_empty() {
            return Err(DocumentIdError::Empty);
        }

        if id.len() > MAX_DOCUMENT_ID_LENGTH {
            return Err(DocumentIdError::TooLong {
                length: id.len(),
                max: MAX_DOCUMENT_ID_LENGTH,
            });
        }

        if let Some(first) = id.chars().next() {
            if !first.is_ascii_alphanumeric() && first != '_' {
                return Err(DocumentIdError::InvalidStart { char: first });
            }
        }

        for (pos, ch) in id.chars().enumerate() {
            if !Self::is_valid_char(ch) {
                return Err(DocumentIdError::InvalidChar {
                    char: ch,
                    position: pos,
                });
            }
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'
    }

    /// Get the id as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = DocumentIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DocumentId::new(value)
    }
}

impl TryFrom<&str> for DocumentId {
    type Error = DocumentIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        DocumentId::new(value)
    }
}

/// Opaque identity of an editing principal
///
/// Arrives pre-authenticated from the session layer; this crate only ever
/// compares it against a document's owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from a verified principal string
    pub fn new(identity: impl Into<String>) -> Self {
        Identity(identity.into())
    }

    /// Get the identity as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Identity::new(s)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Identity::new(s)
    }
}

/// Millisecond-precision timestamp
///
/// Milliseconds since Unix epoch (1970-01-01 00:00:00 UTC). This is the
/// canonical time representation for document metadata and checkpoints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Create a timestamp for the current moment
    ///
    /// Returns epoch (0) if the system clock is before the Unix epoch.
    pub fn now() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Timestamp(millis.max(0) as u64)
    }

    /// Create a timestamp from milliseconds since epoch
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Timestamp(millis)
    }

    /// Get milliseconds since Unix epoch
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(millis: u64) -> Self {
        Timestamp::from_millis(millis)
    }
}

impl From<Timestamp> for u64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

/// Checkpoint identifier
///
/// Epoch milliseconds at creation time. Doubles as the checkpoint's unique
/// id within a document; the checkpoint manager keeps issuance strictly
/// monotonic so two checkpoints never collide on the same millisecond.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct CheckpointId(u64);

impl CheckpointId {
    /// Create a checkpoint id from milliseconds since epoch
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        CheckpointId(millis)
    }

    /// Get the id as milliseconds since epoch
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CheckpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CheckpointId {
    fn from(millis: u64) -> Self {
        CheckpointId::from_millis(millis)
    }
}

impl From<CheckpointId> for u64 {
    fn from(id: CheckpointId) -> Self {
        id.0
    }
}
