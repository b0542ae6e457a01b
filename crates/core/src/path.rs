//! Field paths into document content
//!
//! A field path is a dot-separated address into the JSON tree, e.g.
//! `sections.0.heading.text`. A segment consisting entirely of ASCII digits
//! indexes into an array; any other segment keys into an object.
//!
//! Resolution rules:
//! - `get` is non-destructive: a missing key/index or traversal into a
//!   scalar yields `None`.
//! - `set` auto-creates empty objects for missing *key* segments. Arrays are
//!   strict: an index segment requires the node to already be an array, and
//!   a missing or incompatible node there is a `TypeMismatch`. Writing past
//!   the end of an array pads with `null` up to the index, bounded by
//!   [`MAX_ARRAY_PAD`] slots per write.
//! - `remove` shifts array elements left; removing an absent target is a
//!   no-op returning `None`.

use crate::error::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Maximum number of null slots a single write may add past the end of an
/// array. Writes further out are rejected rather than materialized.
pub const MAX_ARRAY_PAD: usize = 1024;

/// A single segment of a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "{}", k),
            Segment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// A validated path into document content
///
/// Paths are short in practice, so segments live in a `SmallVec`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: SmallVec<[Segment; 8]>,
}

impl FieldPath {
    /// Parse a dotted path
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPath` when the path is empty, contains an
    /// empty segment (`..`), or starts or ends with a dot. These are strict
    /// syntactic checks; no data-shape validation happens here.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty()
            || path.starts_with('.')
            || path.ends_with('.')
            || path.contains("..")
        {
            return Err(Error::InvalidPath(path.to_string()));
        }

        let segments = path
            .split('.')
            .map(|seg| {
                if seg.bytes().all(|b| b.is_ascii_digit()) {
                    match seg.parse::<usize>() {
                        Ok(idx) => Segment::Index(idx),
                        // Digits that overflow usize fall back to a key.
                        Err(_) => Segment::Key(seg.to_string()),
                    }
                } else {
                    Segment::Key(seg.to_string())
                }
            })
            .collect();

        Ok(FieldPath { segments })
    }

    /// The path segments, in traversal order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Read the value at this path
    ///
    /// Returns `None` if any segment is missing or traverses a scalar.
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match (segment, current) {
                (Segment::Key(key), Value::Object(obj)) => obj.get(key)?,
                (Segment::Index(idx), Value::Array(arr)) => arr.get(*idx)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Write a value at this path, mutating `root` in place
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` when traversal hits a node whose shape
    /// cannot satisfy the remaining segments, and `Error::InvalidPath` when
    /// the final index lies more than [`MAX_ARRAY_PAD`] slots past the end
    /// of the target array.
    pub fn set(&self, root: &mut Value, value: Value) -> Result<()> {
        let (parents, last) = self.segments.split_at(self.segments.len() - 1);
        let last = &last[0];

        let mut current = root;
        for (i, segment) in parents.iter().enumerate() {
            let next = &self.segments[i + 1];
            current = match segment {
                Segment::Key(key) => {
                    let obj = match current {
                        Value::Object(obj) => obj,
                        other => return Err(self.mismatch("object", other)),
                    };
                    // Arrays are never auto-created.
                    if !obj.contains_key(key) && matches!(next, Segment::Index(_)) {
                        return Err(Error::TypeMismatch {
                            expected: "array",
                            found: "nothing",
                            path: self.to_string(),
                        });
                    }
                    // Missing mapping keys auto-create an empty object.
                    obj.entry(key.clone())
                        .or_insert_with(|| Value::Object(Default::default()))
                }
                Segment::Index(idx) => {
                    let arr = match current {
                        Value::Array(arr) => arr,
                        other => return Err(self.mismatch("array", other)),
                    };
                    match arr.get_mut(*idx) {
                        Some(elem) => elem,
                        None => {
                            return Err(Error::TypeMismatch {
                                expected: expected_for(next),
                                found: "nothing",
                                path: self.to_string(),
                            });
                        }
                    }
                }
            };
        }

        match last {
            Segment::Key(key) => {
                let obj = match current {
                    Value::Object(obj) => obj,
                    other => return Err(self.mismatch("object", other)),
                };
                obj.insert(key.clone(), value);
            }
            Segment::Index(idx) => {
                let arr = match current {
                    Value::Array(arr) => arr,
                    other => return Err(self.mismatch("array", other)),
                };
                if *idx < arr.len() {
                    arr[*idx] = value;
                } else if *idx - arr.len() > MAX_ARRAY_PAD {
                    // A runaway index would materialize the whole padded
                    // array and persist it on every subsequent save.
                    return Err(Error::InvalidPath(format!(
                        "{}: index {} is more than {} past the end of a {}-element array",
                        self,
                        idx,
                        MAX_ARRAY_PAD,
                        arr.len()
                    )));
                } else {
                    // Pad with nulls up to the index, JS assignment semantics.
                    arr.resize(*idx, Value::Null);
                    arr.push(value);
                }
            }
        }
        Ok(())
    }

    /// Remove the value at this path, returning it if present
    ///
    /// Absent targets and scalar traversals are a no-op returning `None`.
    pub fn remove(&self, root: &mut Value) -> Option<Value> {
        let (parents, last) = self.segments.split_at(self.segments.len() - 1);
        let last = &last[0];

        let mut current = root;
        for segment in parents {
            current = match (segment, current) {
                (Segment::Key(key), Value::Object(obj)) => obj.get_mut(key)?,
                (Segment::Index(idx), Value::Array(arr)) => arr.get_mut(*idx)?,
                _ => return None,
            };
        }

        match (last, current) {
            (Segment::Key(key), Value::Object(obj)) => obj.remove(key),
            (Segment::Index(idx), Value::Array(arr)) => {
                if *idx < arr.len() {
                    Some(arr.remove(*idx))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn mismatch(&self, expected: &'static str, found: &Value) -> Error {
        Error::TypeMismatch {
            expected,
            found: value_type_name(found),
            path: self.to_string(),
        }
    }
}

fn expected_for(segment: &Segment) -> &'static str {
    match segment {
        Segment::Key(_) => "object",
        Segment::Index(_) => "array",
    }
}

/// Type name of a JSON value, for error messages
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FieldPath::parse(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        FieldPath::parse(&raw).map_err(D::Error::custom)
    }
}
