//! Immutable media payloads.

use crate::FileType;
use derive_getters::Getters;

/// Raw bytes plus their detected type.
///
/// Payloads are never mutated: normalization and compression each produce a
/// new value.
///
/// # Examples
///
/// ```
/// use assetize_core::{FileType, Payload};
///
/// let original = Payload::new(vec![0u8; 16], FileType::Png);
/// let smaller = original.with_bytes(vec![0u8; 8], FileType::Png);
///
/// assert_eq!(original.len(), 16);
/// assert_eq!(smaller.len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Payload {
    /// Encoded file contents
    bytes: Vec<u8>,
    /// Type detected from the bytes
    file_type: FileType,
}

impl Payload {
    /// Create a payload.
    pub fn new(bytes: Vec<u8>, file_type: FileType) -> Self {
        Self { bytes, file_type }
    }

    /// Produce a new payload with different contents, leaving `self` untouched.
    pub fn with_bytes(&self, bytes: Vec<u8>, file_type: FileType) -> Self {
        Self { bytes, file_type }
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the payload, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
