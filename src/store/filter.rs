//! Offset-addressed byte filters
//!
//! A filter compares raw slot bytes at a fixed offset; records are never
//! deserialized to be filtered. Field filters resolve a field name to its
//! offset in the current schema.

use crate::identity::Identity;
use crate::record::{field_offset, Field, SchemaVersion, STRING_PREFIX_LEN};

use super::slot::StorageSlot;

/// Exact byte comparison at an offset of the slot data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memcmp {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl Memcmp {
    /// Raw filter: `bytes` must appear at `offset`
    pub fn new(offset: usize, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            bytes: bytes.into(),
        }
    }

    /// Exact-field filter.
    ///
    /// For the topic, the expected value is compared together with its
    /// length prefix, so only a topic of exactly that length and content
    /// matches. Other fields compare `expected` verbatim at the field offset.
    pub fn field(field: Field, expected: &[u8]) -> Self {
        let offset = field_offset(field, SchemaVersion::V1);
        match field {
            Field::Topic => {
                let mut bytes = Vec::with_capacity(STRING_PREFIX_LEN + expected.len());
                bytes.extend_from_slice(&(expected.len() as u32).to_le_bytes());
                bytes.extend_from_slice(expected);
                Self { offset, bytes }
            }
            Field::Discriminator | Field::Author | Field::Timestamp => Self {
                offset,
                bytes: expected.to_vec(),
            },
        }
    }

    /// Records written by `author`
    pub fn author(author: &Identity) -> Self {
        Self::field(Field::Author, author.as_bytes())
    }

    /// Records whose topic is exactly `topic`
    pub fn topic(topic: &str) -> Self {
        Self::field(Field::Topic, topic.as_bytes())
    }

    /// Records whose topic starts with `prefix` (compares past the length prefix)
    pub fn topic_prefix(prefix: &str) -> Self {
        Self::new(
            field_offset(Field::Topic, SchemaVersion::V1) + STRING_PREFIX_LEN,
            prefix.as_bytes(),
        )
    }

    /// True if the slot data holds `bytes` at `offset`
    pub fn matches(&self, slot: &StorageSlot) -> bool {
        slot.matches_at(self.offset, &self.bytes)
    }
}
