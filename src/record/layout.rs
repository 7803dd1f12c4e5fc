//! Fixed layout constants and field offsets

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

/// Discriminator width
pub const DISCRIMINATOR_LEN: usize = 8;
/// Author identity width
pub const AUTHOR_LEN: usize = 32;
/// Timestamp width (i64)
pub const TIMESTAMP_LEN: usize = 8;
/// Length prefix width for variable-length strings (u32)
pub const STRING_PREFIX_LEN: usize = 4;

/// Bytes before the first variable-length field
pub const HEADER_LEN: usize = DISCRIMINATOR_LEN + AUTHOR_LEN + TIMESTAMP_LEN;

/// Maximum topic length in characters
pub const MAX_TOPIC_CHARS: usize = 50;
/// Maximum content length in characters
pub const MAX_CONTENT_CHARS: usize = 280;
/// Worst-case UTF-8 width of one character
pub const MAX_BYTES_PER_CHAR: usize = 4;

/// Topic capacity in bytes
pub const MAX_TOPIC_BYTES: usize = MAX_TOPIC_CHARS * MAX_BYTES_PER_CHAR;
/// Content capacity in bytes
pub const MAX_CONTENT_BYTES: usize = MAX_CONTENT_CHARS * MAX_BYTES_PER_CHAR;

/// Slot size allocated for every tweet, independent of its actual lengths
pub const TWEET_SPACE: usize = HEADER_LEN
    + STRING_PREFIX_LEN
    + MAX_TOPIC_BYTES
    + STRING_PREFIX_LEN
    + MAX_CONTENT_BYTES;

/// Type tag written at offset 0 of every tweet slot.
pub fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(b"account:Tweet");
    let mut tag = [0u8; DISCRIMINATOR_LEN];
    tag.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    tag
}

/// Persisted schema version. Offsets are frozen per version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVersion {
    #[default]
    V1,
}

/// Fixed-position fields of the tweet layout.
///
/// Content follows a variable-length topic and has no fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Discriminator,
    Author,
    Timestamp,
    /// Starts at the topic's length prefix
    Topic,
}

impl Field {
    /// Field name as used by callers and the CLI
    pub fn name(&self) -> &'static str {
        match self {
            Field::Discriminator => "discriminator",
            Field::Author => "author",
            Field::Timestamp => "timestamp",
            Field::Topic => "topic",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discriminator" => Ok(Field::Discriminator),
            "author" => Ok(Field::Author),
            "timestamp" => Ok(Field::Timestamp),
            "topic" => Ok(Field::Topic),
            other => Err(format!("unknown fixed-position field '{}'", other)),
        }
    }
}

/// Byte offset of a fixed-position field.
pub fn field_offset(field: Field, version: SchemaVersion) -> usize {
    match version {
        SchemaVersion::V1 => match field {
            Field::Discriminator => 0,
            Field::Author => DISCRIMINATOR_LEN,
            Field::Timestamp => DISCRIMINATOR_LEN + AUTHOR_LEN,
            Field::Topic => HEADER_LEN,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_offsets_are_frozen() {
        assert_eq!(field_offset(Field::Discriminator, SchemaVersion::V1), 0);
        assert_eq!(field_offset(Field::Author, SchemaVersion::V1), 8);
        assert_eq!(field_offset(Field::Timestamp, SchemaVersion::V1), 40);
        assert_eq!(field_offset(Field::Topic, SchemaVersion::V1), 48);
    }

    #[test]
    fn test_slot_space() {
        assert_eq!(TWEET_SPACE, 8 + 32 + 8 + 4 + 50 * 4 + 4 + 280 * 4);
        assert_eq!(TWEET_SPACE, 1376);
    }

    #[test]
    fn test_discriminator_is_stable() {
        assert_eq!(discriminator(), discriminator());
        assert_ne!(discriminator(), [0u8; 8]);
    }

    #[test]
    fn test_field_names_parse() {
        for field in [Field::Discriminator, Field::Author, Field::Timestamp, Field::Topic] {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
        assert!("content".parse::<Field>().is_err());
    }
}
