//! Record codec for tweet slots
//!
//! A tweet is persisted as a fixed-order byte sequence:
//!
//! ```text
//! +------------------+
//! | Discriminator    | (8 bytes, sha256("account:Tweet")[..8])
//! +------------------+
//! | Author           | (32 bytes)
//! +------------------+
//! | Timestamp        | (i64 LE, seconds)
//! +------------------+
//! | Topic            | (u32 LE length ‖ UTF-8 bytes)
//! +------------------+
//! | Content          | (u32 LE length ‖ UTF-8 bytes)
//! +------------------+
//! | Zero padding     | (up to the slot capacity)
//! +------------------+
//! ```
//!
//! Offsets of the discriminator, author, timestamp and topic never move
//! within a schema version. Offset-based filters depend on this.

mod codec;
mod errors;
mod layout;

pub use codec::Tweet;
pub use errors::{CodecError, CodecErrorCode, CodecResult};
pub use layout::{
    discriminator, field_offset, Field, SchemaVersion, DISCRIMINATOR_LEN, HEADER_LEN,
    MAX_BYTES_PER_CHAR, MAX_CONTENT_BYTES, MAX_CONTENT_CHARS, MAX_TOPIC_BYTES, MAX_TOPIC_CHARS,
    STRING_PREFIX_LEN, TWEET_SPACE,
};
