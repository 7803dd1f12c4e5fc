//! Tweet encode/decode over the fixed layout

use serde::Serialize;

use super::errors::{CodecError, CodecResult};
use super::layout::{
    discriminator, AUTHOR_LEN, DISCRIMINATOR_LEN, HEADER_LEN, STRING_PREFIX_LEN, TIMESTAMP_LEN,
    TWEET_SPACE,
};
use crate::identity::Identity;

/// A tweet record as held in memory.
///
/// The discriminator is implied by the type and written by `encode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tweet {
    /// Signer that created the record
    pub author: Identity,
    /// Seconds since the Unix epoch, assigned at creation
    pub timestamp: i64,
    /// 0..=50 characters
    pub topic: String,
    /// 1..=280 characters
    pub content: String,
}

impl Tweet {
    /// Creates a tweet record
    pub fn new(
        author: Identity,
        timestamp: i64,
        topic: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author,
            timestamp,
            topic: topic.into(),
            content: content.into(),
        }
    }

    /// Exact encoded length, without slot padding
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + STRING_PREFIX_LEN + self.topic.len() + STRING_PREFIX_LEN + self.content.len()
    }

    /// Serializes the tweet in layout order.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());

        buf.extend_from_slice(&discriminator());
        buf.extend_from_slice(self.author.as_bytes());
        buf.extend_from_slice(&self.timestamp.to_le_bytes());

        buf.extend_from_slice(&(self.topic.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.topic.as_bytes());

        buf.extend_from_slice(&(self.content.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.content.as_bytes());

        buf
    }

    /// Serializes the tweet into a zero-padded buffer of slot capacity.
    ///
    /// Fails if the encoded form does not fit the slot.
    pub fn encode_slot(&self) -> CodecResult<Vec<u8>> {
        let mut data = self.encode();
        if data.len() > TWEET_SPACE {
            return Err(CodecError::malformed(format!(
                "encoded tweet is {} bytes, slot capacity is {}",
                data.len(),
                TWEET_SPACE
            )));
        }
        data.resize(TWEET_SPACE, 0);
        Ok(data)
    }

    /// Deserializes a tweet. Trailing bytes (slot padding) are ignored.
    pub fn decode(data: &[u8]) -> CodecResult<Self> {
        if data.len() < HEADER_LEN + 2 * STRING_PREFIX_LEN {
            return Err(CodecError::malformed(format!(
                "buffer of {} bytes is shorter than the tweet header",
                data.len()
            )));
        }

        if data[..DISCRIMINATOR_LEN] != discriminator() {
            return Err(CodecError::malformed_at(0, "discriminator does not match Tweet"));
        }

        let mut offset = DISCRIMINATOR_LEN;
        let author = Identity::from_slice(&data[offset..offset + AUTHOR_LEN])
            .map_err(|e| CodecError::malformed_at(offset, e.to_string()))?;
        offset += AUTHOR_LEN;

        let mut ts = [0u8; TIMESTAMP_LEN];
        ts.copy_from_slice(&data[offset..offset + TIMESTAMP_LEN]);
        let timestamp = i64::from_le_bytes(ts);
        offset += TIMESTAMP_LEN;

        let (topic, next) = read_string(data, offset, "topic")?;
        let (content, _) = read_string(data, next, "content")?;

        Ok(Self {
            author,
            timestamp,
            topic,
            content,
        })
    }
}

/// Reads a u32-prefixed UTF-8 string at `offset`, returning it and the next offset.
fn read_string(data: &[u8], offset: usize, field: &str) -> CodecResult<(String, usize)> {
    let prefix_end = offset + STRING_PREFIX_LEN;
    if data.len() < prefix_end {
        return Err(CodecError::malformed_at(
            offset,
            format!("{} length prefix truncated", field),
        ));
    }

    let mut len_buf = [0u8; STRING_PREFIX_LEN];
    len_buf.copy_from_slice(&data[offset..prefix_end]);
    let len = u32::from_le_bytes(len_buf) as usize;

    let end = prefix_end
        .checked_add(len)
        .filter(|end| *end <= data.len())
        .ok_or_else(|| {
            CodecError::malformed_at(
                offset,
                format!(
                    "{} length {} exceeds buffer of {} bytes",
                    field,
                    len,
                    data.len()
                ),
            )
        })?;

    let text = String::from_utf8(data[prefix_end..end].to_vec()).map_err(|e| {
        CodecError::malformed_at(prefix_end, format!("{} is not UTF-8: {}", field, e))
    })?;

    Ok((text, end))
}
