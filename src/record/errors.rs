//! Codec error types
//!
//! Error codes:
//! - TWEET_MALFORMED_RECORD (FATAL) - bytes do not describe a tweet
//!
//! A malformed record means corruption or a schema mismatch. It is never
//! coerced into a default value.

use std::fmt;

/// Codec error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecErrorCode {
    /// Bytes do not decode to a tweet of the current schema
    TweetMalformedRecord,
}

impl CodecErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            CodecErrorCode::TweetMalformedRecord => "TWEET_MALFORMED_RECORD",
        }
    }
}

impl fmt::Display for CodecErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Codec error with the byte offset at which decoding stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecError {
    code: CodecErrorCode,
    message: String,
    offset: Option<usize>,
}

impl CodecError {
    /// Malformed record without position context
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            code: CodecErrorCode::TweetMalformedRecord,
            message: message.into(),
            offset: None,
        }
    }

    /// Malformed record detected at a byte offset
    pub fn malformed_at(offset: usize, message: impl Into<String>) -> Self {
        Self {
            code: CodecErrorCode::TweetMalformedRecord,
            message: message.into(),
            offset: Some(offset),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> CodecErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the byte offset, if known
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[FATAL] {}: {}", self.code.code(), self.message)?;
        if let Some(offset) = self.offset {
            write!(f, " (byte_offset: {})", offset)?;
        }
        Ok(())
    }
}

impl std::error::Error for CodecError {}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
