//! Validation error types
//!
//! Error codes (all REJECT, the request is refused and nothing is written):
//! - TWEET_TOPIC_TOO_LONG (6000)
//! - TWEET_CONTENT_TOO_LONG (6001)
//! - TWEET_CONTENT_EMPTY (6002)
//! - TWEET_UNAUTHORIZED (2002)
//!
//! Clients match on the message text of the two length errors, so those
//! messages are fixed.

use std::fmt;

/// Validation error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    TopicTooLong,
    ContentTooLong,
    ContentEmpty,
    Unauthorized,
}

impl ValidationErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorCode::TopicTooLong => "TWEET_TOPIC_TOO_LONG",
            ValidationErrorCode::ContentTooLong => "TWEET_CONTENT_TOO_LONG",
            ValidationErrorCode::ContentEmpty => "TWEET_CONTENT_EMPTY",
            ValidationErrorCode::Unauthorized => "TWEET_UNAUTHORIZED",
        }
    }

    /// Returns the numeric error code reported to clients
    pub fn number(&self) -> u32 {
        match self {
            ValidationErrorCode::TopicTooLong => 6000,
            ValidationErrorCode::ContentTooLong => 6001,
            ValidationErrorCode::ContentEmpty => 6002,
            ValidationErrorCode::Unauthorized => 2002,
        }
    }

    /// Returns the fixed client-facing message
    pub fn message(&self) -> &'static str {
        match self {
            ValidationErrorCode::TopicTooLong => {
                "The provided topic should be 50 characters long maximum."
            }
            ValidationErrorCode::ContentTooLong => {
                "The provided content should be 280 characters long maximum."
            }
            ValidationErrorCode::ContentEmpty => "The provided content should not be empty.",
            ValidationErrorCode::Unauthorized => "A required signature is missing or invalid.",
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation error with optional detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    code: ValidationErrorCode,
    details: Option<String>,
}

impl ValidationError {
    fn new(code: ValidationErrorCode, details: Option<String>) -> Self {
        Self { code, details }
    }

    /// Topic over the limit
    pub fn topic_too_long(length: usize) -> Self {
        Self::new(
            ValidationErrorCode::TopicTooLong,
            Some(format!("topic length: {}", length)),
        )
    }

    /// Content over the limit
    pub fn content_too_long(length: usize) -> Self {
        Self::new(
            ValidationErrorCode::ContentTooLong,
            Some(format!("content length: {}", length)),
        )
    }

    /// Content missing
    pub fn content_empty() -> Self {
        Self::new(ValidationErrorCode::ContentEmpty, None)
    }

    /// A required signer did not authenticate
    pub fn unauthorized(signer: impl fmt::Display) -> Self {
        Self::new(
            ValidationErrorCode::Unauthorized,
            Some(format!("missing signature: {}", signer)),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> ValidationErrorCode {
        self.code
    }

    /// Returns the fixed message
    pub fn message(&self) -> &'static str {
        self.code.message()
    }

    /// Returns additional detail
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[REJECT] {} ({}): {}",
            self.code.code(),
            self.code.number(),
            self.code.message()
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_messages_are_verbatim() {
        assert!(ValidationError::topic_too_long(51)
            .to_string()
            .contains("The provided topic should be 50 characters long maximum."));
        assert!(ValidationError::content_too_long(281)
            .to_string()
            .contains("The provided content should be 280 characters long maximum."));
    }

    #[test]
    fn test_codes_and_numbers() {
        assert_eq!(ValidationErrorCode::TopicTooLong.number(), 6000);
        assert_eq!(ValidationErrorCode::ContentTooLong.number(), 6001);
        assert_eq!(ValidationErrorCode::ContentEmpty.number(), 6002);
        assert_eq!(ValidationErrorCode::Unauthorized.code(), "TWEET_UNAUTHORIZED");
    }
}
