//! Program error types
//!
//! Program errors are pass-through: they keep the code and message of the
//! validator, codec or store error that caused them. Clients match on the
//! message text, so it is never rewritten.

use std::fmt;

use crate::record::CodecError;
use crate::store::{StoreError, StoreErrorCode};
use crate::validator::{ValidationError, ValidationErrorCode};

/// Program error severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request refused, nothing written
    Reject,
    /// Operation failed
    Error,
    /// Stored state cannot be trusted
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// What went wrong, independent of which layer reported it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TopicTooLong,
    ContentTooLong,
    ContentEmpty,
    Unauthorized,
    MalformedRecord,
    NotFound,
    AllocationFailed,
    InvalidInstruction,
    Storage,
}

/// Error returned by program operations
#[derive(Debug, Clone)]
pub struct ProgramError {
    kind: ErrorKind,
    code: String,
    message: String,
    details: Option<String>,
    severity: Severity,
}

impl ProgramError {
    /// Instruction data could not be decoded
    pub fn invalid_instruction(reason: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidInstruction,
            code: "TWEET_INVALID_INSTRUCTION".to_string(),
            message: reason.into(),
            details: None,
            severity: Severity::Reject,
        }
    }

    /// Returns the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional detail
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns the severity
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        matches!(self.severity, Severity::Fatal)
    }
}

impl From<ValidationError> for ProgramError {
    fn from(err: ValidationError) -> Self {
        let kind = match err.code() {
            ValidationErrorCode::TopicTooLong => ErrorKind::TopicTooLong,
            ValidationErrorCode::ContentTooLong => ErrorKind::ContentTooLong,
            ValidationErrorCode::ContentEmpty => ErrorKind::ContentEmpty,
            ValidationErrorCode::Unauthorized => ErrorKind::Unauthorized,
        };
        Self {
            kind,
            code: err.code().code().to_string(),
            message: err.message().to_string(),
            details: err.details().map(str::to_string),
            severity: Severity::Reject,
        }
    }
}

impl From<StoreError> for ProgramError {
    fn from(err: StoreError) -> Self {
        let kind = match err.code() {
            StoreErrorCode::NotFound => ErrorKind::NotFound,
            StoreErrorCode::AllocationFailed => ErrorKind::AllocationFailed,
            StoreErrorCode::MalformedRecord => ErrorKind::MalformedRecord,
            StoreErrorCode::StorageIoError | StoreErrorCode::SlotCorruption => ErrorKind::Storage,
        };
        Self {
            kind,
            code: err.code().code().to_string(),
            message: err.message().to_string(),
            details: err.details().map(str::to_string),
            severity: if err.is_fatal() {
                Severity::Fatal
            } else {
                Severity::Error
            },
        }
    }
}

impl From<CodecError> for ProgramError {
    fn from(err: CodecError) -> Self {
        Self {
            kind: ErrorKind::MalformedRecord,
            code: err.code().code().to_string(),
            message: err.message().to_string(),
            details: err.offset().map(|o| format!("byte_offset: {}", o)),
            severity: Severity::Fatal,
        }
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProgramError {}

/// Result type for program operations
pub type ProgramResult<T> = Result<T, ProgramError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_passthrough_keeps_literal_text() {
        let err = ProgramError::from(ValidationError::topic_too_long(51));
        assert_eq!(err.kind(), ErrorKind::TopicTooLong);
        assert_eq!(err.code(), "TWEET_TOPIC_TOO_LONG");
        assert!(err
            .to_string()
            .contains("The provided topic should be 50 characters long maximum."));
    }

    #[test]
    fn test_store_passthrough_keeps_severity() {
        let err = ProgramError::from(StoreError::corruption("bad"));
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.is_fatal());

        let err = ProgramError::from(StoreError::not_found("abc"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_invalid_instruction() {
        let err = ProgramError::invalid_instruction("unknown instruction");
        assert_eq!(err.kind(), ErrorKind::InvalidInstruction);
        assert_eq!(err.severity(), Severity::Reject);
    }
}
