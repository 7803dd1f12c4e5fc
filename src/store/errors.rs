//! Store error types
//!
//! Error codes:
//! - TWEET_NOT_FOUND (ERROR) - address holds no tweet
//! - TWEET_ALLOCATION_FAILED (ERROR) - slot could not be allocated or funded
//! - TWEET_MALFORMED_RECORD (FATAL) - stored bytes do not decode
//! - TWEET_STORAGE_IO_ERROR (ERROR) - disk I/O failure
//! - TWEET_SLOT_CORRUPTION (FATAL) - slot log checksum or framing failure

use std::fmt;
use std::io;

use crate::record::CodecError;

/// Severity levels for store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, store stays usable
    Error,
    /// Stored state cannot be trusted
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Store error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    NotFound,
    AllocationFailed,
    MalformedRecord,
    StorageIoError,
    SlotCorruption,
}

impl StoreErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::NotFound => "TWEET_NOT_FOUND",
            StoreErrorCode::AllocationFailed => "TWEET_ALLOCATION_FAILED",
            StoreErrorCode::MalformedRecord => "TWEET_MALFORMED_RECORD",
            StoreErrorCode::StorageIoError => "TWEET_STORAGE_IO_ERROR",
            StoreErrorCode::SlotCorruption => "TWEET_SLOT_CORRUPTION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StoreErrorCode::MalformedRecord | StoreErrorCode::SlotCorruption => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error with context
#[derive(Debug)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StoreError {
    fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// No tweet at `address`
    pub fn not_found(address: impl fmt::Display) -> Self {
        let mut err = Self::new(StoreErrorCode::NotFound, "No tweet stored at address");
        err.details = Some(format!("address: {}", address));
        err
    }

    /// Slot could not be allocated
    pub fn allocation_failed(reason: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::AllocationFailed, reason)
    }

    /// Stored bytes failed to decode
    pub fn malformed(address: impl fmt::Display, err: &CodecError) -> Self {
        let mut out = Self::new(StoreErrorCode::MalformedRecord, err.message());
        out.details = Some(match err.offset() {
            Some(offset) => format!("address: {}, byte_offset: {}", address, offset),
            None => format!("address: {}", address),
        });
        out
    }

    /// Disk I/O failure
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        let mut err = Self::new(StoreErrorCode::StorageIoError, message);
        err.source = Some(source);
        err
    }

    /// Persisted state failed to parse
    pub fn corruption(reason: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::SlotCorruption, reason)
    }

    /// Slot log corruption at a byte offset
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        let mut err = Self::new(StoreErrorCode::SlotCorruption, reason);
        err.details = Some(format!("byte_offset: {}", offset));
        err
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns whether the stored state can no longer be trusted
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
