//! CLI-specific error types
//!
//! Program errors keep their own code and literal message so scripts can
//! match on them.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::identity::IdentityError;
use crate::program::ProgramError;
use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, keypair files)
    IoError,
    /// Already initialized
    AlreadyInitialized,
    /// Not initialized
    NotInitialized,
    /// Bad command-line value
    InvalidArgument,
    /// Store could not be opened
    OpenFailed,
    /// Error reported by the program, carrying its code
    Program(String),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &str {
        match self {
            Self::ConfigError => "TWEET_CLI_CONFIG_ERROR",
            Self::IoError => "TWEET_CLI_IO_ERROR",
            Self::AlreadyInitialized => "TWEET_CLI_ALREADY_INITIALIZED",
            Self::NotInitialized => "TWEET_CLI_NOT_INITIALIZED",
            Self::InvalidArgument => "TWEET_CLI_INVALID_ARGUMENT",
            Self::OpenFailed => "TWEET_CLI_OPEN_FAILED",
            Self::Program(code) => code,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid argument
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// Already initialized
    pub fn already_initialized() -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            "Data directory already initialized",
        )
    }

    /// Not initialized
    pub fn not_initialized() -> Self {
        Self::new(
            CliErrorCode::NotInitialized,
            "Data directory not initialized. Run 'tweetstore init' first.",
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<IdentityError> for CliError {
    fn from(e: IdentityError) -> Self {
        Self::invalid_argument(e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(CliErrorCode::OpenFailed, e.to_string())
    }
}

impl From<ProgramError> for CliError {
    fn from(e: ProgramError) -> Self {
        Self::new(
            CliErrorCode::Program(e.code().to_string()),
            e.message().to_string(),
        )
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
