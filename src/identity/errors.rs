//! # Identity Errors

use thiserror::Error;

/// Result type for identity operations
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Errors raised while parsing identities or loading keypairs
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Identity text was not 64 hex characters
    #[error("Invalid identity encoding: {0}")]
    InvalidEncoding(String),

    /// Keypair bytes were malformed or the halves disagree
    #[error("Invalid keypair: {0}")]
    InvalidKeypair(String),

    /// Keypair file could not be read or written
    #[error("Keypair file error: {0}")]
    KeypairFile(String),
}
