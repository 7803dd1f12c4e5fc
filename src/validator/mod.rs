//! Mutation validator and authorizer for tweet creation
//!
//! Turns a creation request into a fully populated [`Tweet`] or rejects it.
//! The validator has no side effects: allocation and persistence belong to
//! the store.
//!
//! # Check order
//!
//! 1. Unauthorized   - requester did not sign the request
//! 2. TopicTooLong   - topic over the limit
//! 3. ContentTooLong - content over the limit
//! 4. ContentEmpty   - content has zero length
//!
//! When several constraints fail, the first in this order is reported.
//!
//! [`Tweet`]: crate::record::Tweet

mod errors;
mod limits;
mod validator;

pub use errors::{ValidationError, ValidationErrorCode, ValidationResult};
pub use limits::{LengthUnit, TweetLimits};
pub use validator::{MutationValidator, SignatureProof};
