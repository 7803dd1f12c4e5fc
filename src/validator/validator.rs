//! Tweet validation and authorship

use super::errors::{ValidationError, ValidationResult};
use super::limits::{LengthUnit, TweetLimits};
use crate::clock::Clock;
use crate::identity::{Identity, Signature};
use crate::record::Tweet;

/// Signatures attached to a request, over the request's message bytes.
#[derive(Debug, Clone, Copy)]
pub struct SignatureProof<'a> {
    pub message: &'a [u8],
    pub signatures: &'a [(Identity, Signature)],
}

impl<'a> SignatureProof<'a> {
    pub fn new(message: &'a [u8], signatures: &'a [(Identity, Signature)]) -> Self {
        Self {
            message,
            signatures,
        }
    }

    /// True if `signer` produced a valid signature over the message.
    pub fn is_signed_by(&self, signer: &Identity) -> bool {
        self.signatures
            .iter()
            .any(|(id, sig)| id == signer && signer.verify(self.message, sig))
    }
}

/// Validates creation requests and stamps authorship.
///
/// Stateless and deterministic for a given clock reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutationValidator {
    limits: TweetLimits,
}

impl MutationValidator {
    /// Creates a validator measuring lengths in `unit`
    pub fn new(unit: LengthUnit) -> Self {
        Self {
            limits: TweetLimits::new(unit),
        }
    }

    /// Validates a creation request and builds the record.
    ///
    /// `author` is set to `requester` and `timestamp` to the clock reading.
    ///
    /// # Errors
    ///
    /// In check order: `Unauthorized`, `TopicTooLong`, `ContentTooLong`,
    /// `ContentEmpty`.
    pub fn validate_and_author<C: Clock>(
        &self,
        topic: &str,
        content: &str,
        requester: &Identity,
        proof: &SignatureProof<'_>,
        clock: &C,
    ) -> ValidationResult<Tweet> {
        self.authorize(requester, proof)?;
        self.check_lengths(topic, content)?;

        Ok(Tweet::new(
            *requester,
            clock.unix_timestamp(),
            topic,
            content,
        ))
    }

    /// Fails unless `signer` signed the request.
    pub fn authorize(&self, signer: &Identity, proof: &SignatureProof<'_>) -> ValidationResult<()> {
        if proof.is_signed_by(signer) {
            Ok(())
        } else {
            Err(ValidationError::unauthorized(signer))
        }
    }

    /// Checks topic and content lengths.
    pub fn check_lengths(&self, topic: &str, content: &str) -> ValidationResult<()> {
        let unit = self.limits.unit;

        let topic_len = unit.measure(topic);
        if topic_len > self.limits.max_topic() {
            return Err(ValidationError::topic_too_long(topic_len));
        }

        let content_len = unit.measure(content);
        if content_len > self.limits.max_content() {
            return Err(ValidationError::content_too_long(content_len));
        }

        if content_len == 0 {
            return Err(ValidationError::content_empty());
        }

        Ok(())
    }
}
