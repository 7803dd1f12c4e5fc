//! Inbound `send_tweet` instruction and signed requests
//!
//! Instruction data:
//!
//! ```text
//! sighash("global:send_tweet") (8) ‖ topic (u32 LE len ‖ bytes) ‖ content (u32 LE len ‖ bytes)
//! ```
//!
//! The signed message is `tweet (32) ‖ author (32) ‖ instruction data`.
//! Both the author and the fresh tweet address must sign it.

use sha2::{Digest, Sha256};

use super::errors::{ProgramError, ProgramResult};
use crate::identity::{Identity, Keypair, Signature};
use crate::validator::SignatureProof;

/// First 8 bytes of sha256("`namespace`:`name`")
pub fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("{}:{}", namespace, name).as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

/// Arguments of the `send_tweet` instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTweet {
    pub topic: String,
    pub content: String,
}

impl SendTweet {
    pub fn new(topic: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            content: content.into(),
        }
    }

    /// Encodes the instruction data
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8 + 8 + self.topic.len() + self.content.len());
        buf.extend_from_slice(&sighash("global", "send_tweet"));
        buf.extend_from_slice(&(self.topic.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.topic.as_bytes());
        buf.extend_from_slice(&(self.content.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.content.as_bytes());
        buf
    }

    /// Decodes instruction data.
    ///
    /// # Errors
    ///
    /// `TWEET_INVALID_INSTRUCTION` on an unknown sighash, truncated data,
    /// trailing bytes or non-UTF-8 strings.
    pub fn unpack(data: &[u8]) -> ProgramResult<Self> {
        let (tag, rest) = data
            .split_first_chunk::<8>()
            .ok_or_else(|| {
                ProgramError::invalid_instruction("instruction data shorter than sighash")
            })?;
        if *tag != sighash("global", "send_tweet") {
            return Err(ProgramError::invalid_instruction("unknown instruction sighash"));
        }

        let (topic, rest) = take_string(rest, "topic")?;
        let (content, rest) = take_string(rest, "content")?;
        if !rest.is_empty() {
            return Err(ProgramError::invalid_instruction(format!(
                "{} trailing bytes after instruction arguments",
                rest.len()
            )));
        }

        Ok(Self { topic, content })
    }
}

fn take_string<'a>(data: &'a [u8], field: &str) -> ProgramResult<(String, &'a [u8])> {
    let (len, rest) = data.split_first_chunk::<4>().ok_or_else(|| {
        ProgramError::invalid_instruction(format!("{} length prefix truncated", field))
    })?;
    let len = u32::from_le_bytes(*len) as usize;
    if rest.len() < len {
        return Err(ProgramError::invalid_instruction(format!(
            "{} length {} exceeds remaining {} bytes",
            field,
            len,
            rest.len()
        )));
    }
    let (text, rest) = rest.split_at(len);
    let text = String::from_utf8(text.to_vec()).map_err(|e| {
        ProgramError::invalid_instruction(format!("{} is not UTF-8: {}", field, e))
    })?;
    Ok((text, rest))
}

/// Accounts named by a `send_tweet` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendTweetAccounts {
    /// Fresh slot address; its keypair must sign
    pub tweet: Identity,
    /// Author and payer; must sign
    pub author: Identity,
}

/// A `send_tweet` request with its signatures
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub accounts: SendTweetAccounts,
    pub data: Vec<u8>,
    pub signatures: Vec<(Identity, Signature)>,
}

impl SignedRequest {
    /// Builds and signs a request. Each signer signs the same message.
    pub fn sign(accounts: SendTweetAccounts, args: &SendTweet, signers: &[&Keypair]) -> Self {
        let data = args.pack();
        let message = Self::message(&accounts, &data);
        let signatures = signers
            .iter()
            .map(|kp| (kp.identity(), kp.sign(&message)))
            .collect();
        Self {
            accounts,
            data,
            signatures,
        }
    }

    /// Bytes covered by the signatures
    pub fn message(accounts: &SendTweetAccounts, data: &[u8]) -> Vec<u8> {
        let mut message = Vec::with_capacity(64 + data.len());
        message.extend_from_slice(accounts.tweet.as_bytes());
        message.extend_from_slice(accounts.author.as_bytes());
        message.extend_from_slice(data);
        message
    }

    /// This request's signed message
    pub fn message_bytes(&self) -> Vec<u8> {
        Self::message(&self.accounts, &self.data)
    }

    /// Signature proof over `message` (as returned by [`Self::message_bytes`])
    pub fn proof<'a>(&'a self, message: &'a [u8]) -> SignatureProof<'a> {
        SignatureProof::new(message, &self.signatures)
    }
}
