//! Identity, signature and keypair types
//!
//! Keypair files hold a JSON array of 64 integers: the 32-byte secret
//! followed by the 32-byte public key.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use super::errors::{IdentityError, IdentityResult};

/// A 32-byte public identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity([u8; 32]);

impl Identity {
    /// Wraps raw public key bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derives a well-known identity from a seed string (sha256 of the seed).
    ///
    /// Nobody holds a secret key for a derived identity, so it can never
    /// sign a request; derived identities are used to name the program.
    pub fn derive(seed: &str) -> Self {
        let digest: [u8; 32] = Sha256::digest(seed.as_bytes()).into();
        Self(digest)
    }

    /// Builds an identity from a slice, which must be exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> IdentityResult<Self> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            IdentityError::InvalidEncoding(format!("expected 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }

    /// Parses 64 lowercase or uppercase hex characters
    pub fn from_hex(text: &str) -> IdentityResult<Self> {
        let bytes = hex::decode(text.trim())
            .map_err(|e| IdentityError::InvalidEncoding(format!("{}: {}", text, e)))?;
        Self::from_slice(&bytes)
    }

    /// Returns the raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the lowercase hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Checks an ed25519 signature made by this identity over `message`.
    ///
    /// Identities that are not valid public keys never verify.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        key.verify(message, &sig).is_ok()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.to_hex())
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// A 64-byte ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; 64]);

impl Signature {
    /// Returns the raw bytes
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0))
    }
}

/// An ed25519 signing keypair.
#[derive(Clone)]
pub struct Keypair {
    signing: SigningKey,
}

impl Keypair {
    /// Generates a fresh keypair from the OS random source
    pub fn generate() -> Self {
        Self {
            signing: SigningKey::generate(&mut OsRng),
        }
    }

    /// Builds a keypair from a 32-byte secret seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing: SigningKey::from_bytes(seed),
        }
    }

    /// Builds a keypair from secret ‖ public bytes, rejecting mismatched halves
    pub fn from_bytes(bytes: &[u8]) -> IdentityResult<Self> {
        let arr: [u8; 64] = bytes.try_into().map_err(|_| {
            IdentityError::InvalidKeypair(format!("expected 64 bytes, got {}", bytes.len()))
        })?;
        let signing = SigningKey::from_keypair_bytes(&arr)
            .map_err(|e| IdentityError::InvalidKeypair(e.to_string()))?;
        Ok(Self { signing })
    }

    /// Returns secret ‖ public bytes
    pub fn to_bytes(&self) -> [u8; 64] {
        self.signing.to_keypair_bytes()
    }

    /// Returns the public identity
    pub fn identity(&self) -> Identity {
        Identity(self.signing.verifying_key().to_bytes())
    }

    /// Signs a message
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing.sign(message).to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({})", self.identity())
    }
}

/// Reads a keypair file (JSON array of 64 integers)
pub fn read_keypair_file(path: &Path) -> IdentityResult<Keypair> {
    let content = fs::read_to_string(path)
        .map_err(|e| IdentityError::KeypairFile(format!("{}: {}", path.display(), e)))?;
    let bytes: Vec<u8> = serde_json::from_str(&content)
        .map_err(|e| IdentityError::KeypairFile(format!("{}: {}", path.display(), e)))?;
    Keypair::from_bytes(&bytes)
}

/// Writes a keypair file, refusing to overwrite an existing one
pub fn write_keypair_file(keypair: &Keypair, path: &Path) -> IdentityResult<()> {
    if path.exists() {
        return Err(IdentityError::KeypairFile(format!(
            "{} already exists",
            path.display()
        )));
    }
    let json = serde_json::to_string(&keypair.to_bytes().to_vec())
        .map_err(|e| IdentityError::KeypairFile(e.to_string()))?;
    fs::write(path, json)
        .map_err(|e| IdentityError::KeypairFile(format!("{}: {}", path.display(), e)))
}
