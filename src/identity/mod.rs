//! Identities, keypairs and request signatures
//!
//! An identity is a 32-byte ed25519 public key. It names authors, slot
//! addresses and the program itself. Requests are authorized by ed25519
//! signatures over the request's message bytes.

mod errors;
mod keys;

pub use errors::{IdentityError, IdentityResult};
pub use keys::{read_keypair_file, write_keypair_file, Identity, Keypair, Signature};
