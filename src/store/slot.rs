//! Storage slots and the program identity that owns them

use crate::identity::Identity;

/// Address of a storage slot. Addresses are fresh public keys.
pub type SlotAddress = Identity;

/// Identity of the tweet program, owner of every slot it allocates.
pub fn program_id() -> Identity {
    Identity::derive("tweetstore:program")
}

/// One addressable allocation holding one serialized record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSlot {
    /// Program allowed to write the slot
    pub owner: Identity,
    /// Lamports deposited to keep the slot rent-exempt
    pub lamports: u64,
    /// Zero-padded record bytes, sized at allocation
    pub data: Vec<u8>,
}

impl StorageSlot {
    /// Creates a slot of `space` zero bytes
    pub fn allocate(owner: Identity, lamports: u64, space: usize) -> Self {
        Self {
            owner,
            lamports,
            data: vec![0u8; space],
        }
    }

    /// Compares `bytes` against the slot data at `offset`.
    ///
    /// Out-of-range comparisons never match.
    pub fn matches_at(&self, offset: usize, bytes: &[u8]) -> bool {
        offset
            .checked_add(bytes.len())
            .and_then(|end| self.data.get(offset..end))
            .is_some_and(|window| window == bytes)
    }
}
