//! Record store: slot allocation, point reads and filtered scans

use super::backend::SlotBackend;
use super::bank::{Bank, Rent};
use super::errors::{StoreError, StoreResult};
use super::filter::Memcmp;
use super::slot::{program_id, SlotAddress, StorageSlot};
use crate::identity::Identity;
use crate::record::{discriminator, Field, Tweet, DISCRIMINATOR_LEN, TWEET_SPACE};

/// Mapping of slot address to tweet, over a pluggable backend.
///
/// The store is the only writer of slot contents. Each address is written
/// by exactly one `create` for its lifetime.
pub struct RecordStore<B: SlotBackend> {
    backend: B,
    bank: Bank,
    rent: Rent,
    program_id: Identity,
}

impl<B: SlotBackend> RecordStore<B> {
    /// Creates a store over `backend`, funding allocations from `bank`
    pub fn new(backend: B, bank: Bank, rent: Rent) -> Self {
        Self {
            backend,
            bank,
            rent,
            program_id: program_id(),
        }
    }

    /// Returns the owning program identity
    pub fn program_id(&self) -> &Identity {
        &self.program_id
    }

    /// Returns the bank
    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// Returns the bank for funding
    pub fn bank_mut(&mut self) -> &mut Bank {
        &mut self.bank
    }

    /// Lamports locked per tweet slot
    pub fn slot_rent(&self) -> u64 {
        self.rent.minimum_balance(TWEET_SPACE)
    }

    /// Number of slots in the backend, tweets or not
    pub fn slot_count(&self) -> usize {
        self.backend.len()
    }

    /// Allocates a slot at `address` and writes `tweet` into it.
    ///
    /// The slot is sized for the maximum topic and content, not the actual
    /// lengths. `payer` funds the rent-exempt deposit.
    ///
    /// # Errors
    ///
    /// - `TWEET_ALLOCATION_FAILED` if the address is taken or the payer
    ///   cannot fund the slot
    /// - `TWEET_MALFORMED_RECORD` if the tweet does not fit the slot
    pub fn create(
        &mut self,
        address: SlotAddress,
        tweet: &Tweet,
        payer: &Identity,
    ) -> StoreResult<SlotAddress> {
        if self.backend.contains(&address) {
            return Err(StoreError::allocation_failed(format!(
                "address {} already in use",
                address
            )));
        }

        let data = tweet
            .encode_slot()
            .map_err(|e| StoreError::malformed(address, &e))?;

        let lamports = self.slot_rent();
        self.bank.debit(payer, lamports)?;

        let mut slot = StorageSlot::allocate(self.program_id, lamports, TWEET_SPACE);
        slot.data.copy_from_slice(&data);

        if let Err(e) = self.backend.insert(address, slot) {
            // refund: the slot never came to exist
            self.bank.credit(payer, lamports)?;
            return Err(e);
        }

        Ok(address)
    }

    /// Reads the tweet at `address`.
    ///
    /// # Errors
    ///
    /// - `TWEET_NOT_FOUND` if the address holds no slot of this program, or
    ///   the slot is not a tweet
    /// - `TWEET_MALFORMED_RECORD` if a tweet slot does not decode
    pub fn get(&self, address: &SlotAddress) -> StoreResult<Tweet> {
        let slot = self
            .backend
            .load(address)
            .filter(|slot| is_tweet_slot(slot, &self.program_id))
            .ok_or_else(|| StoreError::not_found(address))?;

        Tweet::decode(&slot.data).map_err(|e| StoreError::malformed(address, &e))
    }

    /// Scans every tweet whose bytes match all `filters`.
    pub fn query(&self, filters: Vec<Memcmp>) -> Scan<'_, B> {
        Scan {
            inner: self.backend.iter(),
            filters,
            program_id: self.program_id,
        }
    }

    /// Scans tweets whose `field` equals `expected` (see [`Memcmp::field`]).
    pub fn query_by_exact_field(&self, field: Field, expected: &[u8]) -> Scan<'_, B> {
        self.query(vec![Memcmp::field(field, expected)])
    }

    /// Scans every tweet.
    pub fn all(&self) -> Scan<'_, B> {
        self.query(Vec::new())
    }
}

fn is_tweet_slot(slot: &StorageSlot, program_id: &Identity) -> bool {
    slot.owner == *program_id && slot.matches_at(0, &discriminator()[..DISCRIMINATOR_LEN])
}

/// Lazy scan over the store.
///
/// Finite, read-only and restartable: clone it before consuming to scan
/// again. Slots not owned by the program or not tagged as tweets are
/// skipped; a tweet slot that fails to decode yields an error instead of
/// being skipped.
pub struct Scan<'a, B: SlotBackend + 'a> {
    inner: B::Iter<'a>,
    filters: Vec<Memcmp>,
    program_id: Identity,
}

impl<'a, B: SlotBackend + 'a> Clone for Scan<'a, B> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            filters: self.filters.clone(),
            program_id: self.program_id,
        }
    }
}

impl<'a, B: SlotBackend + 'a> Iterator for Scan<'a, B> {
    type Item = StoreResult<(SlotAddress, Tweet)>;

    fn next(&mut self) -> Option<Self::Item> {
        for (address, slot) in self.inner.by_ref() {
            if !is_tweet_slot(slot, &self.program_id) {
                continue;
            }
            if !self.filters.iter().all(|f| f.matches(slot)) {
                continue;
            }
            return Some(
                Tweet::decode(&slot.data)
                    .map(|tweet| (*address, tweet))
                    .map_err(|e| StoreError::malformed(address, &e)),
            );
        }
        None
    }
}
