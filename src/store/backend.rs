//! Slot backend trait and the in-memory backend

use std::collections::btree_map;
use std::collections::BTreeMap;

use super::errors::{StoreError, StoreResult};
use super::slot::{SlotAddress, StorageSlot};

/// Address-keyed slot storage.
///
/// Backends are write-once per address: `insert` on an occupied address
/// fails. Iteration order is by address and carries no meaning.
pub trait SlotBackend {
    /// Restartable iterator over all slots
    type Iter<'a>: Iterator<Item = (&'a SlotAddress, &'a StorageSlot)> + Clone
    where
        Self: 'a;

    fn contains(&self, address: &SlotAddress) -> bool;

    fn load(&self, address: &SlotAddress) -> Option<&StorageSlot>;

    fn insert(&mut self, address: SlotAddress, slot: StorageSlot) -> StoreResult<()>;

    fn iter(&self) -> Self::Iter<'_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Volatile backend over an ordered map
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: BTreeMap<SlotAddress, StorageSlot>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotBackend for MemoryBackend {
    type Iter<'a> = btree_map::Iter<'a, SlotAddress, StorageSlot>;

    fn contains(&self, address: &SlotAddress) -> bool {
        self.slots.contains_key(address)
    }

    fn load(&self, address: &SlotAddress) -> Option<&StorageSlot> {
        self.slots.get(address)
    }

    fn insert(&mut self, address: SlotAddress, slot: StorageSlot) -> StoreResult<()> {
        match self.slots.entry(address) {
            btree_map::Entry::Occupied(_) => Err(StoreError::allocation_failed(format!(
                "address {} already in use",
                address
            ))),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(slot);
                Ok(())
            }
        }
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.slots.iter()
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use crate::store::slot::program_id;

    #[test]
    fn test_insert_is_write_once() {
        let mut backend = MemoryBackend::new();
        let addr = Identity::new([4u8; 32]);
        backend
            .insert(addr, StorageSlot::allocate(program_id(), 1, 4))
            .unwrap();
        assert!(backend.contains(&addr));
        assert!(backend
            .insert(addr, StorageSlot::allocate(program_id(), 1, 4))
            .is_err());
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut backend = MemoryBackend::new();
        for i in 0..3u8 {
            backend
                .insert(Identity::new([i; 32]), StorageSlot::allocate(program_id(), 0, 1))
                .unwrap();
        }
        let iter = backend.iter();
        assert_eq!(iter.clone().count(), 3);
        assert_eq!(iter.count(), 3);
    }
}
