//! Durable slot backend over an append-only log
//!
//! - One log entry per allocated slot, never rewritten
//! - fsync after every append; the slot is visible only after the sync
//! - Every entry is checksum-verified when the log is opened
//! - Any framing or checksum failure aborts the open

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::backend::SlotBackend;
use super::errors::{StoreError, StoreResult};
use super::slot::{SlotAddress, StorageSlot};
use super::slot_log::{decode_entry, encode_entry, MIN_ENTRY_SIZE};

/// Slot log file name under `<data_dir>/data/`
pub const SLOT_LOG_FILE: &str = "slots.dat";

/// Slot backend persisted to `<data_dir>/data/slots.dat`.
///
/// The whole log is replayed into memory on open; reads are served from
/// memory.
pub struct FileBackend {
    log_path: PathBuf,
    file: File,
    current_offset: u64,
    slots: BTreeMap<SlotAddress, StorageSlot>,
}

impl FileBackend {
    /// Opens or creates the slot log in `data_dir`.
    ///
    /// # Errors
    ///
    /// `TWEET_STORAGE_IO_ERROR` if the file cannot be opened,
    /// `TWEET_SLOT_CORRUPTION` if any existing entry fails verification.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let data_subdir = data_dir.join("data");
        let log_path = data_subdir.join(SLOT_LOG_FILE);

        if !data_subdir.exists() {
            fs::create_dir_all(&data_subdir).map_err(|e| {
                StoreError::io_error(
                    format!("Failed to create data directory: {}", data_subdir.display()),
                    e,
                )
            })?;
        }

        let slots = Self::replay(&log_path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| {
                StoreError::io_error(
                    format!("Failed to open slot log: {}", log_path.display()),
                    e,
                )
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StoreError::io_error("Failed to read slot log metadata", e))?
            .len();

        Ok(Self {
            log_path,
            file,
            current_offset,
            slots,
        })
    }

    /// Reads every entry of the log, verifying each one.
    fn replay(log_path: &Path) -> StoreResult<BTreeMap<SlotAddress, StorageSlot>> {
        let mut slots = BTreeMap::new();

        let mut bytes = Vec::new();
        match File::open(log_path) {
            Ok(mut file) => {
                file.read_to_end(&mut bytes)
                    .map_err(|e| StoreError::io_error("Failed to read slot log", e))?;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(slots),
            Err(e) => return Err(StoreError::io_error("Failed to open slot log", e)),
        }

        let mut offset = 0usize;
        while offset < bytes.len() {
            let remaining = bytes.len() - offset;
            if remaining < MIN_ENTRY_SIZE {
                return Err(StoreError::corruption_at_offset(
                    offset as u64,
                    format!(
                        "Truncated slot log: {} bytes remaining, minimum entry size is {}",
                        remaining, MIN_ENTRY_SIZE
                    ),
                ));
            }

            let entry_length = u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ]) as usize;

            if entry_length < MIN_ENTRY_SIZE || entry_length > remaining {
                return Err(StoreError::corruption_at_offset(
                    offset as u64,
                    format!(
                        "Invalid entry length {} with {} bytes remaining",
                        entry_length, remaining
                    ),
                ));
            }

            let (address, slot) = decode_entry(&bytes[offset..offset + entry_length])
                .map_err(|e| StoreError::corruption_at_offset(offset as u64, e.to_string()))?;

            if slots.insert(address, slot).is_some() {
                return Err(StoreError::corruption_at_offset(
                    offset as u64,
                    format!("Slot {} allocated twice", address),
                ));
            }

            offset += entry_length;
        }

        Ok(slots)
    }

    /// Returns the path of the slot log
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Returns the current end-of-log offset
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Cuts the log back to the last complete entry after a failed append.
    ///
    /// Best effort: if the truncate fails too, the torn tail is reported as
    /// corruption on the next open.
    fn discard_partial_append(&mut self) {
        let _ = self.file.set_len(self.current_offset);
    }
}

impl SlotBackend for FileBackend {
    type Iter<'a> = btree_map::Iter<'a, SlotAddress, StorageSlot>;

    fn contains(&self, address: &SlotAddress) -> bool {
        self.slots.contains_key(address)
    }

    fn load(&self, address: &SlotAddress) -> Option<&StorageSlot> {
        self.slots.get(address)
    }

    fn insert(&mut self, address: SlotAddress, slot: StorageSlot) -> StoreResult<()> {
        if self.slots.contains_key(&address) {
            return Err(StoreError::allocation_failed(format!(
                "address {} already in use",
                address
            )));
        }

        let entry = encode_entry(&address, &slot);

        if let Err(e) = self.file.write_all(&entry) {
            self.discard_partial_append();
            return Err(StoreError::io_error(
                format!("Failed to append slot {}", address),
                e,
            ));
        }

        // fsync - the slot does not exist until it is durable
        if let Err(e) = self.file.sync_all() {
            self.discard_partial_append();
            return Err(StoreError::io_error(
                format!("fsync failed after appending slot {}", address),
                e,
            ));
        }

        self.current_offset += entry.len() as u64;
        self.slots.insert(address, slot);

        Ok(())
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
    use tempfile::TempDir;

    #[test]
    fn test_reopen_replays_slots() {
        let tmp = TempDir::new().unwrap();
        let addr = Identity::new([8u8; 32]);

        {
            let mut backend = FileBackend::open(tmp.path()).unwrap();
            let mut slot = StorageSlot::allocate(program_id(), 5, 16);
            slot.data[0] = 0xAB;
            backend.insert(addr, slot).unwrap();
            assert!(backend.current_offset() > 0);
        }

        let backend = FileBackend::open(tmp.path()).unwrap();
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.load(&addr).unwrap().data[0], 0xAB);
        assert_eq!(backend.load(&addr).unwrap().lamports, 5);
    }

    #[test]
    fn test_empty_dir_opens_empty() {
        let tmp = TempDir::new().unwrap();
        let backend = FileBackend::open(tmp.path()).unwrap();
        assert!(backend.is_empty());
        assert!(backend.path().ends_with("data/slots.dat"));
    }

    #[test]
    fn test_truncated_tail_is_fatal() {
        let tmp = TempDir::new().unwrap();
        {
            let mut backend = FileBackend::open(tmp.path()).unwrap();
            backend
                .insert(Identity::new([1u8; 32]), StorageSlot::allocate(program_id(), 0, 8))
                .unwrap();
        }
        let path = tmp.path().join("data").join(SLOT_LOG_FILE);
        let mut contents = fs::read(&path).unwrap();
        contents.truncate(contents.len() - 3);
        fs::write(&path, contents).unwrap();

        let err = FileBackend::open(tmp.path()).err().unwrap();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_partial_append_is_discarded() {
        let tmp = TempDir::new().unwrap();
        let first = Identity::new([1u8; 32]);
        let second = Identity::new([2u8; 32]);

        {
            let mut backend = FileBackend::open(tmp.path()).unwrap();
            backend
                .insert(first, StorageSlot::allocate(program_id(), 0, 8))
                .unwrap();
            let end = backend.current_offset();

            // half an entry left behind by a write that failed midway
            let entry = encode_entry(&second, &StorageSlot::allocate(program_id(), 0, 8));
            backend.file.write_all(&entry[..entry.len() / 2]).unwrap();
            backend.discard_partial_append();

            assert_eq!(fs::metadata(backend.path()).unwrap().len(), end);
            assert_eq!(backend.current_offset(), end);

            backend
                .insert(second, StorageSlot::allocate(program_id(), 0, 8))
                .unwrap();
        }

        let backend = FileBackend::open(tmp.path()).unwrap();
        assert_eq!(backend.len(), 2);
        assert!(backend.contains(&first));
        assert!(backend.contains(&second));
    }
}
