//! Slot log entry format
//!
//! ```text
//! +------------------+
//! | Entry Length     | (u32 LE, includes this field and the checksum)
//! +------------------+
//! | Address          | (32 bytes)
//! +------------------+
//! | Owner            | (32 bytes)
//! +------------------+
//! | Lamports         | (u64 LE)
//! +------------------+
//! | Data             | (u32 LE length ‖ bytes)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32 over every preceding byte)
//! +------------------+
//! ```

use std::io;

use crc32fast::Hasher;

use super::slot::{SlotAddress, StorageSlot};
use crate::identity::Identity;

/// Smallest possible entry: length + address + owner + lamports + data length + checksum
pub const MIN_ENTRY_SIZE: usize = 4 + 32 + 32 + 8 + 4 + 4;

/// Computes a CRC32 checksum over the provided data.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Serializes one slot as a log entry.
pub fn encode_entry(address: &SlotAddress, slot: &StorageSlot) -> Vec<u8> {
    let entry_length = (MIN_ENTRY_SIZE + slot.data.len()) as u32;

    let mut buf = Vec::with_capacity(entry_length as usize);
    buf.extend_from_slice(&entry_length.to_le_bytes());
    buf.extend_from_slice(address.as_bytes());
    buf.extend_from_slice(slot.owner.as_bytes());
    buf.extend_from_slice(&slot.lamports.to_le_bytes());
    buf.extend_from_slice(&(slot.data.len() as u32).to_le_bytes());
    buf.extend_from_slice(&slot.data);

    let checksum = compute_checksum(&buf);
    buf.extend_from_slice(&checksum.to_le_bytes());
    buf
}

/// Deserializes one complete entry, verifying its checksum.
///
/// `data` must hold exactly the bytes announced by the entry length.
pub fn decode_entry(data: &[u8]) -> io::Result<(SlotAddress, StorageSlot)> {
    if data.len() < MIN_ENTRY_SIZE {
        return Err(invalid(format!("Entry too short: {} bytes", data.len())));
    }

    let entry_length = read_u32(data, 0) as usize;
    if entry_length != data.len() {
        return Err(invalid(format!(
            "Entry length {} does not match buffer of {} bytes",
            entry_length,
            data.len()
        )));
    }

    let checksum_offset = entry_length - 4;
    let stored = read_u32(data, checksum_offset);
    let computed = compute_checksum(&data[..checksum_offset]);
    if stored != computed {
        return Err(invalid(format!(
            "Checksum mismatch: computed {:08x}, stored {:08x}",
            computed, stored
        )));
    }

    let address = Identity::from_slice(&data[4..36]).map_err(|e| invalid(e.to_string()))?;
    let owner = Identity::from_slice(&data[36..68]).map_err(|e| invalid(e.to_string()))?;

    let mut lamports = [0u8; 8];
    lamports.copy_from_slice(&data[68..76]);
    let lamports = u64::from_le_bytes(lamports);

    let data_len = read_u32(data, 76) as usize;
    if 80 + data_len != checksum_offset {
        return Err(invalid(format!(
            "Slot data length {} disagrees with entry length {}",
            data_len, entry_length
        )));
    }

    Ok((
        address,
        StorageSlot {
            owner,
            lamports,
            data: data[80..checksum_offset].to_vec(),
        },
    ))
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::slot::program_id;

    fn sample() -> (SlotAddress, StorageSlot) {
        let mut slot = StorageSlot::allocate(program_id(), 10_467_840, 64);
        slot.data[..5].copy_from_slice(b"tweet");
        (Identity::new([2u8; 32]), slot)
    }

    #[test]
    fn test_entry_roundtrip() {
        let (addr, slot) = sample();
        let bytes = encode_entry(&addr, &slot);
        assert_eq!(bytes.len(), MIN_ENTRY_SIZE + 64);
        assert_eq!(decode_entry(&bytes).unwrap(), (addr, slot));
    }

    #[test]
    fn test_checksum_detects_corruption() {
        let (addr, slot) = sample();
        let mut bytes = encode_entry(&addr, &slot);
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        let err = decode_entry(&bytes).unwrap_err();
        assert!(err.to_string().contains("Checksum mismatch"));
    }

    #[test]
    fn test_checksum_deterministic() {
        assert_eq!(compute_checksum(b"slot"), compute_checksum(b"slot"));
        assert_ne!(compute_checksum(b"slot"), compute_checksum(b"slou"));
    }
}
