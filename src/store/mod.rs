//! Record store and query surface
//!
//! The store owns the address → slot mapping. It allocates one fixed-size
//! slot per tweet, funds it from the payer's balance, writes the encoded
//! record, and serves point reads and offset-filtered scans.
//!
//! # Design Principles
//!
//! - Write-once slots (no update, no delete)
//! - Fixed slot capacity, so field offsets are stable across records
//! - Scans compare raw bytes; no secondary index
//! - Corruption is surfaced, never skipped
//!
//! The store handle is passed explicitly; there is no global slot set.

mod backend;
mod bank;
mod errors;
mod file;
mod filter;
mod slot;
mod slot_log;
mod store;

pub use backend::{MemoryBackend, SlotBackend};
pub use bank::{Bank, Rent, ACCOUNT_STORAGE_OVERHEAD, BANK_FILE};
pub use errors::{Severity, StoreError, StoreErrorCode, StoreResult};
pub use file::{FileBackend, SLOT_LOG_FILE};
pub use filter::Memcmp;
pub use slot::{program_id, SlotAddress, StorageSlot};
pub use slot_log::compute_checksum;
pub use store::{RecordStore, Scan};
