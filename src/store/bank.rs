//! Lamport balances and rent-exemption pricing
//!
//! Allocating a slot locks up the rent-exempt minimum for its size,
//! debited from the payer. Balances persist as a JSON snapshot written
//! atomically (tmp file + rename).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use crate::identity::Identity;

/// Bank snapshot file name under `<data_dir>/data/`
pub const BANK_FILE: &str = "bank.json";

/// Per-slot bookkeeping bytes charged on top of the data size
pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;

/// Rent parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rent {
    pub lamports_per_byte_year: u64,
    pub exemption_threshold_years: u64,
}

impl Default for Rent {
    fn default() -> Self {
        Self {
            lamports_per_byte_year: 3480,
            exemption_threshold_years: 2,
        }
    }
}

impl Rent {
    /// Lamports a slot of `space` bytes must hold to be rent-exempt
    pub fn minimum_balance(&self, space: usize) -> u64 {
        (ACCOUNT_STORAGE_OVERHEAD + space as u64)
            .saturating_mul(self.lamports_per_byte_year)
            .saturating_mul(self.exemption_threshold_years)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BankSnapshot {
    balances: BTreeMap<Identity, u64>,
}

/// Lamport balances keyed by identity.
#[derive(Debug, Default)]
pub struct Bank {
    balances: BTreeMap<Identity, u64>,
    path: Option<PathBuf>,
}

impl Bank {
    /// Volatile bank with no balances
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the bank snapshot in `<data_dir>/data/`, empty if absent.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let data_subdir = data_dir.join("data");
        fs::create_dir_all(&data_subdir).map_err(|e| {
            StoreError::io_error(
                format!("Failed to create data directory: {}", data_subdir.display()),
                e,
            )
        })?;
        let path = data_subdir.join(BANK_FILE);

        let balances = if path.exists() {
            let content = fs::read(&path)
                .map_err(|e| StoreError::io_error("Failed to read bank snapshot", e))?;
            let snapshot: BankSnapshot = serde_json::from_slice(&content).map_err(|e| {
                StoreError::corruption(format!("Invalid bank snapshot: {}", e))
            })?;
            snapshot.balances
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            balances,
            path: Some(path),
        })
    }

    /// Balance of `owner`, zero if unknown
    pub fn balance(&self, owner: &Identity) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    /// Adds lamports to `owner`
    pub fn credit(&mut self, owner: &Identity, lamports: u64) -> StoreResult<u64> {
        let after = self.balance(owner).saturating_add(lamports);
        self.set_balance(owner, after)?;
        Ok(after)
    }

    /// Removes lamports from `owner`.
    ///
    /// # Errors
    ///
    /// `TWEET_ALLOCATION_FAILED` if the balance is insufficient. On any
    /// error the balance is left untouched.
    pub fn debit(&mut self, owner: &Identity, lamports: u64) -> StoreResult<u64> {
        let balance = self.balance(owner);
        if balance < lamports {
            return Err(StoreError::allocation_failed(format!(
                "insufficient funds: {} holds {} lamports, {} required",
                owner, balance, lamports
            )));
        }
        let after = balance - lamports;
        self.set_balance(owner, after)?;
        Ok(after)
    }

    /// Writes the snapshot with the new balance first; memory follows only
    /// once the snapshot is installed.
    fn set_balance(&mut self, owner: &Identity, lamports: u64) -> StoreResult<()> {
        let mut next = self.balances.clone();
        next.insert(*owner, lamports);
        self.persist(&next)?;
        self.balances = next;
        Ok(())
    }

    fn persist(&self, balances: &BTreeMap<Identity, u64>) -> StoreResult<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        let snapshot = BankSnapshot {
            balances: balances.clone(),
        };
        let data = serde_json::to_vec_pretty(&snapshot).map_err(|e| {
            StoreError::io_error("Failed to encode bank snapshot", std::io::Error::other(e))
        })?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, data)
            .map_err(|e| StoreError::io_error("Failed to write bank snapshot", e))?;
        fs::rename(&tmp_path, path)
            .map_err(|e| StoreError::io_error("Failed to install bank snapshot", e))?;
        Ok(())
    }
}
