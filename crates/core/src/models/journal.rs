use serde::{Deserialize, Serialize};

use super::record::{Deposit, PnlEntry, Withdrawal};
use super::wallet::Wallet;

/// The in-memory record set behind `MemoryRecordStore`.
///
/// Holds every owner's records; queries filter by owner. The dated lists
/// are kept sorted by date, oldest first (see [`Journal::sort_by_date`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    #[serde(default)]
    pub pnl_entries: Vec<PnlEntry>,

    #[serde(default)]
    pub deposits: Vec<Deposit>,

    #[serde(default)]
    pub withdrawals: Vec<Withdrawal>,

    #[serde(default)]
    pub wallets: Vec<Wallet>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records of every kind.
    pub fn len(&self) -> usize {
        self.pnl_entries.len() + self.deposits.len() + self.withdrawals.len() + self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Restore date order on the dated lists, e.g. after loading records
    /// written by another tool. Equal dates keep their relative order.
    pub fn sort_by_date(&mut self) {
        self.pnl_entries.sort_by_key(|e| e.occurred_at);
        self.deposits.sort_by_key(|d| d.occurred_at);
        self.withdrawals.sort_by_key(|w| w.occurred_at);
    }
}
