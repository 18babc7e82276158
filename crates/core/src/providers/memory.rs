use async_trait::async_trait;
use std::sync::RwLock;
use uuid::Uuid;

use super::traits::RecordStore;
use crate::errors::CoreError;
use crate::models::journal::Journal;
use crate::models::record::{Deposit, FinancialRecord, PnlEntry, RecordKind, Withdrawal};
use crate::models::wallet::Wallet;
use crate::models::window::DateFilter;
use crate::services::journal_service::JournalService;

/// Record store backed by an in-memory [`Journal`].
///
/// Used by tests and by builds without a record API. Reads clone out a
/// snapshot, so aggregation never holds the lock. Loaded journals are
/// re-sorted by date before use.
pub struct MemoryRecordStore {
    journal: RwLock<Journal>,
    journal_service: JournalService,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::from_journal(Journal::new())
    }

    pub fn from_journal(mut journal: Journal) -> Self {
        journal.sort_by_date();
        Self {
            journal: RwLock::new(journal),
            journal_service: JournalService::new(),
        }
    }

    /// Load a journal from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let journal: Journal = serde_json::from_str(json)?;
        Ok(Self::from_journal(journal))
    }

    /// A copy of the whole journal.
    pub fn snapshot(&self) -> Result<Journal, CoreError> {
        self.read(|journal| journal.clone())
    }

    pub fn add_pnl_entry(&self, entry: PnlEntry) -> Result<Uuid, CoreError> {
        self.write(|journal| self.journal_service.add_pnl_entry(journal, entry))
    }

    pub fn add_deposit(&self, deposit: Deposit) -> Result<Uuid, CoreError> {
        self.write(|journal| self.journal_service.add_deposit(journal, deposit))
    }

    pub fn add_withdrawal(&self, withdrawal: Withdrawal) -> Result<Uuid, CoreError> {
        self.write(|journal| self.journal_service.add_withdrawal(journal, withdrawal))
    }

    pub fn add_wallet(&self, wallet: Wallet) -> Result<Uuid, CoreError> {
        self.write(|journal| self.journal_service.add_wallet(journal, wallet))
    }

    pub fn remove(&self, kind: RecordKind, id: Uuid) -> Result<(), CoreError> {
        self.write(|journal| self.journal_service.remove(journal, kind, id))
    }

    fn read<T>(&self, f: impl FnOnce(&Journal) -> T) -> Result<T, CoreError> {
        let guard = self.journal.read().map_err(|_| CoreError::Fetch {
            kind: "journal".into(),
            message: "journal lock poisoned".into(),
        })?;
        Ok(f(&guard))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut Journal) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut guard = self.journal.write().map_err(|_| CoreError::Fetch {
            kind: "journal".into(),
            message: "journal lock poisoned".into(),
        })?;
        f(&mut guard)
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Records of `owner_id` that pass `filter`.
fn select<R: FinancialRecord + Clone>(records: &[R], owner_id: &str, filter: DateFilter) -> Vec<R> {
    records
        .iter()
        .filter(|r| r.owner_id() == owner_id && filter.matches(r.occurred_at()))
        .cloned()
        .collect()
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RecordStore for MemoryRecordStore {
    fn name(&self) -> &str {
        "Memory"
    }

    async fn list_pnl_entries(
        &self,
        owner_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<PnlEntry>, CoreError> {
        self.read(|journal| select(&journal.pnl_entries, owner_id, filter))
    }

    async fn list_deposits(
        &self,
        owner_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<Deposit>, CoreError> {
        self.read(|journal| select(&journal.deposits, owner_id, filter))
    }

    async fn list_withdrawals(
        &self,
        owner_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<Withdrawal>, CoreError> {
        self.read(|journal| select(&journal.withdrawals, owner_id, filter))
    }

    async fn list_wallets(&self, owner_id: &str) -> Result<Vec<Wallet>, CoreError> {
        self.read(|journal| {
            journal
                .wallets
                .iter()
                .filter(|w| w.owner_id == owner_id)
                .cloned()
                .collect()
        })
    }
}
