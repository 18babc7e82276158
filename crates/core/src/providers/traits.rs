use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::record::{Deposit, PnlEntry, Withdrawal};
use crate::models::wallet::Wallet;
use crate::models::window::DateFilter;

/// Trait abstraction over wherever the journal's records are persisted.
///
/// The aggregation engine only reads. Each implementation returns the
/// records of one owner, restricted by an optional date filter. The engine
/// re-applies the filter itself, so a store may return a superset.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RecordStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    async fn list_pnl_entries(
        &self,
        owner_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<PnlEntry>, CoreError>;

    async fn list_deposits(
        &self,
        owner_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<Deposit>, CoreError>;

    async fn list_withdrawals(
        &self,
        owner_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<Withdrawal>, CoreError>;

    /// Wallets carry no date; they are listed whole.
    async fn list_wallets(&self, owner_id: &str) -> Result<Vec<Wallet>, CoreError>;
}
