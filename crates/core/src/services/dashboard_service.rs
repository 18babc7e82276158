use crate::errors::CoreError;
use crate::models::dashboard::DashboardSummary;
use crate::models::record::{numeric, Deposit, FinancialRecord, PnlEntry, RecordKind, Withdrawal};
use crate::models::window::DateFilter;
use crate::providers::traits::RecordStore;

/// Builds the all-time dashboard summary of one owner.
///
/// Deposits, withdrawals and P&L entries are fetched concurrently. The
/// result is all-or-nothing: if any fetch fails, `get_unified_summary`
/// returns a zeroed summary instead of mixing real and missing figures.
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    /// Summary for the dashboard widget. Never fails.
    ///
    /// Any upstream failure is logged and turned into
    /// `DashboardSummary::default()`. A zeroed result can therefore hide an
    /// outage; use [`Self::try_unified_summary`] to see the error.
    pub async fn get_unified_summary(
        &self,
        store: &dyn RecordStore,
        owner_id: &str,
    ) -> DashboardSummary {
        match self.try_unified_summary(store, owner_id).await {
            Ok(summary) => summary,
            Err(e) => {
                log::warn!(
                    "Dashboard summary for owner {owner_id} falls back to zeros ({}): {e}",
                    store.name()
                );
                DashboardSummary::default()
            }
        }
    }

    /// Same computation as [`Self::get_unified_summary`] but returns the
    /// first fetch error instead of zeros.
    ///
    /// All three fetches always run to completion before the result is
    /// decided.
    pub async fn try_unified_summary(
        &self,
        store: &dyn RecordStore,
        owner_id: &str,
    ) -> Result<DashboardSummary, CoreError> {
        let (deposits, withdrawals, entries) = futures::join!(
            store.list_deposits(owner_id, DateFilter::All),
            store.list_withdrawals(owner_id, DateFilter::All),
            store.list_pnl_entries(owner_id, DateFilter::All),
        );
        combine(deposits, withdrawals, entries)
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}

/// All-or-nothing reducer over the three fetch results.
///
/// `total_profit` and `total_loss` add the stored `profit` / `loss` fields
/// as they are. Unlike `SummaryService`, no sign handling or fallback to the
/// net amount happens here: `loss` is expected to already be a magnitude.
pub fn combine(
    deposits: Result<Vec<Deposit>, CoreError>,
    withdrawals: Result<Vec<Withdrawal>, CoreError>,
    entries: Result<Vec<PnlEntry>, CoreError>,
) -> Result<DashboardSummary, CoreError> {
    // Convert (and log) every failure before bailing out on the first one.
    let deposits = deposits.map_err(|e| fetch_failed(RecordKind::Deposit, e));
    let withdrawals = withdrawals.map_err(|e| fetch_failed(RecordKind::Withdrawal, e));
    let entries = entries.map_err(|e| fetch_failed(RecordKind::Pnl, e));

    let deposits = deposits?;
    let withdrawals = withdrawals?;
    let entries = entries?;

    Ok(DashboardSummary {
        total_deposits: deposits.iter().map(FinancialRecord::amount).sum(),
        total_withdrawals: withdrawals.iter().map(FinancialRecord::amount).sum(),
        total_trades: entries.len(),
        total_profit: entries.iter().map(|e| numeric(e.profit)).sum(),
        total_loss: entries.iter().map(|e| numeric(e.loss)).sum(),
    })
}

fn fetch_failed(kind: RecordKind, e: CoreError) -> CoreError {
    log::warn!("Fetching {kind} records for the dashboard failed: {e}");
    match e {
        CoreError::Fetch { .. } => e,
        other => CoreError::Fetch {
            kind: kind.to_string(),
            message: other.to_string(),
        },
    }
}
