use serde::{Deserialize, Serialize};

/// Consolidated all-time figures for one owner, shown on the dashboard.
///
/// `Default` is the all-zero summary returned whenever any upstream fetch
/// fails. A zeroed summary therefore means "no data OR fetch failure";
/// callers that must tell the two apart should use
/// `DashboardService::try_unified_summary`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Sum of deposit amounts
    pub total_deposits: f64,

    /// Sum of withdrawal amounts
    pub total_withdrawals: f64,

    /// Number of P&L entries
    pub total_trades: usize,

    /// Sum of the entries' `profit` fields (missing counts as 0)
    pub total_profit: f64,

    /// Sum of the entries' `loss` fields as stored (missing counts as 0)
    pub total_loss: f64,
}

impl DashboardSummary {
    /// Deposits minus withdrawals.
    pub fn net_flow(&self) -> f64 {
        self.total_deposits - self.total_withdrawals
    }

    /// Profit minus loss.
    pub fn net_pnl(&self) -> f64 {
        self.total_profit - self.total_loss
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}
