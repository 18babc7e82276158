use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Subtotal of one group (a user or a symbol) inside a larger aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedTotal {
    pub sum: f64,
    pub count: usize,
}

impl GroupedTotal {
    pub fn add(&mut self, amount: f64) {
        self.sum += amount;
        self.count += 1;
    }
}

/// Totals of a record set restricted to a day or a window.
///
/// `total_profit` and `total_loss` stay at 0 for record types without a
/// profit/loss split (deposits, withdrawals).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    /// Sum of signed amounts
    pub total_amount: f64,

    /// Sum of positive contributions
    pub total_profit: f64,

    /// Sum of the magnitudes of negative contributions
    pub total_loss: f64,

    /// Number of records that passed the date filter
    pub count: usize,

    /// Subtotals per user; records without a user name are left out
    pub by_user: BTreeMap<String, GroupedTotal>,

    /// Subtotals per symbol or category; records without one are left out
    pub by_symbol: BTreeMap<String, GroupedTotal>,
}

impl PeriodSummary {
    /// Mean signed amount per record, 0 for an empty summary.
    pub fn average_amount(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_amount / self.count as f64
        }
    }

    /// Profit minus loss.
    pub fn net(&self) -> f64 {
        self.total_profit - self.total_loss
    }
}
