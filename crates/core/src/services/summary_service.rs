use chrono::NaiveDate;

use crate::models::record::FinancialRecord;
use crate::models::summary::PeriodSummary;
use crate::models::window::{DateFilter, TimeWindow};

/// Reduces a record set into totals and per-user / per-symbol subtotals.
///
/// Pure business logic, no I/O. Works on any [`FinancialRecord`], so the
/// same reduction serves P&L entries, deposits and withdrawals.
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Summarize every record whose date passes `filter`.
    ///
    /// Records are reduced in `(date, id)` order, so the result does not
    /// depend on the order of `records`, down to the last floating-point bit.
    pub fn summarize<R: FinancialRecord>(
        &self,
        records: &[R],
        filter: &DateFilter,
    ) -> PeriodSummary {
        let mut included: Vec<&R> = records
            .iter()
            .filter(|r| filter.matches(r.occurred_at()))
            .collect();
        canonical_order(&mut included);

        let mut summary = PeriodSummary::default();
        for record in included {
            let amount = record.amount();
            summary.total_amount += amount;
            summary.count += 1;

            if let Some(split) = record.profit_loss() {
                summary.total_profit += split.gain(amount);
                summary.total_loss += split.drawdown(amount);
            }

            if let Some(user) = record.user_key() {
                summary.by_user.entry(user.to_string()).or_default().add(amount);
            }
            if let Some(symbol) = record.group_key() {
                summary.by_symbol.entry(symbol.to_string()).or_default().add(amount);
            }
        }
        summary
    }

    /// Summarize the records inside `window` (both ends inclusive).
    pub fn summarize_window<R: FinancialRecord>(
        &self,
        records: &[R],
        window: &TimeWindow,
    ) -> PeriodSummary {
        self.summarize(records, &DateFilter::Within(*window))
    }

    /// Summarize the records dated exactly `date`.
    pub fn summarize_day<R: FinancialRecord>(
        &self,
        records: &[R],
        date: NaiveDate,
    ) -> PeriodSummary {
        self.summarize(records, &DateFilter::On(date))
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort by date, id, amount, profit/loss contribution, then grouping keys.
///
/// Every reduction that must be order-independent walks records in this
/// order; the cumulative series relies on it to end on exactly the same
/// total as the summary. Records still equal after all keys contribute
/// identically, so their relative order cannot change any sum.
pub(crate) fn canonical_order<R: FinancialRecord>(records: &mut [&R]) {
    records.sort_by(|a, b| {
        let (a_gain, a_drawdown) = contribution(*a);
        let (b_gain, b_drawdown) = contribution(*b);
        a.occurred_at()
            .cmp(&b.occurred_at())
            .then_with(|| a.id().cmp(&b.id()))
            .then_with(|| a.amount().total_cmp(&b.amount()))
            .then_with(|| a.profit_loss().is_some().cmp(&b.profit_loss().is_some()))
            .then_with(|| a_gain.total_cmp(&b_gain))
            .then_with(|| a_drawdown.total_cmp(&b_drawdown))
            .then_with(|| a.user_key().cmp(&b.user_key()))
            .then_with(|| a.group_key().cmp(&b.group_key()))
    });
}

/// What a record adds to `total_profit` and `total_loss`.
fn contribution<R: FinancialRecord>(record: &R) -> (f64, f64) {
    let amount = record.amount();
    record
        .profit_loss()
        .map_or((0.0, 0.0), |split| (split.gain(amount), split.drawdown(amount)))
}
