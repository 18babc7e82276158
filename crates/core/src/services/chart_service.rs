use crate::models::record::FinancialRecord;
use crate::models::series::SeriesPoint;
use crate::models::window::TimeWindow;
use crate::services::summary_service::canonical_order;

/// Generates chart-ready data sets from journal records.
///
/// The core computes all the numbers; the frontend only renders.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Build a day-by-day running total over `window`.
    ///
    /// One point per calendar day from `start` to `end` inclusive, no gaps.
    /// The running total starts at 0 on the window start: records dated
    /// before `start` are ignored, not carried in as an opening balance.
    /// An empty record set still yields a fully populated all-zero axis.
    ///
    /// Records are sorted once and consumed with a running pointer:
    /// O(days + records) after the sort instead of O(days × records).
    pub fn build_cumulative_series<R: FinancialRecord>(
        &self,
        records: &[R],
        window: &TimeWindow,
    ) -> Vec<SeriesPoint> {
        let mut in_window: Vec<&R> = records
            .iter()
            .filter(|r| window.contains(r.occurred_at()))
            .collect();
        canonical_order(&mut in_window);

        let mut pending = in_window.into_iter().peekable();
        let mut running = 0.0;
        let mut series = Vec::with_capacity(window.day_count());

        for day in window.days() {
            while let Some(record) = pending.next_if(|r| r.occurred_at() <= day) {
                running += record.amount();
            }
            series.push(SeriesPoint {
                date: day,
                cumulative_amount: running,
            });
        }

        series
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
