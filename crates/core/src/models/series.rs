use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single data point for cumulative chart rendering.
///
/// The core generates these and the frontend just renders them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// The calendar day for this data point
    pub date: NaiveDate,

    /// Running total of amounts from the window start up to and including `date`
    pub cumulative_amount: f64,
}
