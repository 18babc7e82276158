use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Named trailing period selectable from the dashboard.
///
/// Every token maps to a fixed number of calendar days. Months and years are
/// NOT calendar-aware: "1M" is always 30 days and "1Y" always 365, so all
/// tokens behave the same way around month ends and leap years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WindowToken {
    /// "1W": 7 days
    OneWeek,
    /// "1M": 30 days (also the fallback for unknown tokens)
    #[default]
    OneMonth,
    /// "6M": 180 days
    SixMonths,
    /// "1Y": 365 days
    OneYear,
    /// "5Y": 1825 days
    FiveYears,
}

impl WindowToken {
    pub const ALL: [WindowToken; 5] = [
        WindowToken::OneWeek,
        WindowToken::OneMonth,
        WindowToken::SixMonths,
        WindowToken::OneYear,
        WindowToken::FiveYears,
    ];

    /// Parse a token. Total: anything unrecognized falls back to `OneMonth`.
    /// Surrounding whitespace and letter case are ignored.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_uppercase().as_str() {
            "1W" => WindowToken::OneWeek,
            "1M" => WindowToken::OneMonth,
            "6M" => WindowToken::SixMonths,
            "1Y" => WindowToken::OneYear,
            "5Y" => WindowToken::FiveYears,
            _ => WindowToken::default(),
        }
    }

    /// Number of days subtracted from "today" to get the window start.
    pub fn days(self) -> u64 {
        match self {
            WindowToken::OneWeek => 7,
            WindowToken::OneMonth => 30,
            WindowToken::SixMonths => 180,
            WindowToken::OneYear => 365,
            WindowToken::FiveYears => 1825,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WindowToken::OneWeek => "1W",
            WindowToken::OneMonth => "1M",
            WindowToken::SixMonths => "6M",
            WindowToken::OneYear => "1Y",
            WindowToken::FiveYears => "5Y",
        }
    }
}

impl std::fmt::Display for WindowToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for WindowToken {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl From<String> for WindowToken {
    fn from(token: String) -> Self {
        Self::parse(&token)
    }
}

impl From<WindowToken> for String {
    fn from(token: WindowToken) -> Self {
        token.as_str().to_string()
    }
}

/// An inclusive range of calendar days `[start, end]`.
///
/// Always satisfies `start <= end`: the constructor and deserializer swap
/// reversed bounds instead of rejecting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawWindow")]
pub struct TimeWindow {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl From<RawWindow> for TimeWindow {
    fn from(raw: RawWindow) -> Self {
        TimeWindow::new(raw.start, raw.end)
    }
}

impl TimeWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// The window that ends on `end` and starts `days` calendar days earlier.
    /// Saturates at the earliest representable date.
    pub fn trailing(end: NaiveDate, days: u64) -> Self {
        let start = end.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// A window covering exactly one day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `true` if `date` falls inside the window, both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, both endpoints included.
    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Every day from `start` to `end`, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.day_count())
    }
}

/// Date restriction applied to a record query or a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFilter {
    /// No restriction
    #[default]
    All,
    /// Exactly this calendar day
    On(NaiveDate),
    /// Inside the window, both ends inclusive
    Within(TimeWindow),
}

impl DateFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            DateFilter::All => true,
            DateFilter::On(day) => date == *day,
            DateFilter::Within(window) => window.contains(date),
        }
    }
}

impl From<TimeWindow> for DateFilter {
    fn from(window: TimeWindow) -> Self {
        DateFilter::Within(window)
    }
}

impl From<NaiveDate> for DateFilter {
    fn from(date: NaiveDate) -> Self {
        DateFilter::On(date)
    }
}
