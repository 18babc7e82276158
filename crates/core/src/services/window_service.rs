use chrono::NaiveDate;

use crate::models::window::{TimeWindow, WindowToken};

/// Maps window tokens ("1W", "1M", ...) to concrete date ranges.
///
/// Pure: "today" is always passed in, never read from the system clock.
pub struct WindowService;

impl WindowService {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a raw token. Unknown tokens resolve like "1M".
    pub fn resolve(&self, token: &str, today: NaiveDate) -> TimeWindow {
        self.resolve_token(WindowToken::parse(token), today)
    }

    /// The window `[today - token.days(), today]`.
    pub fn resolve_token(&self, token: WindowToken, today: NaiveDate) -> TimeWindow {
        let window = TimeWindow::trailing(today, token.days());
        log::debug!(
            "Resolved window {token} to {}..={}",
            window.start(),
            window.end()
        );
        window
    }
}

impl Default for WindowService {
    fn default() -> Self {
        Self::new()
    }
}
