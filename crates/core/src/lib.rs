pub mod clock;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use std::sync::Arc;

use clock::{Clock, SystemClock};
use errors::CoreError;
use models::{
    dashboard::DashboardSummary,
    record::RecordKind,
    series::SeriesPoint,
    settings::Settings,
    summary::PeriodSummary,
    wallet::WalletSummary,
    window::{DateFilter, TimeWindow, WindowToken},
};
use providers::{http::HttpRecordStore, memory::MemoryRecordStore, traits::RecordStore};
use services::{
    chart_service::ChartService, currency_service::CurrencyService,
    dashboard_service::DashboardService, summary_service::SummaryService,
    window_service::WindowService,
};

/// Main entry point for the trading journal core library.
///
/// Reads records through a [`RecordStore`] and turns them into the
/// summaries and chart series the dashboard renders. Nothing computed here
/// is stored: every call fetches and aggregates afresh.
#[must_use]
pub struct TradeJournal {
    store: Arc<dyn RecordStore>,
    settings: Settings,
    clock: Arc<dyn Clock>,
    window_service: WindowService,
    summary_service: SummaryService,
    chart_service: ChartService,
    dashboard_service: DashboardService,
    currency_service: CurrencyService,
}

impl std::fmt::Debug for TradeJournal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradeJournal")
            .field("store", &self.store.name())
            .field("settings", &self.settings)
            .field("today", &self.clock.today())
            .finish()
    }
}

impl TradeJournal {
    /// Create a journal over `store`, anchored to the system clock.
    pub fn new(store: Arc<dyn RecordStore>, settings: Settings) -> Self {
        Self::with_clock(store, settings, Arc::new(SystemClock))
    }

    /// Create a journal with an explicit source of "today".
    pub fn with_clock(
        store: Arc<dyn RecordStore>,
        settings: Settings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            settings,
            clock,
            window_service: WindowService::new(),
            summary_service: SummaryService::new(),
            chart_service: ChartService::new(),
            dashboard_service: DashboardService::new(),
            currency_service: CurrencyService::new(),
        }
    }

    /// Build the store the settings ask for: the record API when
    /// `record_api_url` is set, an empty in-memory journal otherwise.
    pub fn from_settings(settings: Settings) -> Result<Self, CoreError> {
        let store: Arc<dyn RecordStore> = match settings.record_api_url.as_deref() {
            Some(url) => Arc::new(HttpRecordStore::new(url)?),
            None => Arc::new(MemoryRecordStore::new()),
        };
        Ok(Self::new(store, settings))
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ── Windows ─────────────────────────────────────────────────────

    /// Resolve a window token against today. `None` uses the default window
    /// from settings; unknown tokens resolve like "1M".
    #[must_use]
    pub fn resolve_window(&self, token: Option<&str>) -> TimeWindow {
        let token = token.map_or(self.settings.default_window, WindowToken::parse);
        self.window_service.resolve_token(token, self.today())
    }

    // ── Summaries ───────────────────────────────────────────────────

    /// Totals and per-user / per-symbol subtotals of one record kind over a window.
    pub async fn summarize(
        &self,
        owner_id: &str,
        kind: RecordKind,
        token: Option<&str>,
    ) -> Result<PeriodSummary, CoreError> {
        let window = self.resolve_window(token);
        self.summarize_filtered(owner_id, kind, DateFilter::Within(window))
            .await
    }

    /// Totals of one record kind on a single day.
    pub async fn daily_summary(
        &self,
        owner_id: &str,
        kind: RecordKind,
        date: NaiveDate,
    ) -> Result<PeriodSummary, CoreError> {
        self.summarize_filtered(owner_id, kind, DateFilter::On(date))
            .await
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Day-by-day running total of one record kind over a window.
    pub async fn cumulative_series(
        &self,
        owner_id: &str,
        kind: RecordKind,
        token: Option<&str>,
    ) -> Result<Vec<SeriesPoint>, CoreError> {
        let window = self.resolve_window(token);
        let filter = DateFilter::Within(window);
        let store = self.store.as_ref();

        let series = match kind {
            RecordKind::Pnl => {
                let records = store.list_pnl_entries(owner_id, filter).await?;
                self.chart_service.build_cumulative_series(&records, &window)
            }
            RecordKind::Deposit => {
                let records = store.list_deposits(owner_id, filter).await?;
                self.chart_service.build_cumulative_series(&records, &window)
            }
            RecordKind::Withdrawal => {
                let records = store.list_withdrawals(owner_id, filter).await?;
                self.chart_service.build_cumulative_series(&records, &window)
            }
            RecordKind::Wallet => return Err(undated(kind)),
        };
        Ok(series)
    }

    // ── Dashboard ───────────────────────────────────────────────────

    /// All-time dashboard figures. Never fails: any fetch failure yields
    /// an all-zero summary (see [`DashboardService::get_unified_summary`]).
    pub async fn unified_summary(&self, owner_id: &str) -> DashboardSummary {
        self.dashboard_service
            .get_unified_summary(self.store.as_ref(), owner_id)
            .await
    }

    /// Like [`Self::unified_summary`] but surfaces the fetch error.
    pub async fn try_unified_summary(&self, owner_id: &str) -> Result<DashboardSummary, CoreError> {
        self.dashboard_service
            .try_unified_summary(self.store.as_ref(), owner_id)
            .await
    }

    /// Wallet balances totalled in the display currency.
    pub async fn wallet_summary(&self, owner_id: &str) -> Result<WalletSummary, CoreError> {
        let wallets = self.store.list_wallets(owner_id).await?;
        Ok(self.currency_service.summarize_wallets(&self.settings, &wallets))
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_default_window(&mut self, token: WindowToken) {
        self.settings.default_window = token;
    }

    /// Set the fixed rate for a currency, in units of the display currency.
    pub fn set_exchange_rate(&mut self, currency: &str, rate: f64) -> Result<(), CoreError> {
        self.settings.set_exchange_rate(currency, rate)
    }

    pub fn set_display_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        self.settings.set_display_currency(currency)
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn summarize_filtered(
        &self,
        owner_id: &str,
        kind: RecordKind,
        filter: DateFilter,
    ) -> Result<PeriodSummary, CoreError> {
        let store = self.store.as_ref();
        let summary = match kind {
            RecordKind::Pnl => {
                let records = store.list_pnl_entries(owner_id, filter).await?;
                self.summary_service.summarize(&records, &filter)
            }
            RecordKind::Deposit => {
                let records = store.list_deposits(owner_id, filter).await?;
                self.summary_service.summarize(&records, &filter)
            }
            RecordKind::Withdrawal => {
                let records = store.list_withdrawals(owner_id, filter).await?;
                self.summary_service.summarize(&records, &filter)
            }
            RecordKind::Wallet => return Err(undated(kind)),
        };
        Ok(summary)
    }
}

fn undated(kind: RecordKind) -> CoreError {
    CoreError::ValidationError(format!(
        "{kind} records carry no date and cannot be aggregated over time"
    ))
}
