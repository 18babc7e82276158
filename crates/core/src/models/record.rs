use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of record stored in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Profit/loss of a trade
    Pnl,
    /// Money moved into the account
    Deposit,
    /// Money taken out of the account
    Withdrawal,
    /// A wallet balance snapshot
    Wallet,
}

impl RecordKind {
    /// Path segment used by the record API (`/owners/{owner}/{segment}`).
    pub fn path_segment(self) -> &'static str {
        match self {
            RecordKind::Pnl => "pnl",
            RecordKind::Deposit => "deposits",
            RecordKind::Withdrawal => "withdrawals",
            RecordKind::Wallet => "wallets",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Pnl => write!(f, "pnl"),
            RecordKind::Deposit => write!(f, "deposit"),
            RecordKind::Withdrawal => write!(f, "withdrawal"),
            RecordKind::Wallet => write!(f, "wallet"),
        }
    }
}

/// Read a stored numeric field. Missing and non-finite values count as 0.
pub fn numeric(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Like [`numeric`] but keeps "absent" distinguishable from zero.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// A grouping key is usable only if it contains something besides whitespace.
fn key(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|k| !k.is_empty())
}

/// The explicit profit/loss split carried by trade records.
///
/// Either side may be missing; the summarizer then falls back to the sign
/// of the record's net amount.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfitLoss {
    pub profit: Option<f64>,
    pub loss: Option<f64>,
}

impl ProfitLoss {
    /// Positive contribution of a record with net `amount`. Never negative:
    /// a stored negative profit counts as no profit.
    pub fn gain(&self, amount: f64) -> f64 {
        match self.profit {
            Some(profit) => profit.max(0.0),
            None => amount.max(0.0),
        }
    }

    /// Magnitude of the negative contribution of a record with net `amount`.
    pub fn drawdown(&self, amount: f64) -> f64 {
        match self.loss {
            Some(loss) => loss.abs(),
            None => (-amount).max(0.0),
        }
    }
}

/// Common shape of every ledger-like record the aggregation engine reduces.
pub trait FinancialRecord {
    fn id(&self) -> Uuid;

    fn owner_id(&self) -> &str;

    fn occurred_at(&self) -> NaiveDate;

    /// Signed net amount, 0 when the stored value is missing or malformed.
    fn amount(&self) -> f64;

    /// Profit/loss split, only for record types that carry one.
    fn profit_loss(&self) -> Option<ProfitLoss> {
        None
    }

    /// Key for the per-user grouping.
    fn user_key(&self) -> Option<&str>;

    /// Key for the per-symbol (or per-category) grouping.
    fn group_key(&self) -> Option<&str>;
}

/// A single trade result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlEntry {
    /// Unique identifier
    pub id: Uuid,

    /// Account that owns the entry
    pub owner_id: String,

    /// Display name of the trader, used for per-user grouping
    #[serde(default)]
    pub user_name: Option<String>,

    /// Traded instrument (e.g., "BTCUSDT", "AAPL")
    #[serde(default)]
    pub symbol: Option<String>,

    /// Net result of the trade; positive is a gain
    #[serde(default)]
    pub amount: Option<f64>,

    /// Gross profit, when recorded separately
    #[serde(default)]
    pub profit: Option<f64>,

    /// Gross loss as a non-negative magnitude, when recorded separately
    #[serde(default)]
    pub loss: Option<f64>,

    /// Day the trade was closed (daily granularity)
    pub occurred_at: NaiveDate,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl PnlEntry {
    pub fn new(owner_id: impl Into<String>, amount: f64, occurred_at: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            user_name: None,
            symbol: None,
            amount: Some(amount),
            profit: None,
            loss: None,
            occurred_at,
            label: None,
            notes: None,
        }
    }

    pub fn with_user(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into().to_uppercase());
        self
    }

    /// Attach an explicit profit/loss split.
    pub fn with_split(mut self, profit: Option<f64>, loss: Option<f64>) -> Self {
        self.profit = profit;
        self.loss = loss;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl FinancialRecord for PnlEntry {
    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn occurred_at(&self) -> NaiveDate {
        self.occurred_at
    }

    fn amount(&self) -> f64 {
        numeric(self.amount)
    }

    fn profit_loss(&self) -> Option<ProfitLoss> {
        Some(ProfitLoss {
            profit: finite(self.profit),
            loss: finite(self.loss),
        })
    }

    fn user_key(&self) -> Option<&str> {
        key(&self.user_name)
    }

    fn group_key(&self) -> Option<&str> {
        key(&self.symbol)
    }
}

/// Money moved into the trading account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: Uuid,

    pub owner_id: String,

    #[serde(default)]
    pub user_name: Option<String>,

    /// Deposited amount (non-negative)
    #[serde(default)]
    pub amount: Option<f64>,

    pub occurred_at: NaiveDate,

    /// Category or source (e.g., "salary", "bank transfer"), used for grouping
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

/// Money taken out of the trading account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub id: Uuid,

    pub owner_id: String,

    #[serde(default)]
    pub user_name: Option<String>,

    /// Withdrawn amount (non-negative)
    #[serde(default)]
    pub amount: Option<f64>,

    pub occurred_at: NaiveDate,

    /// Category or destination, used for grouping
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Deposit {
    pub fn new(owner_id: impl Into<String>, amount: f64, occurred_at: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            user_name: None,
            amount: Some(amount),
            occurred_at,
            label: None,
            notes: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_user(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }
}

impl Withdrawal {
    pub fn new(owner_id: impl Into<String>, amount: f64, occurred_at: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            user_name: None,
            amount: Some(amount),
            occurred_at,
            label: None,
            notes: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_user(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }
}

impl FinancialRecord for Deposit {
    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn occurred_at(&self) -> NaiveDate {
        self.occurred_at
    }

    fn amount(&self) -> f64 {
        numeric(self.amount)
    }

    fn user_key(&self) -> Option<&str> {
        key(&self.user_name)
    }

    fn group_key(&self) -> Option<&str> {
        key(&self.label)
    }
}

impl FinancialRecord for Withdrawal {
    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn occurred_at(&self) -> NaiveDate {
        self.occurred_at
    }

    fn amount(&self) -> f64 {
        numeric(self.amount)
    }

    fn user_key(&self) -> Option<&str> {
        key(&self.user_name)
    }

    fn group_key(&self) -> Option<&str> {
        key(&self.label)
    }
}
