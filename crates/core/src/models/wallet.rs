use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::summary::GroupedTotal;

/// A wallet (exchange account, bank account, cold storage...) and its
/// last recorded balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: Uuid,

    pub owner_id: String,

    /// Display name (e.g., "Binance spot", "Savings")
    pub name: String,

    /// Balance in `currency`; missing counts as 0
    #[serde(default)]
    pub balance: Option<f64>,

    /// ISO-style 3-letter currency code, uppercased
    pub currency: String,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Wallet {
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        balance: f64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            name: name.into(),
            balance: Some(balance),
            currency: currency.into().trim().to_uppercase(),
            notes: None,
        }
    }
}

/// All wallets of an owner, converted into the display currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    /// Currency `total_balance` is expressed in
    pub currency: String,

    /// Sum of all convertible balances in `currency`
    pub total_balance: f64,

    /// Number of wallets, including those that could not be converted
    pub wallet_count: usize,

    /// Unconverted balances per wallet currency
    pub by_currency: BTreeMap<String, GroupedTotal>,

    /// Currencies that had no configured exchange rate
    pub unconverted_currencies: Vec<String>,
}
