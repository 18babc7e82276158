use std::collections::BTreeSet;

use crate::errors::CoreError;
use crate::models::record::numeric;
use crate::models::settings::Settings;
use crate::models::wallet::{Wallet, WalletSummary};

/// Converts between currencies using the fixed rates from [`Settings`].
///
/// There is no market data: every conversion goes through the display
/// currency with a constant rate, e.g. EUR → PLN is
/// `amount × rate(EUR) / rate(PLN)`.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Convert `amount` from one currency to another.
    pub fn convert(
        &self,
        settings: &Settings,
        amount: f64,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<f64, CoreError> {
        let from = from_currency.trim().to_uppercase();
        let to = to_currency.trim().to_uppercase();

        if from == to {
            return Ok(amount);
        }

        let from_rate = settings
            .rate_for(&from)
            .ok_or_else(|| CoreError::UnknownCurrency(from.clone()))?;
        let to_rate = settings
            .rate_for(&to)
            .ok_or_else(|| CoreError::UnknownCurrency(to.clone()))?;

        Ok(amount * from_rate / to_rate)
    }

    /// Convert `amount` into the display currency.
    pub fn to_display(
        &self,
        settings: &Settings,
        amount: f64,
        from_currency: &str,
    ) -> Result<f64, CoreError> {
        self.convert(settings, amount, from_currency, &settings.display_currency)
    }

    /// Total all wallets in the display currency.
    ///
    /// A wallet in a currency without a configured rate is still counted and
    /// listed under `by_currency`, but left out of `total_balance`.
    pub fn summarize_wallets(&self, settings: &Settings, wallets: &[Wallet]) -> WalletSummary {
        let mut summary = WalletSummary {
            currency: settings.display_currency.clone(),
            wallet_count: wallets.len(),
            ..WalletSummary::default()
        };
        let mut unconverted = BTreeSet::new();

        for wallet in wallets {
            let balance = numeric(wallet.balance);
            let code = wallet.currency.trim().to_uppercase();
            summary.by_currency.entry(code.clone()).or_default().add(balance);

            match self.to_display(settings, balance, &code) {
                Ok(value) => summary.total_balance += value,
                Err(e) => {
                    log::warn!("Wallet '{}' left out of the total: {e}", wallet.name);
                    unconverted.insert(code);
                }
            }
        }

        summary.unconverted_currencies = unconverted.into_iter().collect();
        summary
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}
