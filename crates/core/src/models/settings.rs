use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::window::WindowToken;
use crate::errors::CoreError;

/// User-configurable settings for the journal core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The currency in which wallet totals are displayed (e.g., "USD", "EUR").
    pub display_currency: String,

    /// Window used when a caller does not pick one.
    pub default_window: WindowToken,

    /// Fixed exchange rates: units of `display_currency` per one unit of
    /// the keyed currency. The display currency itself is always 1.0.
    pub exchange_rates: HashMap<String, f64>,

    /// Base URL of the remote record API, if records live on a server.
    pub record_api_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_currency: "USD".to_string(),
            default_window: WindowToken::default(),
            exchange_rates: HashMap::from([("USD".to_string(), 1.0)]),
            record_api_url: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.normalize();
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    /// Set the fixed rate for `currency` (units of display currency per unit).
    pub fn set_exchange_rate(&mut self, currency: &str, rate: f64) -> Result<(), CoreError> {
        let code = currency.trim().to_uppercase();
        validate_currency_code(&code)?;
        validate_rate(&code, rate)?;
        self.exchange_rates.insert(code, rate);
        Ok(())
    }

    /// Switch the display currency. Existing rates are kept as they are and
    /// must be re-entered relative to the new currency.
    pub fn set_display_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let code = currency.trim().to_uppercase();
        validate_currency_code(&code)?;
        self.exchange_rates.insert(code.clone(), 1.0);
        self.display_currency = code;
        Ok(())
    }

    /// Rate for converting one unit of `currency` into the display currency.
    pub fn rate_for(&self, currency: &str) -> Option<f64> {
        let code = currency.trim().to_uppercase();
        if code == self.display_currency {
            return Some(1.0);
        }
        self.exchange_rates.get(&code).copied()
    }

    /// Uppercase every currency code so lookups are case-insensitive.
    fn normalize(&mut self) {
        self.display_currency = self.display_currency.trim().to_uppercase();
        self.exchange_rates = self
            .exchange_rates
            .drain()
            .map(|(code, rate)| (code.trim().to_uppercase(), rate))
            .collect();
    }

    fn validate(&self) -> Result<(), CoreError> {
        validate_currency_code(&self.display_currency)?;
        for (code, rate) in &self.exchange_rates {
            validate_currency_code(code)?;
            validate_rate(code, *rate)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_currency_code(code: &str) -> Result<(), CoreError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::ValidationError(format!(
            "Invalid currency code '{code}': must be exactly 3 ASCII letters (e.g., USD, EUR, PLN)"
        )));
    }
    Ok(())
}

pub(crate) fn validate_rate(code: &str, rate: f64) -> Result<(), CoreError> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(CoreError::ValidationError(format!(
            "Exchange rate for {code} must be a positive number, got {rate}"
        )));
    }
    Ok(())
}
