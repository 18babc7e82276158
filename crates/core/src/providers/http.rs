use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::RecordStore;
use crate::errors::CoreError;
use crate::models::record::{Deposit, PnlEntry, RecordKind, Withdrawal};
use crate::models::wallet::Wallet;
use crate::models::window::DateFilter;

const SOURCE_NAME: &str = "RecordApi";

/// Record store that reads from the journal's REST backend.
///
/// - **Endpoints**: `GET {base}/owners/{owner}/{pnl|deposits|withdrawals|wallets}`
/// - **Date filter**: `?date=YYYY-MM-DD` for a single day,
///   `?from=YYYY-MM-DD&to=YYYY-MM-DD` for a window, nothing for all records.
/// - **Response**: a JSON array of records.
pub struct HttpRecordStore {
    client: Client,
    base_url: Url,
}

impl HttpRecordStore {
    pub fn new(base_url: &str) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            CoreError::ValidationError(format!("Invalid record API url '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::ValidationError(format!(
                "Record API url '{base_url}' cannot be used as a base"
            )));
        }

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Ok(Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url,
        })
    }

    /// Full request URL for one owner, record kind and date filter.
    pub fn endpoint_url(
        &self,
        owner_id: &str,
        kind: RecordKind,
        filter: DateFilter,
    ) -> Result<Url, CoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CoreError::ValidationError("Record API url has no path".into()))?
            .pop_if_empty()
            .push("owners")
            .push(owner_id)
            .push(kind.path_segment());

        match filter {
            DateFilter::All => {}
            DateFilter::On(date) => {
                url.query_pairs_mut()
                    .append_pair("date", &date.format("%Y-%m-%d").to_string());
            }
            DateFilter::Within(window) => {
                url.query_pairs_mut()
                    .append_pair("from", &window.start().format("%Y-%m-%d").to_string())
                    .append_pair("to", &window.end().format("%Y-%m-%d").to_string());
            }
        }
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        owner_id: &str,
        kind: RecordKind,
        filter: DateFilter,
    ) -> Result<Vec<T>, CoreError> {
        let url = self.endpoint_url(owner_id, kind, filter)?;
        log::debug!("Fetching {kind} records for owner {owner_id} ({filter:?})");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                source_name: SOURCE_NAME.into(),
                message: format!("HTTP {status} while listing {kind} records"),
            });
        }

        resp.json().await.map_err(|e| CoreError::Api {
            source_name: SOURCE_NAME.into(),
            message: format!("Failed to parse {kind} records: {e}"),
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RecordStore for HttpRecordStore {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn list_pnl_entries(
        &self,
        owner_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<PnlEntry>, CoreError> {
        self.fetch(owner_id, RecordKind::Pnl, filter).await
    }

    async fn list_deposits(
        &self,
        owner_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<Deposit>, CoreError> {
        self.fetch(owner_id, RecordKind::Deposit, filter).await
    }

    async fn list_withdrawals(
        &self,
        owner_id: &str,
        filter: DateFilter,
    ) -> Result<Vec<Withdrawal>, CoreError> {
        self.fetch(owner_id, RecordKind::Withdrawal, filter).await
    }

    async fn list_wallets(&self, owner_id: &str) -> Result<Vec<Wallet>, CoreError> {
        self.fetch(owner_id, RecordKind::Wallet, DateFilter::All).await
    }
}
