//! HTTP client for the Supabase (PostgREST) REST interface.
//!
//! Wraps `reqwest` with the two headers PostgREST expects (`apikey` and a
//! bearer token) and typed row deserialization. Only the read path is
//! implemented; this core never writes.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::SupabaseError;
use crate::types::RawFeedbackRow;

/// Client for one Supabase project.
///
/// Use [`SupabaseClient::new`] with the project URL from configuration;
/// tests point it at a wiremock server instead.
pub struct SupabaseClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SupabaseClient {
    /// Creates a new client for the given project base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SupabaseError::InvalidUrl`] if
    /// `base_url` is not a valid URL.
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("vfd/0.1 (video-feedback-dashboard)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends path segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| SupabaseError::InvalidUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches every row of `table` with an unconditional `select=*`.
    ///
    /// No pagination, filtering, or ordering is pushed down — the caller
    /// filters client-side over the full set. Rows that fail typed
    /// deserialization individually degrade to an all-absent row rather
    /// than failing the whole fetch.
    ///
    /// # Errors
    ///
    /// - [`SupabaseError::Http`] on network failure or non-2xx status.
    /// - [`SupabaseError::Deserialize`] if the body is not a JSON array.
    pub async fn fetch_rows(&self, table: &str) -> Result<Vec<RawFeedbackRow>, SupabaseError> {
        let url = self.table_url(table)?;
        let response = self
            .client
            .get(url.clone())
            .query(&[("select", "*")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let rows: Vec<Value> =
            serde_json::from_str(&body).map_err(|e| SupabaseError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        Ok(rows
            .into_iter()
            .map(|row| serde_json::from_value::<RawFeedbackRow>(row).unwrap_or_default())
            .collect())
    }

    /// Builds the REST endpoint URL for a table: `{base}/rest/v1/{table}`.
    fn table_url(&self, table: &str) -> Result<Url, SupabaseError> {
        self.base_url
            .join(&format!("rest/v1/{table}"))
            .map_err(|e| SupabaseError::InvalidUrl(format!("table '{table}': {e}")))
    }
}
