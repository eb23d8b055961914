//! Fail-soft snapshot production.

use vfd_core::{AppConfig, Snapshot};

use crate::client::SupabaseClient;
use crate::normalize::normalize_row;

/// Fetches and normalizes the full feedback table.
///
/// `fetch_all` never returns an error: an unconfigured backend, a network
/// failure, or a malformed response all yield an empty [`Snapshot`] whose
/// origin says why. The dashboard treats "no data" uniformly; the cause
/// only changes the message it shows.
pub struct Loader {
    client: Option<SupabaseClient>,
    table: String,
}

impl Loader {
    /// Builds a loader from configuration.
    ///
    /// A missing backend section or a client-construction failure both
    /// produce a loader that serves unconfigured snapshots — startup is
    /// never blocked on credentials.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let client = config.backend.as_ref().and_then(|backend| {
            match SupabaseClient::new(&backend.url, &backend.key, config.fetch_timeout_secs) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!(error = %e, "backend client construction failed; serving empty snapshots");
                    None
                }
            }
        });
        Self {
            client,
            table: config.feedback_table.clone(),
        }
    }

    /// Builds a loader around an existing client (tests point this at
    /// wiremock).
    #[must_use]
    pub fn new(client: Option<SupabaseClient>, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Fetches every row and normalizes each one independently.
    pub async fn fetch_all(&self) -> Snapshot {
        let Some(client) = &self.client else {
            tracing::warn!("no backend configured; serving empty snapshot");
            return Snapshot::unconfigured();
        };

        match client.fetch_rows(&self.table).await {
            Ok(rows) => {
                let records = rows.into_iter().map(normalize_row).collect::<Vec<_>>();
                tracing::info!(table = %self.table, rows = records.len(), "fetched feedback snapshot");
                Snapshot::from_backend(records)
            }
            Err(e) => {
                tracing::error!(table = %self.table, error = %e, "feedback fetch failed; serving empty snapshot");
                Snapshot::fetch_failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use vfd_core::SnapshotOrigin;

    use super::*;

    #[tokio::test]
    async fn unconfigured_loader_yields_unconfigured_snapshot() {
        let loader = Loader::new(None, "video_feedbacks");
        let snapshot = loader.fetch_all().await;
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.origin, SnapshotOrigin::Unconfigured);
    }
}
