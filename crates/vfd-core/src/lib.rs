pub mod app_config;
pub mod config;
pub mod topic;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app_config::{AppConfig, BackendConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

/// Status value marking a feedback item as resolved.
pub const RESOLVED_STATUS: &str = "Resolvido";

/// One normalized row of the `video_feedbacks` table.
///
/// `ai_category_topic` is always a plain label after normalization — the
/// raw column may carry the textual form of a list, which the loader
/// collapses via [`topic::normalize_topic`]. Records are never mutated
/// after normalization; filtering produces new views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// `None` when the source row carries no parseable timestamp; such
    /// records pass date filtering only when no record in the set has one.
    pub created_at: Option<DateTime<Utc>>,
    pub video_marca: String,
    pub file_name: String,
    pub ai_category_topic: String,
    pub status: Option<String>,
    pub ai_summary: Option<String>,
}

impl FeedbackRecord {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status.as_deref() == Some(RESOLVED_STATUS)
    }
}

/// Why a snapshot carries the rows it does (or none at all).
///
/// Fetch problems never surface as errors to callers; they are recorded
/// here so the presentation layer can distinguish "empty table" from
/// "check connection" without re-deriving cause from symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotOrigin {
    /// Rows came back from the backend (possibly zero of them).
    Backend,
    /// No backend credentials are configured; nothing was fetched.
    Unconfigured,
    /// The fetch failed; the cause was logged and swallowed.
    FetchFailed,
}

/// The immutable result of one fetch: every row of the backing table,
/// normalized, plus the origin of the data.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Vec<FeedbackRecord>,
    pub origin: SnapshotOrigin,
}

impl Snapshot {
    #[must_use]
    pub fn from_backend(records: Vec<FeedbackRecord>) -> Self {
        Self {
            records,
            origin: SnapshotOrigin::Backend,
        }
    }

    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            records: Vec::new(),
            origin: SnapshotOrigin::Unconfigured,
        }
    }

    #[must_use]
    pub fn fetch_failed() -> Self {
        Self {
            records: Vec::new(),
            origin: SnapshotOrigin::FetchFailed,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
