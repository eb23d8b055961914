//! Time-boxed snapshot cache.
//!
//! Fetched data is valid for the configured freshness window (60 s by
//! default); stale data is discarded and refetched on next access. The
//! clock is injected so tests drive expiry with a manual clock instead of
//! sleeping through wall time.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use vfd_core::Snapshot;
use vfd_supabase::Loader;

/// Source of "now" for freshness decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time; the production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CacheSlot {
    snapshot: Arc<Snapshot>,
    fetched_at: DateTime<Utc>,
}

/// Owns the loader and serves each caller the freshest snapshot within
/// the TTL.
///
/// The slot mutex is held across a refresh, so concurrent callers racing
/// past an expired cache converge on a single fetch. (Duplicate fetches
/// would also be safe — snapshots are immutable — convergence just avoids
/// the redundant round trip.)
pub struct SnapshotCache {
    loader: Loader,
    ttl: Duration,
    clock: Box<dyn Clock>,
    slot: Mutex<Option<CacheSlot>>,
}

impl SnapshotCache {
    #[must_use]
    pub fn new(loader: Loader, ttl_secs: u64) -> Self {
        Self::with_clock(loader, ttl_secs, Box::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(loader: Loader, ttl_secs: u64, clock: Box<dyn Clock>) -> Self {
        let ttl = Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX));
        Self {
            loader,
            ttl,
            clock,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached snapshot while fresh, refetching past expiry.
    pub async fn get(&self) -> Arc<Snapshot> {
        let now = self.clock.now();
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if now - cached.fetched_at < self.ttl {
                return Arc::clone(&cached.snapshot);
            }
            tracing::debug!(age_secs = (now - cached.fetched_at).num_seconds(), "snapshot expired");
        }

        let snapshot = Arc::new(self.loader.fetch_all().await);
        *slot = Some(CacheSlot {
            snapshot: Arc::clone(&snapshot),
            fetched_at: now,
        });
        snapshot
    }

    /// The cache's notion of "now"; filtering uses the same clock so a
    /// fake clock in tests moves the date window and the TTL together.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
