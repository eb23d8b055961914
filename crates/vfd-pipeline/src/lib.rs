//! Filter pipeline and derived aggregates for the feedback dashboard.
//!
//! Raw snapshots come from [`vfd_supabase::Loader`]; this crate turns them
//! into the display-ready dataset every chart consumes: a strict
//! date-window → brand → category stage order, filter options conditioned
//! on the stages already applied, aggregates computed only on provably
//! non-empty sets, and a TTL cache so repeated requests within the
//! freshness window share one fetch.

pub mod aggregate;
pub mod cache;
pub mod dataset;
pub mod filter;

pub use aggregate::{summarize, CountEntry, CrossCount, DailyCount, Summary};
pub use cache::{Clock, SnapshotCache, SystemClock};
pub use dataset::{run, EmptyCause, FilterOutcome, FilteredSet};
pub use filter::{
    apply, options, FilterOptions, FilterParams, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS,
    MIN_WINDOW_DAYS,
};
