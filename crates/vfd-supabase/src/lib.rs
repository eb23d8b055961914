//! Loader for the hosted `video_feedbacks` table.
//!
//! Wraps the Supabase (PostgREST) REST interface: one unconditional
//! select-all per refresh, row-by-row normalization into
//! [`vfd_core::FeedbackRecord`], and a fail-soft [`Loader`] that turns
//! every fetch problem into an empty [`vfd_core::Snapshot`] with a
//! recorded origin instead of an error.

mod client;
mod error;
mod loader;
mod normalize;
mod types;

pub use client::SupabaseClient;
pub use error::SupabaseError;
pub use loader::Loader;
pub use normalize::normalize_row;
pub use types::RawFeedbackRow;
