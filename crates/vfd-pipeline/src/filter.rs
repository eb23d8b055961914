//! Staged filtering: date window, then brand allow-list, then category
//! allow-list. Each stage operates only on the output of the previous one.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use vfd_core::FeedbackRecord;

pub const MIN_WINDOW_DAYS: u32 = 1;
pub const MAX_WINDOW_DAYS: u32 = 90;
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Filter selection as received from the UI.
///
/// An EMPTY `brands` or `categories` list means "no filtering" — pass
/// everything through. A cleared multi-select shows the whole dashboard,
/// never a blank one. This mirrors the product behavior the dashboard
/// shipped with and is intentional, not a missing check.
#[derive(Debug, Clone)]
pub struct FilterParams {
    /// Window in days, clamped to `[MIN_WINDOW_DAYS, MAX_WINDOW_DAYS]`.
    pub window_days: u32,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            brands: Vec::new(),
            categories: Vec::new(),
        }
    }
}

impl FilterParams {
    /// The window actually applied, after clamping.
    #[must_use]
    pub fn effective_window_days(&self) -> u32 {
        self.window_days.clamp(MIN_WINDOW_DAYS, MAX_WINDOW_DAYS)
    }
}

/// Valid filter choices for the current dataset and selection.
///
/// Brands are derived from the date-windowed set; categories from the
/// brand-filtered set, so the selector never offers an option that would
/// add zero rows given the brand selection already made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub categories: Vec<String>,
}

/// Applies all three stages in order and returns the surviving records.
#[must_use]
pub fn apply(
    records: &[FeedbackRecord],
    params: &FilterParams,
    now: DateTime<Utc>,
) -> Vec<FeedbackRecord> {
    let windowed = stage_date(records, params, now);
    let branded = stage_brand(windowed, &params.brands);
    let categorized = stage_category(branded, &params.categories);
    categorized.into_iter().cloned().collect()
}

/// Derives the offered filter options for the current selection.
#[must_use]
pub fn options(
    records: &[FeedbackRecord],
    params: &FilterParams,
    now: DateTime<Utc>,
) -> FilterOptions {
    let windowed = stage_date(records, params, now);
    let brands = distinct_sorted(windowed.iter().map(|r| r.video_marca.as_str()));
    let branded = stage_brand(windowed, &params.brands);
    let categories = distinct_sorted(branded.iter().map(|r| r.ai_category_topic.as_str()));
    FilterOptions { brands, categories }
}

/// Stage 1: keep records with `created_at >= now - window` (inclusive).
///
/// When NO record carries a timestamp the source table has no usable
/// date column and the stage passes everything through ("all time"). In a
/// mixed set, records without a timestamp cannot satisfy the cut and drop.
fn stage_date<'a>(
    records: &'a [FeedbackRecord],
    params: &FilterParams,
    now: DateTime<Utc>,
) -> Vec<&'a FeedbackRecord> {
    if records.iter().all(|r| r.created_at.is_none()) {
        return records.iter().collect();
    }
    let cutoff = now - Duration::days(i64::from(params.effective_window_days()));
    records
        .iter()
        .filter(|r| r.created_at.is_some_and(|t| t >= cutoff))
        .collect()
}

/// Stage 2: brand allow-list; empty list passes everything through.
fn stage_brand<'a>(
    input: Vec<&'a FeedbackRecord>,
    brands: &[String],
) -> Vec<&'a FeedbackRecord> {
    if brands.is_empty() {
        return input;
    }
    input
        .into_iter()
        .filter(|r| brands.iter().any(|b| *b == r.video_marca))
        .collect()
}

/// Stage 3: category allow-list on the normalized topic; empty list passes
/// everything through. Evaluated strictly over the stage-2 output.
fn stage_category<'a>(
    input: Vec<&'a FeedbackRecord>,
    categories: &[String],
) -> Vec<&'a FeedbackRecord> {
    if categories.is_empty() {
        return input;
    }
    input
        .into_iter()
        .filter(|r| categories.iter().any(|c| *c == r.ai_category_topic))
        .collect()
}

/// Sorted, deduplicated, with empty values (missing source columns)
/// excluded from what the UI offers.
fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut distinct: Vec<String> = values
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    distinct.sort_unstable();
    distinct.dedup();
    distinct
}
