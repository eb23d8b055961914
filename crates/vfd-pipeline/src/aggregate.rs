//! Derived aggregates consumed by the presentation layer.
//!
//! These fix the numbers a reimplementation of the charts must match:
//! KPI counts, the resolution rate, frequency tables, the brand × topic
//! cross tabulation behind the heatmap, and the zero-filled daily series.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use vfd_core::FeedbackRecord;

/// One row of a frequency table, descending by count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

/// One cell of the brand × topic cross tabulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossCount {
    pub brand: String,
    pub topic: String,
    pub count: usize,
}

/// One day of the time series. Days with no records appear with count 0 —
/// a continuous axis must not silently skip gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub distinct_videos: usize,
    pub distinct_brands: usize,
    /// Percentage of resolved records, rounded; 0 on an empty set.
    pub resolution_rate_pct: u32,
    pub topic_counts: Vec<CountEntry>,
    pub brand_counts: Vec<CountEntry>,
    pub brand_topic_matrix: Vec<CrossCount>,
    pub daily_counts: Vec<DailyCount>,
}

/// Computes every derived aggregate over an already-filtered set.
///
/// Callers normally reach this through
/// [`FilteredSet::summary`](crate::FilteredSet::summary), which guarantees
/// a non-empty input; an empty slice still yields a well-defined summary
/// (all zeros) rather than a division error.
#[must_use]
pub fn summarize(records: &[FeedbackRecord]) -> Summary {
    let total = records.len();
    let distinct_videos = distinct_count(records.iter().map(|r| r.file_name.as_str()));
    let distinct_brands = distinct_count(records.iter().map(|r| r.video_marca.as_str()));

    let resolved = records.iter().filter(|r| r.is_resolved()).count();
    let resolution_rate_pct = percentage(resolved, total);

    let topic_counts = frequency(records.iter().map(|r| r.ai_category_topic.as_str()));
    let brand_counts = frequency(records.iter().map(|r| r.video_marca.as_str()));
    let brand_topic_matrix = cross_tabulate(records);
    let daily_counts = daily_series(records);

    Summary {
        total,
        distinct_videos,
        distinct_brands,
        resolution_rate_pct,
        topic_counts,
        brand_counts,
        brand_topic_matrix,
        daily_counts,
    }
}

fn distinct_count<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.collect::<HashSet<_>>().len()
}

/// Rounded integer percentage; defined as 0 when the denominator is 0.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Counts per value, descending by count, ties broken by label for
/// deterministic output.
fn frequency<'a>(values: impl Iterator<Item = &'a str>) -> Vec<CountEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry {
            label: label.to_owned(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}

fn cross_tabulate(records: &[FeedbackRecord]) -> Vec<CrossCount> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for record in records {
        *counts
            .entry((record.video_marca.as_str(), record.ai_category_topic.as_str()))
            .or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((brand, topic), count)| CrossCount {
            brand: brand.to_owned(),
            topic: topic.to_owned(),
            count,
        })
        .collect()
}

/// Per-calendar-day counts (UTC), continuous from the first to the last
/// day carrying records. Undated records are excluded from the series only.
fn daily_series(records: &[FeedbackRecord]) -> Vec<DailyCount> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        if let Some(ts) = record.created_at {
            *counts.entry(ts.date_naive()).or_insert(0) += 1;
        }
    }
    let (Some((&first, _)), Some((&last, _))) =
        (counts.first_key_value(), counts.last_key_value())
    else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut day = first;
    while day <= last {
        series.push(DailyCount {
            date: day,
            count: counts.get(&day).copied().unwrap_or(0),
        });
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }
    series
}
