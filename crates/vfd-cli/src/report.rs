//! Text rendering for the CLI commands.
//!
//! Rendering is split from printing so the output can be asserted in
//! tests without capturing stdout.

use chrono::Utc;

use vfd_core::{Snapshot, SnapshotOrigin};
use vfd_pipeline::{run, EmptyCause, FilterOutcome, FilterParams, Summary};
use vfd_supabase::Loader;

/// One fetch, status to stdout.
pub(crate) async fn run_fetch(loader: &Loader) {
    let snapshot = loader.fetch_all().await;
    println!("{}", render_fetch(&snapshot));
}

/// Fetch, filter, and print the report (or the applicable no-data message).
pub(crate) async fn run_summary(loader: &Loader, params: &FilterParams) {
    let snapshot = loader.fetch_all().await;
    match run(&snapshot, params, Utc::now()) {
        FilterOutcome::Rows(set) => {
            println!("{}", render_summary(&set.summary(), params.effective_window_days()));
        }
        FilterOutcome::Empty(cause) => {
            println!("{}", no_data_message(snapshot.origin, cause));
        }
    }
}

fn render_fetch(snapshot: &Snapshot) -> String {
    match snapshot.origin {
        SnapshotOrigin::Backend => {
            format!("fetched {} record(s) from the backend", snapshot.records.len())
        }
        SnapshotOrigin::Unconfigured => {
            "backend unconfigured (set SUPABASE_URL and SUPABASE_KEY)".to_string()
        }
        SnapshotOrigin::FetchFailed => "fetch failed; see the log for the cause".to_string(),
    }
}

fn no_data_message(origin: SnapshotOrigin, cause: EmptyCause) -> &'static str {
    match cause {
        EmptyCause::FiltersExhausted => "no data for the current filters; try widening them",
        EmptyCause::SourceEmpty => match origin {
            SnapshotOrigin::Backend => "the feedback table is empty",
            SnapshotOrigin::Unconfigured => {
                "backend unconfigured (set SUPABASE_URL and SUPABASE_KEY)"
            }
            SnapshotOrigin::FetchFailed => "fetch failed; check the connection and the log",
        },
    }
}

fn render_summary(summary: &Summary, window_days: u32) -> String {
    let mut out = String::new();
    out.push_str(&format!("Report — last {window_days} day(s)\n"));
    out.push_str(&format!(
        "  total: {}  videos: {}  brands: {}  resolved: {}%\n",
        summary.total, summary.distinct_videos, summary.distinct_brands,
        summary.resolution_rate_pct
    ));

    out.push_str("\nTop topics:\n");
    for entry in summary.topic_counts.iter().take(10) {
        out.push_str(&format!("  {:>5}  {}\n", entry.count, entry.label));
    }

    out.push_str("\nBy brand:\n");
    for entry in &summary.brand_counts {
        out.push_str(&format!("  {:>5}  {}\n", entry.count, entry.label));
    }

    out.push_str("\nPer day:\n");
    for day in &summary.daily_counts {
        out.push_str(&format!("  {}  {}\n", day.date, day.count));
    }

    out
}

#[cfg(test)]
mod tests {
    use vfd_core::FeedbackRecord;
    use vfd_pipeline::summarize;

    use super::*;

    fn record(brand: &str, topic: &str, status: &str) -> FeedbackRecord {
        FeedbackRecord {
            created_at: Some(Utc::now()),
            video_marca: brand.to_string(),
            file_name: format!("{brand}.mp4"),
            ai_category_topic: topic.to_string(),
            status: Some(status.to_string()),
            ai_summary: None,
        }
    }

    #[test]
    fn render_fetch_mentions_row_count() {
        let snapshot = Snapshot::from_backend(vec![record("Acme", "Corte", "Aberto")]);
        assert_eq!(render_fetch(&snapshot), "fetched 1 record(s) from the backend");
    }

    #[test]
    fn no_data_messages_differ_by_remedy() {
        assert!(no_data_message(SnapshotOrigin::Backend, EmptyCause::FiltersExhausted)
            .contains("filters"));
        assert!(no_data_message(SnapshotOrigin::FetchFailed, EmptyCause::SourceEmpty)
            .contains("connection"));
        assert!(no_data_message(SnapshotOrigin::Unconfigured, EmptyCause::SourceEmpty)
            .contains("SUPABASE_URL"));
    }

    #[test]
    fn render_summary_includes_kpis_and_tables() {
        let records = vec![
            record("Acme", "Corte", "Resolvido"),
            record("Acme", "Legenda", "Aberto"),
        ];
        let rendered = render_summary(&summarize(&records), 30);
        assert!(rendered.contains("last 30 day(s)"));
        assert!(rendered.contains("total: 2"));
        assert!(rendered.contains("resolved: 50%"));
        assert!(rendered.contains("Corte"));
        assert!(rendered.contains("Acme"));
    }
}
