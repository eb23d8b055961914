//! Normalization of raw rows into domain records.
//!
//! Applied independently to every row: no value here can fail, only
//! degrade (missing timestamp, empty brand, raw topic text kept as-is).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use vfd_core::{topic, FeedbackRecord};

/// Converts a [`RawFeedbackRow`](crate::RawFeedbackRow) into a
/// [`FeedbackRecord`].
///
/// - `created_at` parses as RFC 3339 (or a naive `YYYY-MM-DDTHH:MM:SS`
///   assumed UTC); anything else leaves the field unset.
/// - `ai_category_topic` goes through [`topic::normalize_topic`], so it is
///   always a single plain label afterwards.
/// - missing `video_marca`/`file_name` become empty strings; the pipeline
///   excludes those from offered filter options.
#[must_use]
pub fn normalize_row(raw: crate::RawFeedbackRow) -> FeedbackRecord {
    FeedbackRecord {
        created_at: raw.created_at.as_ref().and_then(parse_timestamp),
        video_marca: string_or_empty(raw.video_marca),
        file_name: string_or_empty(raw.file_name),
        ai_category_topic: topic::normalize_topic(&raw.ai_category_topic.unwrap_or(Value::Null)),
        status: optional_string(raw.status),
        ai_summary: optional_string(raw.ai_summary),
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // PostgREST emits `timestamp without time zone` columns with no offset.
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn string_or_empty(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn optional_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::RawFeedbackRow;

    fn raw_row(body: serde_json::Value) -> RawFeedbackRow {
        serde_json::from_value(body).expect("raw row should always deserialize")
    }

    #[test]
    fn normalizes_complete_row() {
        let record = normalize_row(raw_row(json!({
            "created_at": "2025-08-01T12:30:00+00:00",
            "video_marca": "Acme",
            "file_name": "spot_v2.mp4",
            "ai_category_topic": "['Legenda incorreta', 'Corte']",
            "status": "Resolvido",
            "ai_summary": "Cliente pediu ajuste na legenda."
        })));

        assert_eq!(
            record.created_at,
            Some(Utc.with_ymd_and_hms(2025, 8, 1, 12, 30, 0).unwrap())
        );
        assert_eq!(record.video_marca, "Acme");
        assert_eq!(record.file_name, "spot_v2.mp4");
        assert_eq!(record.ai_category_topic, "Legenda incorreta");
        assert!(record.is_resolved());
        assert!(record.ai_summary.is_some());
    }

    #[test]
    fn naive_timestamp_assumed_utc() {
        let record = normalize_row(raw_row(json!({
            "created_at": "2025-08-01T09:15:30.250"
        })));
        assert_eq!(
            record.created_at,
            Some(
                Utc.with_ymd_and_hms(2025, 8, 1, 9, 15, 30).unwrap()
                    + chrono::Duration::milliseconds(250)
            )
        );
    }

    #[test]
    fn unparseable_timestamp_left_unset() {
        let record = normalize_row(raw_row(json!({ "created_at": "yesterday" })));
        assert!(record.created_at.is_none());
    }

    #[test]
    fn missing_columns_degrade_per_field() {
        let record = normalize_row(raw_row(json!({})));
        assert!(record.created_at.is_none());
        assert_eq!(record.video_marca, "");
        assert_eq!(record.file_name, "");
        assert_eq!(record.ai_category_topic, "None");
        assert!(record.status.is_none());
        assert!(record.ai_summary.is_none());
    }

    #[test]
    fn malformed_topic_kept_verbatim() {
        let record = normalize_row(raw_row(json!({
            "ai_category_topic": "[unterminated"
        })));
        assert_eq!(record.ai_category_topic, "[unterminated");
    }

    #[test]
    fn array_topic_takes_first_element() {
        let record = normalize_row(raw_row(json!({
            "ai_category_topic": ["Corte", "Audio"]
        })));
        assert_eq!(record.ai_category_topic, "Corte");
    }
}
