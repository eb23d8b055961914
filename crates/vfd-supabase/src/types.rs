//! Raw row shape as returned by the REST interface.
//!
//! Every field is optional and untyped: the hosted table has no enforced
//! schema for the columns this core reads, and a surprising value in one
//! column of one row must not poison the fetch. Typing happens in
//! [`crate::normalize`].

use serde::Deserialize;
use serde_json::Value;

/// One raw row of the `video_feedbacks` table, prior to normalization.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawFeedbackRow {
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub video_marca: Option<Value>,
    #[serde(default)]
    pub file_name: Option<Value>,
    #[serde(default)]
    pub ai_category_topic: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub ai_summary: Option<Value>,
}
