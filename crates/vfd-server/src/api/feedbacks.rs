use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Serialize;

use vfd_core::FeedbackRecord;
use vfd_pipeline::FilterOutcome;

use crate::middleware::RequestId;

use super::{no_data_cause, ApiResponse, AppState, FilterQuery, ResponseMeta};

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub(super) enum FeedbacksData {
    Ok {
        total: usize,
        /// Newest first, the order the tabular view renders.
        records: Vec<FeedbackRecord>,
    },
    NoData {
        cause: &'static str,
    },
}

pub(super) async fn list_feedbacks(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FilterQuery>,
) -> Json<ApiResponse<FeedbacksData>> {
    let snapshot = state.cache.get().await;
    let params = query.into_params();

    let data = match vfd_pipeline::run(&snapshot, &params, state.cache.now()) {
        FilterOutcome::Rows(set) => FeedbacksData::Ok {
            total: set.len(),
            records: set.newest_first(),
        },
        FilterOutcome::Empty(cause) => FeedbacksData::NoData {
            cause: no_data_cause(snapshot.origin, cause),
        },
    };

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
