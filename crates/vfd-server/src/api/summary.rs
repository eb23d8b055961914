use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Serialize;

use vfd_pipeline::{FilterOutcome, Summary};

use crate::middleware::RequestId;

use super::{no_data_cause, ApiResponse, AppState, FilterQuery, ResponseMeta};

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub(super) enum SummaryData {
    Ok { summary: Summary },
    NoData { cause: &'static str },
}

pub(super) async fn get_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FilterQuery>,
) -> Json<ApiResponse<SummaryData>> {
    let snapshot = state.cache.get().await;
    let params = query.into_params();

    // Aggregates are only computed on the non-empty arm; the empty arm
    // carries the cause the UI needs to pick its message.
    let data = match vfd_pipeline::run(&snapshot, &params, state.cache.now()) {
        FilterOutcome::Rows(set) => SummaryData::Ok {
            summary: set.summary(),
        },
        FilterOutcome::Empty(cause) => SummaryData::NoData {
            cause: no_data_cause(snapshot.origin, cause),
        },
    };

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
