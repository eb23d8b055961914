use axum::{
    extract::{Query, State},
    Extension, Json,
};

use vfd_pipeline::FilterOptions;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, FilterQuery, ResponseMeta};

/// Valid filter choices for the current selection. Always computable:
/// an empty dataset simply offers empty lists.
pub(super) async fn get_options(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FilterQuery>,
) -> Json<ApiResponse<FilterOptions>> {
    let snapshot = state.cache.get().await;
    let params = query.into_params();
    let data = vfd_pipeline::options(&snapshot.records, &params, state.cache.now());

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
