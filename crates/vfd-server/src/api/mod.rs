//! HTTP surface for the presentation layer.
//!
//! Every handler is infallible by design: fetch problems were already
//! collapsed into empty snapshots by the loader, and empty results are a
//! reportable state, not an error. The envelope (`data` + `meta` with a
//! request ID) is shared by all routes.

mod feedbacks;
mod options;
mod summary;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use vfd_core::SnapshotOrigin;
use vfd_pipeline::{EmptyCause, FilterParams, SnapshotCache, DEFAULT_WINDOW_DAYS};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<SnapshotCache>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

/// Common query shape for the data routes.
///
/// `brands` and `categories` are comma-separated multi-values; absent or
/// blank means no filtering for that stage. `days` outside `[1, 90]`
/// clamps rather than erroring.
#[derive(Debug, Default, Deserialize)]
pub(super) struct FilterQuery {
    pub days: Option<u32>,
    pub brands: Option<String>,
    pub categories: Option<String>,
}

impl FilterQuery {
    pub(super) fn into_params(self) -> FilterParams {
        FilterParams {
            window_days: self.days.unwrap_or(DEFAULT_WINDOW_DAYS),
            brands: split_csv(self.brands),
            categories: split_csv(self.categories),
        }
    }
}

fn split_csv(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

/// Maps the empty-state taxonomy to the wire-level cause string. The
/// snapshot origin refines `SourceEmpty` so the UI can say "check
/// connection" instead of "no records yet" when that is what happened.
pub(super) fn no_data_cause(origin: SnapshotOrigin, cause: EmptyCause) -> &'static str {
    match cause {
        EmptyCause::FiltersExhausted => "filters_exhausted",
        EmptyCause::SourceEmpty => match origin {
            SnapshotOrigin::Backend => "source_empty",
            SnapshotOrigin::Unconfigured => "backend_unconfigured",
            SnapshotOrigin::FetchFailed => "fetch_failed",
        },
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/feedbacks", get(feedbacks::list_feedbacks))
        .route("/api/v1/summary", get(summary::get_summary))
        .route("/api/v1/options", get(options::get_options))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
