//! Integration tests for `SupabaseClient` and `Loader` using wiremock.

use vfd_core::SnapshotOrigin;
use vfd_supabase::{Loader, SupabaseClient};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> SupabaseClient {
    SupabaseClient::new(base_url, "test-key", 30).expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_rows_sends_select_all_with_auth_headers() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "created_at": "2025-08-01T12:00:00+00:00",
            "video_marca": "Acme",
            "file_name": "spot.mp4",
            "ai_category_topic": "['Legenda']",
            "status": "Resolvido",
            "ai_summary": "ok"
        },
        {
            "created_at": null,
            "video_marca": "Borealis",
            "file_name": "teaser.mp4",
            "ai_category_topic": "Corte",
            "status": "Aberto"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/video_feedbacks"))
        .and(query_param("select", "*"))
        .and(header("apikey", "test-key"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let rows = client
        .fetch_rows("video_feedbacks")
        .await
        .expect("should parse rows");

    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].video_marca.as_ref().and_then(|v| v.as_str()),
        Some("Acme")
    );
    assert!(rows[1].created_at.is_none(), "null deserializes as absent");
}

#[tokio::test]
async fn fetch_rows_rejects_non_array_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/video_feedbacks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "not an array" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_rows("video_feedbacks").await;
    assert!(result.is_err(), "object body should not parse as rows");
}

#[tokio::test]
async fn fetch_rows_surfaces_http_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/video_feedbacks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_rows("video_feedbacks").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn loader_normalizes_fetched_rows() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "created_at": "2025-08-01T12:00:00+00:00",
            "video_marca": "Acme",
            "file_name": "spot.mp4",
            "ai_category_topic": "['Legenda incorreta', 'Corte']",
            "status": "Resolvido"
        },
        {
            "video_marca": "Borealis",
            "file_name": "teaser.mp4",
            "ai_category_topic": "[unterminated"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/video_feedbacks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let loader = Loader::new(Some(test_client(&server.uri())), "video_feedbacks");
    let snapshot = loader.fetch_all().await;

    assert_eq!(snapshot.origin, SnapshotOrigin::Backend);
    assert_eq!(snapshot.records.len(), 2);
    assert_eq!(snapshot.records[0].ai_category_topic, "Legenda incorreta");
    // A malformed list literal on one row never affects the others.
    assert_eq!(snapshot.records[1].ai_category_topic, "[unterminated");
    assert!(snapshot.records[1].created_at.is_none());
}

#[tokio::test]
async fn loader_degrades_to_empty_snapshot_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/video_feedbacks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let loader = Loader::new(Some(test_client(&server.uri())), "video_feedbacks");
    let snapshot = loader.fetch_all().await;

    assert!(snapshot.is_empty());
    assert_eq!(snapshot.origin, SnapshotOrigin::FetchFailed);
}

#[tokio::test]
async fn loader_degrades_to_empty_snapshot_on_connection_refused() {
    // Nothing is listening on this address.
    let client = test_client("http://127.0.0.1:1");
    let loader = Loader::new(Some(client), "video_feedbacks");
    let snapshot = loader.fetch_all().await;

    assert!(snapshot.is_empty());
    assert_eq!(snapshot.origin, SnapshotOrigin::FetchFailed);
}

#[tokio::test]
async fn loader_passes_through_empty_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/video_feedbacks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let loader = Loader::new(Some(test_client(&server.uri())), "video_feedbacks");
    let snapshot = loader.fetch_all().await;

    assert!(snapshot.is_empty());
    assert_eq!(snapshot.origin, SnapshotOrigin::Backend);
}
