// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mrs_api::{ApiClient, Error, UrlValidation};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Stats ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_stats_happy_path() {
    let (server, client) = setup().await;

    let body = json!({
        "success": true,
        "database": { "total_items": 5, "active_searches": 2 },
        "total_api_requests": 9,
        "uptime_formatted": "3 days, 4:12",
        "timestamp": "2024-06-01T12:00:00Z"
    });

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let stats = client.stats().await.unwrap();

    assert_eq!(stats.total_items, 5);
    assert_eq!(stats.active_searches, 2);
    assert_eq!(stats.total_api_requests, 9);
    assert_eq!(stats.uptime.as_deref(), Some("3 days, 4:12"));
    assert!(stats.timestamp.is_some());
}

#[tokio::test]
async fn test_stats_application_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "database unavailable"
        })))
        .mount(&server)
        .await;

    let result = client.stats().await;

    match result {
        Err(Error::Api { ref message, status }) => {
            assert_eq!(message, "database unavailable");
            assert!(status.is_none());
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_stats_success_with_missing_counts_is_rejected() {
    let (server, client) = setup().await;

    // success:true but no database object -- malformed, never defaulted.
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "total_api_requests": 9
        })))
        .mount(&server)
        .await;

    let result = client.stats().await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization, got: {result:?}"
    );
}

#[tokio::test]
async fn test_stats_non_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.stats().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert_eq!(body, "<html>oops</html>");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Recent items ────────────────────────────────────────────────────

#[tokio::test]
async fn test_recent_items_optional_fields() {
    let (server, client) = setup().await;

    let body = json!({
        "success": true,
        "items": [
            {
                "title": "Pokemon card lot",
                "price": 1500,
                "image_url": "https://img.example/1.jpg",
                "search_name": "pokemon"
            },
            { "title": "Untracked figure" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/recent-items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let items = client.recent_items().await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Pokemon card lot");
    assert_eq!(items[0].price, Some(1500));
    assert_eq!(items[0].search_name.as_deref(), Some("pokemon"));
    assert_eq!(items[1].price, None);
    assert_eq!(items[1].image_url, None);
    assert_eq!(items[1].search_name, None);
}

// ── Queries ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_queries() {
    let (server, client) = setup().await;

    let body = json!({
        "success": true,
        "queries": [
            { "id": 1, "name": "pokemon", "url": "https://jp.mercari.com/search?keyword=pokemon", "enabled": true },
            { "id": 2, "name": "gundam", "url": "https://jp.mercari.com/search?keyword=gundam", "enabled": false }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let queries = client.list_queries().await.unwrap();

    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].id, 1);
    assert_eq!(queries[0].name, "pokemon");
    assert!(queries[0].enabled);
    assert!(!queries[1].enabled);
}

// ── Search URL test ─────────────────────────────────────────────────

#[tokio::test]
async fn test_search_url_valid() {
    let (server, client) = setup().await;

    let body = json!({
        "valid": true,
        "test_results": {
            "items_found": 12,
            "sample_titles": ["Card A", "Card B"]
        }
    });

    Mock::given(method("POST"))
        .and(path("/api/search/test"))
        .and(body_json(json!({ "url": "https://jp.mercari.com/search?keyword=card" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let outcome = client
        .test_search_url("https://jp.mercari.com/search?keyword=card")
        .await
        .unwrap();

    match outcome {
        UrlValidation::Valid {
            items_found,
            ref sample_titles,
            ref test_error,
        } => {
            assert_eq!(items_found, 12);
            assert_eq!(sample_titles, &["Card A".to_owned(), "Card B".to_owned()]);
            assert!(test_error.is_none());
        }
        other => panic!("expected Valid, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_search_url_valid_with_test_error() {
    let (server, client) = setup().await;

    // The backend can report a live-fetch failure alongside a valid URL.
    let body = json!({
        "valid": true,
        "test_results": { "items_found": 0, "sample_titles": [] },
        "test_error": "fetch timed out"
    });

    Mock::given(method("POST"))
        .and(path("/api/search/test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let outcome = client.test_search_url("https://jp.mercari.com/x").await.unwrap();

    assert!(outcome.is_valid());
    assert_eq!(outcome.test_error(), Some("fetch timed out"));
}

#[tokio::test]
async fn test_search_url_invalid() {
    let (server, client) = setup().await;

    let body = json!({
        "valid": false,
        "error": "not a Mercari search URL"
    });

    Mock::given(method("POST"))
        .and(path("/api/search/test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let outcome = client.test_search_url("https://example.com").await.unwrap();

    match outcome {
        UrlValidation::Invalid { ref error, .. } => {
            assert_eq!(error.as_deref(), Some("not a Mercari search URL"));
        }
        other => panic!("expected Invalid, got: {other:?}"),
    }
}

// ── Force scan ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_force_scan_with_count() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/force-scan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "new_items": 7 })))
        .mount(&server)
        .await;

    let outcome = client.force_scan().await.unwrap();
    assert_eq!(outcome.new_items, 7);
}

#[tokio::test]
async fn test_force_scan_count_defaults_to_zero() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/force-scan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let outcome = client.force_scan().await.unwrap();
    assert_eq!(outcome.new_items, 0);
}

#[tokio::test]
async fn test_force_scan_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/force-scan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "scan already running"
        })))
        .mount(&server)
        .await;

    let result = client.force_scan().await;

    match result {
        Err(Error::Api { ref message, .. }) => assert_eq!(message, "scan already running"),
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Acknowledged actions ────────────────────────────────────────────

#[tokio::test]
async fn test_notification_ack() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/notifications/test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    client.test_notification().await.unwrap();
}

#[tokio::test]
async fn test_delete_query_hits_id_path() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/queries/42/delete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_query(42).await.unwrap();
}

#[tokio::test]
async fn test_toggle_query_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/queries/9/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "query not found"
        })))
        .mount(&server)
        .await;

    let result = client.toggle_query(9).await;

    match result {
        Err(Error::Api { ref message, .. }) => assert_eq!(message, "query not found"),
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Clear all ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_clear_all_items_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/clear-all-items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Deleted 120 items"
        })))
        .mount(&server)
        .await;

    let outcome = client.clear_all_items().await.unwrap();
    assert_eq!(outcome.message, "Deleted 120 items");
}

// ── HTTP-level errors ───────────────────────────────────────────────

#[tokio::test]
async fn test_http_500_carries_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "internal server error"
        })))
        .mount(&server)
        .await;

    let result = client.stats().await;

    match result {
        Err(Error::Api {
            ref message,
            status,
        }) => {
            assert_eq!(message, "internal server error");
            assert_eq!(status, Some(500));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_404_plain_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let result = client.recent_items().await;

    match result {
        Err(Error::Api {
            ref message,
            status,
        }) => {
            assert_eq!(message, "not found");
            assert_eq!(status, Some(404));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}
