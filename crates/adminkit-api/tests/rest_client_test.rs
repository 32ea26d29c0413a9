#![allow(clippy::unwrap_used)]
// Integration tests for `RestClient` using wiremock.

use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use adminkit_api::{Error, HttpClient, RestClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RestClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = RestClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_returns_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/back/api/people/"))
        .and(query_param("ordering", "first_name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "first_name": "Al" },
            { "id": 2, "first_name": "Bo" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let body = client
        .get("/back/api/people/?ordering=first_name")
        .await
        .unwrap();

    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[1]["first_name"], "Bo");
}

#[tokio::test]
async fn test_get_invalid_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/back/api/broken/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.get("/back/api/broken/").await;

    match result {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_error_status_uses_detail_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/back/api/people/"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "detail": "You do not have permission." })),
        )
        .mount(&server)
        .await;

    let result = client.get("/back/api/people/").await;

    match result {
        Err(Error::Status { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "You do not have permission.");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_error_status_with_plain_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/back/api/people/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.get("/back/api/people/").await.unwrap_err();

    assert!(err.is_transient());
    assert!(matches!(err, Error::Status { status: 500, ref message } if message == "boom"));
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_post_sends_json_body() {
    let (server, client) = setup().await;
    let item = json!({ "name": "New topic" });

    Mock::given(method("POST"))
        .and(path("/back/api/topics/"))
        .and(body_json(&item))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 7, "name": "New topic" })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.post("/back/api/topics/", &item).await.unwrap();

    assert_eq!(created["id"], 7);
}

#[tokio::test]
async fn test_patch_empty_body_is_null() {
    let (server, client) = setup().await;
    let item = json!({ "id": 7, "name": "Renamed" });

    Mock::given(method("PATCH"))
        .and(path("/back/api/topics/7/"))
        .and(body_json(&item))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let body = client.patch("/back/api/topics/7/", &item).await.unwrap();

    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_delete_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/back/api/topics/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete("/back/api/topics/7").await.unwrap();
}

#[tokio::test]
async fn test_delete_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/back/api/topics/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .mount(&server)
        .await;

    let err = client.delete("/back/api/topics/99").await.unwrap_err();

    assert!(err.is_not_found());
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn test_new_rejects_invalid_base_url() {
    let result = RestClient::new("not a url", &TransportConfig::default());
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[test]
fn test_new_keeps_base_url() {
    let client = RestClient::new("https://admin.example.com/", &TransportConfig::default()).unwrap();
    assert_eq!(client.base_url().as_str(), "https://admin.example.com/");
}
