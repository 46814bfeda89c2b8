use super::assets::parse_page;
use super::*;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY_PATH: &str = "/v2024-01-01/data/query/production";

fn app_for(server: &MockServer) -> Router {
    let store = SanityClient::with_base_url(&server.uri(), "production", "2024-01-01", "token", 5)
        .expect("sanity client");
    build_app(AppState {
        store: Arc::new(store),
        page_size: 24,
    })
}

fn asset_json(id: &str, lat: Option<f64>, lng: Option<f64>) -> Value {
    json!({
        "_id": id,
        "_createdAt": "2024-03-01T12:00:00Z",
        "_updatedAt": "2024-03-02T12:00:00Z",
        "mimeType": "image/jpeg",
        "tags": ["Tokyo, Japan"],
        "lat": lat,
        "lng": lng,
        "size": 1024,
        "url": format!("https://cdn.sanity.io/images/p/production/{id}.jpg")
    })
}

fn query_contains(request: &wiremock::Request, needle: &str) -> bool {
    request
        .url
        .query_pairs()
        .any(|(key, value)| key == "query" && value.contains(needle))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

async fn mount_result(server: &MockServer, result: Value) {
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": result })))
        .mount(server)
        .await;
}

async fn mount_failure(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(server)
        .await;
}

#[test]
fn parse_page_defaults_and_rejects_non_positive() {
    assert_eq!(parse_page(None), Some(1));
    assert_eq!(parse_page(Some("")), Some(1));
    assert_eq!(parse_page(Some("3")), Some(3));
    assert_eq!(parse_page(Some("0")), None);
    assert_eq!(parse_page(Some("-2")), None);
    assert_eq!(parse_page(Some("two")), None);
}

#[test]
fn api_error_bad_request_maps_to_400() {
    let response = ApiError::new("req-1", "bad_request", "nope").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn api_error_unknown_code_maps_to_500() {
    let response = ApiError::new("req-1", "internal_error", "nope").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_returns_ok_envelope() {
    let server = MockServer::start().await;
    let (status, json) = get_json(app_for(&server), "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert!(json["meta"]["request_id"].is_string());
    assert!(json["meta"]["timestamp"].is_string());
}

#[tokio::test]
async fn assets_without_tag_is_bad_request() {
    let server = MockServer::start().await;
    let (status, json) = get_json(app_for(&server), "/assets").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "Tag parameter is missing" }));
}

#[tokio::test]
async fn assets_with_empty_tag_is_bad_request() {
    let server = MockServer::start().await;
    let (status, json) = get_json(app_for(&server), "/assets?t=&page=2").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Tag parameter is missing");
}

#[tokio::test]
async fn assets_with_invalid_page_is_bad_request() {
    let server = MockServer::start().await;
    let (status, json) = get_json(app_for(&server), "/assets?t=Tokyo&page=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn assets_returns_bare_array_for_requested_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("$tag", "\"Tokyo, Japan\""))
        .and(|req: &wiremock::Request| query_contains(req, "[24...48]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [asset_json("image-1", Some(35.68), Some(139.69))]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, json) = get_json(app_for(&server), "/assets?t=Tokyo%2C%20Japan&page=2").await;

    assert_eq!(status, StatusCode::OK);
    let assets = json.as_array().expect("bare array");
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0]["_id"], "image-1");
    assert_eq!(assets[0]["mimeType"], "image/jpeg");
    assert_eq!(assets[0]["lat"], 35.68);
}

#[tokio::test]
async fn assets_store_failure_is_server_error() {
    let server = MockServer::start().await;
    mount_failure(&server).await;

    let (status, json) = get_json(app_for(&server), "/assets?t=Tokyo").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn layout_summarizes_tags() {
    let server = MockServer::start().await;
    mount_result(
        &server,
        json!([
            { "name": "Kyoto, Japan" },
            { "name": "Lima, Peru" },
            { "name": "Tokyo, Japan" },
            { "name": "Wallpaper" }
        ]),
    )
    .await;

    let (status, json) = get_json(app_for(&server), "/api/v1/layout").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"]["summary"],
        json!({ "Japan": ["Kyoto", "Tokyo"], "Peru": ["Lima"] })
    );
}

#[tokio::test]
async fn layout_degrades_to_empty_summary_on_store_failure() {
    let server = MockServer::start().await;
    mount_failure(&server).await;

    let (status, json) = get_json(app_for(&server), "/api/v1/layout").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["summary"], json!({}));
}

#[tokio::test]
async fn explore_store_failure_uses_error_envelope() {
    let server = MockServer::start().await;
    mount_failure(&server).await;

    let (status, json) = get_json(app_for(&server), "/api/v1/explore").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "internal_error");
    assert_eq!(json["error"]["message"], "failed to load media");
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn tag_page_requires_tag() {
    let server = MockServer::start().await;
    let (status, json) = get_json(app_for(&server), "/api/v1/tag").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
    assert_eq!(json["error"]["message"], "Tag parameter is missing");
}

#[tokio::test]
async fn tag_page_returns_first_page_and_tag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(|req: &wiremock::Request| query_contains(req, "[0...24]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [asset_json("image-1", None, None)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, json) = get_json(app_for(&server), "/api/v1/tag?t=Night").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["tag"], "Night");
    assert_eq!(json["data"]["assets"][0]["_id"], "image-1");
    assert!(json["data"]["assets"][0].get("lat").is_none());
}

#[tokio::test]
async fn world_returns_located_assets() {
    let server = MockServer::start().await;
    mount_result(
        &server,
        json!([asset_json("image-1", Some(48.85), Some(2.35))]),
    )
    .await;

    let (status, json) = get_json(app_for(&server), "/api/v1/world").await;

    assert_eq!(status, StatusCode::OK);
    let asset = &json["data"]["assets"][0];
    assert_eq!(asset["lat"], 48.85);
    assert_eq!(asset["lng"], 2.35);
}

#[tokio::test]
async fn world_store_failure_is_server_error() {
    let server = MockServer::start().await;
    mount_failure(&server).await;

    let (status, _) = get_json(app_for(&server), "/api/v1/world").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
