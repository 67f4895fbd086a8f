use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use qtify::{db::entities::room, test_helpers::test_router};

// Spotify base URL for tests that must not talk to anything.
const NO_SERVER: &str = "http://127.0.0.1:1";

fn live_room(id: &str) -> room::Model {
    let now = Utc::now().fixed_offset();
    room::Model {
        id: id.to_string(),
        access_token: "access-token".to_string(),
        refresh_token: "refresh-token".to_string(),
        token_expires_at: now + Duration::hours(1),
        expires_at: now + Duration::hours(6),
        qr_code_path: None,
        created_at: now,
    }
}

fn expired_room(id: &str) -> room::Model {
    let mut model = live_room(id);
    model.expires_at = Utc::now().fixed_offset() - Duration::hours(1);
    model
}

fn app_without_rooms(spotify_base: &str) -> Router {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<room::Model>::new()])
        .into_connection();
    test_router(db, spotify_base)
}

fn app_with_room(model: room::Model, spotify_base: &str) -> Router {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();
    test_router(db, spotify_base)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

fn set_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ")
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    String::from_utf8_lossy(&bytes).into_owned()
}

#[tokio::test]
async fn index_renders_landing_page() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_router(db, NO_SERVER);

    let response = app.oneshot(get("/")).await.expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("QTify"));
    assert!(html.contains("/auth"));
}

#[tokio::test]
async fn unknown_room_redirects_home_with_flash() {
    let app = app_without_rooms(NO_SERVER);

    let response = app
        .oneshot(get("/123456"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookies = set_cookie(&response);
    assert!(cookies.contains("qtify_flash=error"));
    assert!(cookies.contains("404"));
}

#[tokio::test]
async fn expired_room_redirects_home_with_flash() {
    let app = app_with_room(expired_room("123456"), NO_SERVER);

    let response = app
        .oneshot(get("/123456"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(set_cookie(&response).contains("410"));
}

#[tokio::test]
async fn live_room_page_renders() {
    let room = live_room("654321");
    let expires_label = room.expires_at.format("%a %H:%M").to_string();
    let app = app_with_room(room, NO_SERVER);

    let response = app
        .oneshot(get("/654321"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Room 654321"));
    assert!(html.contains("654321/join"));
    // The expiry is shown with the weekday so it cannot be misread as a
    // time earlier today.
    assert!(html.contains(&expires_label));
}

#[tokio::test]
async fn stale_access_token_is_refreshed_before_the_page_renders() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-access",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut stale = live_room("123456");
    stale.token_expires_at = Utc::now().fixed_offset() - Duration::minutes(5);
    let mut refreshed = stale.clone();
    refreshed.access_token = "fresh-access".to_string();
    refreshed.token_expires_at = Utc::now().fixed_offset() + Duration::hours(1);

    // Lookup by the guard, lookup for the token update, the update itself.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stale.clone()], vec![stale], vec![refreshed]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = test_router(db, &server.uri());

    let response = app
        .oneshot(get("/123456"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Room 123456"));
}

#[tokio::test]
async fn search_returns_tracks_from_the_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "daft punk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": {
                "items": [{
                    "name": "Around the World",
                    "uri": "spotify:track:abc123",
                    "duration_ms": 200000,
                    "artists": [{ "name": "Daft Punk" }],
                    "album": { "name": "Homework", "images": [] }
                }]
            }
        })))
        .mount(&server)
        .await;

    let app = app_with_room(live_room("123456"), &server.uri());
    let response = app
        .oneshot(get("/123456/search?q=daft%20punk"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("body should be json");
    assert_eq!(json["data"][0]["name"], "Around the World");
    assert_eq!(json["data"][0]["uri"], "spotify:track:abc123");
}

#[tokio::test]
async fn search_rejects_an_empty_query() {
    let app = app_with_room(live_room("123456"), NO_SERVER);

    let response = app
        .oneshot(get("/123456/search?q=%20"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("body should be json");
    assert_eq!(json["message"], "search query must not be empty");
}

#[tokio::test]
async fn queueing_a_track_flashes_success_and_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/me/player/queue"))
        .and(query_param("uri", "spotify:track:abc123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_with_room(live_room("123456"), &server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/123456")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("uri=spotify%3Atrack%3Aabc123"))
                .unwrap(),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/123456");
    assert!(set_cookie(&response).contains("qtify_flash=success"));
}

#[tokio::test]
async fn queueing_a_malformed_uri_is_rejected_without_an_upstream_call() {
    let app = app_with_room(live_room("123456"), NO_SERVER);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/123456")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("uri=not-a-track"))
                .unwrap(),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/123456");
    let cookies = set_cookie(&response);
    assert!(cookies.contains("qtify_flash=error"));
    assert!(cookies.contains("400"));
}

#[tokio::test]
async fn now_playing_is_null_when_nothing_plays() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let app = app_with_room(live_room("123456"), &server.uri());
    let response = app
        .oneshot(get("/123456/now-playing"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value =
        serde_json::from_str(&body_string(response).await).expect("body should be json");
    assert!(json["data"].is_null());
}

#[tokio::test]
async fn auth_redirects_to_spotify_with_a_state_cookie() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_router(db, "https://accounts.example");

    let response = app
        .oneshot(get("/auth"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("https://accounts.example/authorize/?client_id="));
    assert!(location(&response).contains("response_type=code"));
    assert!(set_cookie(&response).contains("qtify_oauth_state="));
}

#[tokio::test]
async fn callback_rejects_a_state_mismatch() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_router(db, NO_SERVER);

    let response = app
        .oneshot(get("/auth/callback?state=forged&code=whatever"))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookies = set_cookie(&response);
    assert!(cookies.contains("qtify_flash=error"));
    assert!(cookies.contains("400"));
}

#[tokio::test]
async fn callback_without_a_code_reports_denied_authorization() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_router(db, NO_SERVER);

    // A state cookie is present and matches, but Spotify sent an error
    // instead of a code.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/callback?state=nonce&error=access_denied")
                .header("cookie", "qtify_oauth_state=nonce")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(set_cookie(&response).contains("401"));
}

#[tokio::test]
async fn flash_messages_surface_on_the_next_index_render() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_router(db, NO_SERVER);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(
                    "cookie",
                    "qtify_flash=error:This%20room%20has%20expired.%20%28Error%20410%29",
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    // The message is rendered and the cookie cleared.
    assert!(set_cookie(&response).contains("qtify_flash=;"));
    let html = body_string(response).await;
    assert!(html.contains("This room has expired. (Error 410)"));
}
