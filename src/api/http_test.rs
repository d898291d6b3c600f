use super::*;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use axum::routing::get;
use serde_json::json;

// =========================================================================
// Mock board server
// =========================================================================

#[derive(Clone, Default)]
struct Recorded {
    posts: Arc<Mutex<Vec<RecordedPost>>>,
}

#[derive(Clone, Debug)]
struct RecordedPost {
    path: &'static str,
    content_type: Option<String>,
    cookie: Option<String>,
    body: String,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
}

async fn list_manage() -> Json<serde_json::Value> {
    Json(json!([
        { "msgid": 1, "time": "2024-01-01", "userName": "ann", "message": "first", "replymsg": "ok" },
        { "msgid": 2, "time": "2024-01-02", "userName": "bob", "message": "second", "replymsg": null }
    ]))
}

async fn record_manage(State(rec): State<Recorded>, headers: HeaderMap, body: String) -> Json<serde_json::Value> {
    rec.posts.lock().unwrap().push(RecordedPost {
        path: MANAGE_PATH,
        content_type: header(&headers, "content-type"),
        cookie: header(&headers, "cookie"),
        body,
    });
    Json(json!({ "ok": true }))
}

async fn list_messages() -> Json<serde_json::Value> {
    Json(json!([{ "time": 1_700_000_000, "message": "hello", "reply": null }]))
}

async fn record_message(State(rec): State<Recorded>, headers: HeaderMap, body: String) -> StatusCode {
    rec.posts.lock().unwrap().push(RecordedPost {
        path: MESSAGE_PATH,
        content_type: header(&headers, "content-type"),
        cookie: header(&headers, "cookie"),
        body,
    });
    StatusCode::OK
}

fn board_router(rec: Recorded) -> Router {
    Router::new()
        .route("/isadmin", get(|| async { Json(json!(true)) }))
        .route("/isuser", get(|| async { (StatusCode::UNAUTHORIZED, "login required") }))
        .route(MANAGE_PATH, get(list_manage).post(record_manage))
        .route(MESSAGE_PATH, get(list_messages).post(record_message))
        .with_state(rec)
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: &str, cookie: Option<&str>) -> HttpBoardApi {
    let config = BoardConfig {
        session_cookie: cookie.map(str::to_owned),
        ..BoardConfig::default()
    }
    .with_api_url(base_url)
    .unwrap();
    HttpBoardApi::new(&config).unwrap()
}

// =========================================================================
// Authorization
// =========================================================================

#[tokio::test]
async fn check_access_accepts_json_success() {
    let base = spawn(board_router(Recorded::default())).await;
    let api = client_for(&base, None);
    api.check_access(Role::Admin).await.unwrap();
}

#[tokio::test]
async fn check_access_rejects_non_success_status() {
    let base = spawn(board_router(Recorded::default())).await;
    let api = client_for(&base, None);
    let err = api.check_access(Role::User).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, ref body } if body == "login required"));
}

#[tokio::test]
async fn check_access_rejects_non_json_body() {
    let router = Router::new().route("/isadmin", get(|| async { "<html>sign in</html>" }));
    let base = spawn(router).await;
    let api = client_for(&base, None);
    let err = api.check_access(Role::Admin).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn unreachable_server_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client_for(&format!("http://{addr}"), None);
    let err = api.check_access(Role::Admin).await.unwrap_err();
    assert!(matches!(err, ApiError::Request(_)));
}

// =========================================================================
// Lists and submissions
// =========================================================================

#[tokio::test]
async fn manage_entries_parses_list_in_order() {
    let base = spawn(board_router(Recorded::default())).await;
    let api = client_for(&base, None);
    let entries = api.manage_entries().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].msgid, 1);
    assert_eq!(entries[0].reply_text(), Some("ok"));
    assert_eq!(entries[1].user_name, "bob");
    assert!(entries[1].reply_text().is_none());
}

#[tokio::test]
async fn message_entries_parses_list() {
    let base = spawn(board_router(Recorded::default())).await;
    let api = client_for(&base, None);
    let entries = api.message_entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].time, "1700000000");
}

#[tokio::test]
async fn post_reply_sends_json_object_with_cookie() {
    let rec = Recorded::default();
    let base = spawn(board_router(rec.clone())).await;
    let api = client_for(&base, Some("sid=s3cret"));

    let response = api
        .post_reply(&ReplyRequest { board_id: 2, reply: "thanks!".into() })
        .await
        .unwrap();
    assert_eq!(response, json!({ "ok": true }));

    let posts = rec.posts.lock().unwrap().clone();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].path, MANAGE_PATH);
    assert_eq!(posts[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(posts[0].cookie.as_deref(), Some("sid=s3cret"));
    let body: serde_json::Value = serde_json::from_str(&posts[0].body).unwrap();
    assert_eq!(body, json!({ "boardId": 2, "reply": "thanks!" }));
}

#[tokio::test]
async fn post_message_sends_bare_json_string() {
    let rec = Recorded::default();
    let base = spawn(board_router(rec.clone())).await;
    let api = client_for(&base, None);

    let response = api.post_message("say \"hi\"").await.unwrap();
    assert_eq!(response, serde_json::Value::Null);

    let posts = rec.posts.lock().unwrap().clone();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].path, MESSAGE_PATH);
    assert_eq!(posts[0].body, r#""say \"hi\"""#);
    assert!(posts[0].cookie.is_none());
}

// =========================================================================
// Parsing helpers
// =========================================================================

#[test]
fn check_status_passes_2xx_only() {
    assert_eq!(check_status(204, String::new()).unwrap(), "");
    assert!(matches!(check_status(302, "moved".into()), Err(ApiError::Status { status: 302, .. })));
    assert!(matches!(check_status(500, String::new()), Err(ApiError::Status { status: 500, .. })));
}

#[test]
fn parse_json_or_null_accepts_blank() {
    assert_eq!(parse_json_or_null("  ").unwrap(), serde_json::Value::Null);
    assert_eq!(parse_json_or_null("[1]").unwrap(), json!([1]));
    assert!(matches!(parse_json_or_null("ok"), Err(ApiError::Parse(_))));
}

#[test]
fn invalid_cookie_fails_client_build() {
    let config = BoardConfig { session_cookie: Some("bad\nvalue".into()), ..BoardConfig::default() };
    assert!(matches!(HttpBoardApi::new(&config), Err(ApiError::ClientBuild(_))));
}

#[test]
fn zero_timeout_fails_client_build() {
    let mut config = BoardConfig::default();
    config.timeouts.request_secs = 0;
    assert!(matches!(HttpBoardApi::new(&config), Err(ApiError::ClientBuild(_))));

    let mut config = BoardConfig::default();
    config.timeouts.connect_secs = 0;
    assert!(matches!(HttpBoardApi::new(&config), Err(ApiError::ClientBuild(_))));
}

#[test]
fn base_url_has_no_trailing_slash() {
    let api = client_for("http://127.0.0.1:9/", None);
    assert_eq!(api.base_url(), "http://127.0.0.1:9");
    assert_eq!(api.url(MANAGE_PATH), "http://127.0.0.1:9/board/manage");
}
