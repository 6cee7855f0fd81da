//! End-to-end pipeline tests: real `reqwest` transport against a local axum
//! server standing in for the backend.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use nyayasetu::service::types::{ComplaintQuery, LoginCredentials};
use nyayasetu::{
    ApiClient, ApiConfig, ApiService, FileSessionStore, ProgressFn, RecordingNavigator, SessionStore, UploadFile,
    handle_api_error,
};

async fn spawn_backend() -> String {
    let app = Router::new()
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "correct" {
                    (StatusCode::OK, Json(json!({ "token": "live-token" })))
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid credentials" })))
                }
            }),
        )
        .route(
            "/api/user/profile",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_owned();
                Json(json!({ "authorization": auth }))
            }),
        )
        .route(
            "/api/complaints",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Session expired" }))) }),
        )
        .route(
            "/api/admin/dashboard/stats",
            get(|| async { (StatusCode::FORBIDDEN, Json(json!({ "message": "Admins only" }))) }),
        )
        .route(
            "/api/complaints/stats",
            get(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "message": "Invalid range", "errors": { "from": ["must be a date"] } })),
                )
            }),
        )
        .route(
            "/api/files/upload",
            post(|headers: HeaderMap, body: Bytes| async move {
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_owned();
                let text = String::from_utf8_lossy(&body).into_owned();
                Json(json!({
                    "multipart": content_type.starts_with("multipart/form-data"),
                    "hasFolder": text.contains("name=\"folder\"") && text.contains("evidence"),
                    "hasFile": text.contains("filename=\"notes.txt\""),
                    "bytes": body.len(),
                }))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

struct Setup {
    api: ApiService,
    _session_dir: tempfile::TempDir,
    session: Arc<FileSessionStore>,
    navigator: Arc<RecordingNavigator>,
}

async fn setup() -> Setup {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let base = spawn_backend().await;
    let session_dir = tempfile::TempDir::new().unwrap();
    let session_path = session_dir.path().join("session.json");
    let session = Arc::new(FileSessionStore::new(session_path));
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ApiClient::builder(ApiConfig::new(base))
        .session(session.clone())
        .navigator(navigator.clone())
        .build()
        .unwrap();
    Setup { api: ApiService::new(client), _session_dir: session_dir, session, navigator }
}

#[tokio::test]
async fn login_then_authenticated_request_carries_bearer() {
    let s = setup().await;
    let creds = LoginCredentials { email: "asha@example.in".into(), password: "correct".into() };
    s.api.auth().login(&creds).await.unwrap();
    assert_eq!(s.session.token().as_deref(), Some("live-token"));

    let profile: Value = s.api.user().profile().await.unwrap().json().unwrap();
    assert_eq!(profile["authorization"], "Bearer live-token");
}

#[tokio::test]
async fn anonymous_request_has_no_authorization() {
    let s = setup().await;
    let profile: Value = s.api.user().profile().await.unwrap().json().unwrap();
    assert_eq!(profile["authorization"], "");
}

#[tokio::test]
async fn unauthorized_response_clears_persisted_token_and_redirects() {
    let s = setup().await;
    s.session.set_token("stale-token").unwrap();

    let err = s.api.complaints().list(&ComplaintQuery::default()).await.unwrap_err();
    let info = handle_api_error(&err);
    assert_eq!(info.status, 401);
    assert_eq!(info.message, "Session expired");
    assert_eq!(s.session.token(), None);
    assert_eq!(s.navigator.last().as_deref(), Some("/auth/login"));
}

#[tokio::test]
async fn forbidden_is_returned_with_body_and_session_kept() {
    let s = setup().await;
    s.session.set_token("valid").unwrap();

    let err = s.api.admin().dashboard_stats().await.unwrap_err();
    assert!(err.is_client_error());
    assert_eq!(err.response().unwrap().json_value(), Some(json!({ "message": "Admins only" })));
    assert_eq!(s.session.token().as_deref(), Some("valid"));
    assert!(s.navigator.locations().is_empty());
}

#[tokio::test]
async fn validation_errors_are_surfaced() {
    let s = setup().await;
    let err = s.api.complaints().stats().await.unwrap_err();
    let info = handle_api_error(&err);
    assert_eq!(info.status, 422);
    assert_eq!(info.errors, Some(json!({ "from": ["must be a date"] })));
}

#[tokio::test]
async fn upload_streams_multipart_and_reports_progress() {
    let s = setup().await;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let progress: ProgressFn = Arc::new(move |pct| sink.lock().unwrap().push(pct));

    let payload = vec![b'x'; 40 * 1024];
    let file = UploadFile::new("notes.txt", payload);
    let resp = s.api.files().upload(file, Some("evidence"), Some(progress)).await.unwrap();
    let body: Value = resp.json().unwrap();
    assert_eq!(body["multipart"], true);
    assert_eq!(body["hasFolder"], true);
    assert_eq!(body["hasFile"], true);

    let seen = seen.lock().unwrap().clone();
    assert!(!seen.is_empty());
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "progress went backwards: {seen:?}");
    assert_eq!(seen.last(), Some(&100));
}

#[tokio::test]
async fn failed_login_leaves_no_token() {
    let s = setup().await;
    let creds = LoginCredentials { email: "asha@example.in".into(), password: "wrong".into() };
    let err = s.api.auth().login(&creds).await.unwrap_err();
    assert_eq!(handle_api_error(&err).message, "Invalid credentials");
    assert_eq!(s.session.token(), None);
}
