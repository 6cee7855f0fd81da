use super::*;
use crate::request::{MultipartForm, UploadFile};
use crate::session::SessionStore;
use crate::test_helpers::harness;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde_json::json;

fn auth_header(req: &ApiRequest) -> Option<String> {
    req.headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

// =============================================================================
// bearer token
// =============================================================================

#[tokio::test]
async fn stored_token_is_sent_as_bearer() {
    let h = harness();
    h.session.set_token("tok-1").unwrap();
    h.client.get("/user/profile").await.unwrap();
    assert_eq!(auth_header(&h.transport.last()).as_deref(), Some("Bearer tok-1"));
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let h = harness();
    h.client.get("/legal/lawyers").await.unwrap();
    assert_eq!(auth_header(&h.transport.last()), None);
}

#[tokio::test]
async fn token_change_applies_to_next_request() {
    let h = harness();
    h.session.set_token("old").unwrap();
    h.client.get("/a").await.unwrap();
    h.session.set_token("new").unwrap();
    h.client.get("/b").await.unwrap();
    let seen = h.transport.requests();
    assert_eq!(auth_header(&seen[0]).as_deref(), Some("Bearer old"));
    assert_eq!(auth_header(&seen[1]).as_deref(), Some("Bearer new"));
}

// =============================================================================
// status handling
// =============================================================================

#[tokio::test]
async fn unauthorized_from_any_endpoint_clears_session() {
    for path in ["/complaints", "/payments/transactions", "/admin/reports"] {
        let h = harness();
        h.session.set_token("stale").unwrap();
        h.transport.push_response(401, &json!({ "message": "expired" }));

        let err = h.client.get(path).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(h.session.token(), None, "token kept after 401 on {path}");
        assert_eq!(h.navigator.locations(), vec!["/auth/login".to_owned()]);
    }
}

#[tokio::test]
async fn forbidden_and_server_errors_keep_status_and_body() {
    for status in [403_u16, 500, 502] {
        let h = harness();
        h.session.set_token("valid").unwrap();
        h.transport.push_response(status, &json!({ "message": "nope", "code": status }));

        let err = h.client.get("/admin/dashboard/stats").await.unwrap_err();
        let resp = err.response().expect("status error");
        assert_eq!(resp.status, status);
        assert_eq!(resp.json_value(), Some(json!({ "message": "nope", "code": status })));
        assert_eq!(h.session.token().as_deref(), Some("valid"));
        assert!(h.navigator.locations().is_empty());
    }
}

#[tokio::test]
async fn other_statuses_propagate_unchanged() {
    let h = harness();
    h.transport.push_response(404, &json!({ "message": "x" }));
    let err = h.client.get("/complaints/missing").await.unwrap_err();
    assert!(err.is_client_error());
    assert_eq!(crate::error::handle_api_error(&err).message, "x");
}

#[tokio::test]
async fn transport_errors_are_returned() {
    let h = harness();
    h.transport.push_error(ApiError::Network { message: "refused".into(), timed_out: false });
    let err = h.client.get("/complaints").await.unwrap_err();
    assert!(err.is_network_error());
}

#[tokio::test]
async fn success_response_body_is_untouched() {
    let h = harness();
    h.transport.push_response(201, &json!({ "id": "CMP-1" }));
    let resp = h.client.post("/complaints", &json!({ "title": "streetlight" })).await.unwrap();
    assert_eq!(resp.status, 201);
    assert_eq!(resp.json_value(), Some(json!({ "id": "CMP-1" })));
    assert!(resp.elapsed.is_some());
}

// =============================================================================
// bookkeeping
// =============================================================================

#[tokio::test]
async fn timing_entries_released_on_every_outcome() {
    let h = harness();
    h.transport.push_response(200, &json!({}));
    h.transport.push_response(500, &json!({}));
    h.transport.push_error(ApiError::Network { message: "reset".into(), timed_out: false });

    let _ = h.client.get("/a").await;
    let _ = h.client.get("/b").await;
    let _ = h.client.get("/c").await;
    assert_eq!(h.client.in_flight(), 0);
}

#[tokio::test]
async fn each_request_gets_a_fresh_id() {
    let h = harness();
    h.client.get("/complaints").await.unwrap();
    h.client.get("/complaints").await.unwrap();
    let seen = h.transport.requests();
    assert!(seen[0].id.starts_with("get_/complaints_"));
    assert_ne!(seen[0].id, seen[1].id);
}

#[tokio::test]
async fn concurrent_calls_complete_independently() {
    let h = harness();
    let calls = (0..8).map(|i| {
        let client = h.client.clone();
        async move { client.get(&format!("/complaints/{i}")).await }
    });
    let results = futures::future::join_all(calls).await;
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(h.transport.requests().len(), 8);
    assert_eq!(h.client.in_flight(), 0);
}

// =============================================================================
// default headers
// =============================================================================

#[tokio::test]
async fn json_content_type_is_default() {
    let h = harness();
    h.client.post("/auth/send-otp", &json!({ "phone": "1" })).await.unwrap();
    assert_eq!(
        h.transport.last().headers.get(CONTENT_TYPE),
        Some(&HeaderValue::from_static("application/json"))
    );
}

#[tokio::test]
async fn multipart_requests_skip_json_content_type() {
    let h = harness();
    let form = MultipartForm::new().file("file", UploadFile::new("a.txt", b"hi".to_vec()));
    h.client.send(ApiRequest::post("/files/upload").multipart(form)).await.unwrap();
    assert!(h.transport.last().headers.get(CONTENT_TYPE).is_none());
}

#[tokio::test]
async fn explicit_header_wins_over_default() {
    let h = harness();
    let mut req = ApiRequest::post("/x").json_value(json!({}));
    req.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/merge-patch+json"));
    h.client.send(req).await.unwrap();
    assert_eq!(
        h.transport.last().headers.get(CONTENT_TYPE),
        Some(&HeaderValue::from_static("application/merge-patch+json"))
    );
}

// =============================================================================
// custom middleware
// =============================================================================

struct Tag;

impl Middleware for Tag {
    fn on_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        request.headers.insert("x-client", HeaderValue::from_static("nyayasetu-test"));
        Ok(())
    }
}

#[tokio::test]
async fn appended_middleware_runs_after_builtins() {
    let transport = std::sync::Arc::new(crate::test_helpers::MockTransport::new());
    let client = ApiClient::builder(ApiConfig::new("http://mock.test/api"))
        .transport(transport.clone())
        .middleware(std::sync::Arc::new(Tag))
        .build()
        .unwrap();
    client.delete("/files/f1").await.unwrap();
    let seen = transport.last();
    assert_eq!(seen.method, reqwest::Method::DELETE);
    assert_eq!(seen.headers.get("x-client"), Some(&HeaderValue::from_static("nyayasetu-test")));
}
