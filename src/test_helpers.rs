//! Scripted transport and client wiring shared by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::redirect::RecordingNavigator;
use crate::request::{ApiRequest, ApiResponse};
use crate::session::MemorySessionStore;
use crate::transport::Transport;

/// Returns queued outcomes in order, then `200 {}` once the queue is empty.
/// Every request it sees is kept for inspection.
#[derive(Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, status: u16, body: &serde_json::Value) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body.to_string())));
    }

    pub fn push_raw(&self, response: ApiResponse) {
        self.outcomes.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self, error: ApiError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.seen.lock().unwrap().last().cloned().expect("no request sent")
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.seen.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(200, "{}")))
    }
}

pub struct Harness {
    pub client: ApiClient,
    pub transport: Arc<MockTransport>,
    pub session: Arc<MemorySessionStore>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness() -> Harness {
    let transport = Arc::new(MockTransport::new());
    let session = Arc::new(MemorySessionStore::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ApiClient::builder(ApiConfig::new("http://mock.test/api"))
        .transport(transport.clone())
        .session(session.clone())
        .navigator(navigator.clone())
        .build()
        .unwrap();
    Harness { client, transport, session, navigator }
}
