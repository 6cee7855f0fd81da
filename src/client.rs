//! The configured API client.
//!
//! DESIGN
//! ======
//! One `ApiClient` per backend. It owns the immutable config, the token
//! store, the middleware chain and the transport. Cloning is cheap and
//! clones share all of them.
//!
//! Each call is independent: send, await, classify. There is no retry,
//! caching, deduplication or queuing here; callers own that policy.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::middleware::{BearerAuth, Middleware, MiddlewareChain, RequestTiming, SessionGuard};
use crate::redirect::{LogNavigator, Navigator};
use crate::request::{ApiRequest, ApiResponse, RequestBody, request_id};
use crate::session::{MemorySessionStore, SessionStore};
use crate::timing::RequestTimings;
use crate::transport::{ReqwestTransport, Transport};

#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ApiConfig>,
    session: Arc<dyn SessionStore>,
    timings: Arc<RequestTimings>,
    chain: MiddlewareChain,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    #[must_use]
    pub fn builder(config: ApiConfig) -> ApiClientBuilder {
        ApiClientBuilder {
            config,
            session: None,
            navigator: None,
            transport: None,
            extra: Vec::new(),
        }
    }

    /// Client configured from the environment, with an in-memory session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::builder(ApiConfig::from_env()).build()
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    /// Number of calls sent but not yet completed.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.timings.in_flight()
    }

    /// Run one request through the middleware chain and the transport.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] for non-2xx responses, network errors when no
    /// response arrives, client-side errors for local failures.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        request.id = request_id(&request.method, &request.path);
        self.apply_default_headers(&mut request);

        self.chain.run_request(&mut request)?;
        match self.transport.send(&request).await {
            Ok(response) if response.is_success() => Ok(self.chain.run_response(&request, response)),
            Ok(response) => Err(self.chain.run_error(&request, ApiError::Status(Box::new(response)))),
            Err(error) => Err(self.chain.run_error(&request, error)),
        }
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::get(path)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn put<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::delete(path)).await
    }

    fn apply_default_headers(&self, request: &mut ApiRequest) {
        let multipart = matches!(request.body, RequestBody::Multipart(_));
        for (name, value) in &self.config.default_headers {
            if multipart && name == CONTENT_TYPE {
                continue;
            }
            if !request.headers.contains_key(name) {
                request.headers.insert(name.clone(), value.clone());
            }
        }
    }
}

// =============================================================================
// BUILDER
// =============================================================================

pub struct ApiClientBuilder {
    config: ApiConfig,
    session: Option<Arc<dyn SessionStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    transport: Option<Arc<dyn Transport>>,
    extra: Vec<Arc<dyn Middleware>>,
}

impl ApiClientBuilder {
    /// Token store; defaults to [`MemorySessionStore`].
    #[must_use]
    pub fn session(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    /// Redirect sink for expired sessions; defaults to [`LogNavigator`].
    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Wire transport; defaults to [`ReqwestTransport`].
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Append a middleware after the built-in ones.
    #[must_use]
    pub fn middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.extra.push(middleware);
        self
    }

    /// # Errors
    ///
    /// Returns an error if the default transport cannot be built.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = Arc::new(self.config);
        let session: Arc<dyn SessionStore> = self.session.unwrap_or_else(|| Arc::new(MemorySessionStore::new()));
        let navigator: Arc<dyn Navigator> = self.navigator.unwrap_or_else(|| Arc::new(LogNavigator));
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(config.clone())?),
        };
        let timings = Arc::new(RequestTimings::new());

        let mut chain = MiddlewareChain::new();
        chain.push(Arc::new(RequestTiming::new(timings.clone())));
        chain.push(Arc::new(BearerAuth::new(session.clone())));
        chain.push(Arc::new(SessionGuard::new(session.clone(), navigator, config.login_url.clone())));
        for layer in self.extra {
            chain.push(layer);
        }

        Ok(ApiClient { config, session, timings, chain, transport })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
