//! Request/response hooks that run around every call.
//!
//! DESIGN
//! ======
//! A [`MiddlewareChain`] is an ordered list of [`Middleware`]. Request hooks
//! run in registration order; response and error hooks run in reverse, so the
//! first middleware registered sees the request first and the outcome last.
//!
//! The default chain is:
//! 1. [`RequestTiming`]: start time on send, elapsed time and a log line on
//!    completion;
//! 2. [`BearerAuth`]: `Authorization: Bearer <token>` when a token is stored;
//! 3. [`SessionGuard`]: 401 clears the token and redirects to login; 403 and
//!    5xx are logged.
//!
//! Hooks observe. None of the built-ins alter a body or an error value.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::error::ApiError;
use crate::redirect::Navigator;
use crate::request::{ApiRequest, ApiResponse};
use crate::session::SessionStore;
use crate::timing::RequestTimings;

pub trait Middleware: Send + Sync {
    /// Adjust an outgoing request in place. An error rejects the call before
    /// it reaches the transport.
    ///
    /// # Errors
    ///
    /// Implementations return an error to abort the request.
    fn on_request(&self, _request: &mut ApiRequest) -> Result<(), ApiError> {
        Ok(())
    }

    fn on_response(&self, _request: &ApiRequest, response: ApiResponse) -> ApiResponse {
        response
    }

    fn on_error(&self, _request: &ApiRequest, error: ApiError) -> ApiError {
        error
    }
}

// =============================================================================
// CHAIN
// =============================================================================

#[derive(Clone, Default)]
pub struct MiddlewareChain {
    layers: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, middleware: Arc<dyn Middleware>) {
        self.layers.push(middleware);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Run request hooks in order.
    ///
    /// If a hook fails, the error hooks of every layer still run so that
    /// per-request bookkeeping is released. They see the request as the
    /// earlier hooks left it.
    ///
    /// # Errors
    ///
    /// Returns the (error-hook-processed) error of the first failing hook.
    pub fn run_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        for layer in &self.layers {
            if let Err(error) = layer.on_request(request) {
                return Err(self.run_error(request, error));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn run_response(&self, request: &ApiRequest, mut response: ApiResponse) -> ApiResponse {
        for layer in self.layers.iter().rev() {
            response = layer.on_response(request, response);
        }
        response
    }

    #[must_use]
    pub fn run_error(&self, request: &ApiRequest, mut error: ApiError) -> ApiError {
        for layer in self.layers.iter().rev() {
            error = layer.on_error(request, error);
        }
        error
    }
}

// =============================================================================
// TIMING + LOGGING
// =============================================================================

pub struct RequestTiming {
    timings: Arc<RequestTimings>,
}

impl RequestTiming {
    #[must_use]
    pub fn new(timings: Arc<RequestTimings>) -> Self {
        Self { timings }
    }
}

impl Middleware for RequestTiming {
    fn on_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        self.timings.start(&request.id);
        tracing::debug!(
            request_id = %request.id,
            method = %request.method,
            path = %request.path,
            "api request"
        );
        Ok(())
    }

    fn on_response(&self, request: &ApiRequest, mut response: ApiResponse) -> ApiResponse {
        let elapsed = self.timings.finish(&request.id);
        tracing::info!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "api response"
        );
        response.elapsed = Some(elapsed);
        response
    }

    fn on_error(&self, request: &ApiRequest, error: ApiError) -> ApiError {
        let elapsed = self.timings.finish(&request.id);
        tracing::error!(
            method = %request.method,
            path = %request.path,
            status = ?error.status(),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            error = %error,
            "api error"
        );
        error
    }
}

// =============================================================================
// BEARER AUTH
// =============================================================================

pub struct BearerAuth {
    session: Arc<dyn SessionStore>,
}

impl BearerAuth {
    #[must_use]
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }
}

impl Middleware for BearerAuth {
    fn on_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::Client("stored token is not a valid header value".to_owned()))?;
            request.headers.insert(AUTHORIZATION, value);
        }
        Ok(())
    }
}

// =============================================================================
// SESSION GUARD
// =============================================================================

pub struct SessionGuard {
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    login_url: String,
}

impl SessionGuard {
    #[must_use]
    pub fn new(session: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>, login_url: impl Into<String>) -> Self {
        Self { session, navigator, login_url: login_url.into() }
    }
}

impl Middleware for SessionGuard {
    fn on_error(&self, request: &ApiRequest, error: ApiError) -> ApiError {
        match error.status() {
            Some(401) => {
                if let Err(e) = self.session.clear_token() {
                    tracing::warn!(error = %e, "failed to clear session token");
                }
                tracing::warn!(path = %request.path, login_url = %self.login_url, "unauthorized; session cleared");
                self.navigator.redirect(&self.login_url);
            }
            Some(403) => tracing::error!(path = %request.path, "access forbidden"),
            Some(status) if status >= 500 => tracing::error!(path = %request.path, status, "server error occurred"),
            _ => {}
        }
        error
    }
}

#[cfg(test)]
#[path = "middleware_test.rs"]
mod tests;
