//! Error type for API calls and the helpers that classify it.
//!
//! ERROR HANDLING
//! ==============
//! Three kinds of failure reach callers:
//! - server-responded: [`ApiError::Status`] keeps the whole response so the
//!   status code and body survive the middleware chain untouched;
//! - network: the request never got an answer (refused, reset, timed out);
//! - client-side: anything raised locally before or after the network call.
//!
//! [`handle_api_error`] flattens any of them into an [`ErrorInfo`] suitable
//! for showing to a user.

use serde::Serialize;
use serde_json::Value;

use crate::request::ApiResponse;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
pub const DEFAULT_SERVER_MESSAGE: &str = "An error occurred";
pub const DEFAULT_CLIENT_MESSAGE: &str = "An unexpected error occurred";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("server responded with status {}", .0.status)]
    Status(Box<ApiResponse>),

    /// No response arrived.
    #[error("network error: {message}")]
    Network { message: String, timed_out: bool },

    /// A local failure, such as a bad request body or an unusable client.
    #[error("{0}")]
    Client(String),

    /// The response body could not be decoded into the expected type.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Response status, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(resp) => Some(resp.status),
            _ => None,
        }
    }

    #[must_use]
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Status(resp) => Some(resp.as_ref()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s >= 500)
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// True whenever no response arrived, including calls that failed
    /// locally before or after the wire.
    #[must_use]
    pub fn is_network_error(&self) -> bool {
        self.response().is_none()
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { timed_out: true, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            return Self::Client(error.to_string());
        }
        if error.is_decode() {
            return Self::Decode(error.to_string());
        }
        Self::Network { message: error.to_string(), timed_out: error.is_timeout() }
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// User-presentable summary of a failed call.
///
/// `status` is the HTTP status, `0` for network failures, `-1` for
/// client-side failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub status: i32,
    pub message: String,
    pub errors: Option<Value>,
}

#[must_use]
pub fn handle_api_error(error: &ApiError) -> ErrorInfo {
    match error {
        ApiError::Status(resp) => {
            let body = resp.json_value();
            let message = body
                .as_ref()
                .and_then(|b| b.get("message"))
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_SERVER_MESSAGE)
                .to_owned();
            let errors = body
                .as_ref()
                .and_then(|b| b.get("errors"))
                .filter(|e| !e.is_null())
                .cloned();
            ErrorInfo { status: i32::from(resp.status), message, errors }
        }
        ApiError::Network { .. } => ErrorInfo { status: 0, message: NETWORK_ERROR_MESSAGE.to_owned(), errors: None },
        ApiError::Client(_) | ApiError::Decode(_) => {
            let text = error.to_string();
            let message = if text.is_empty() { DEFAULT_CLIENT_MESSAGE.to_owned() } else { text };
            ErrorInfo { status: -1, message, errors: None }
        }
    }
}

#[must_use]
pub fn is_server_error(error: &ApiError) -> bool {
    error.is_server_error()
}

#[must_use]
pub fn is_client_error(error: &ApiError) -> bool {
    error.is_client_error()
}

#[must_use]
pub fn is_network_error(error: &ApiError) -> bool {
    error.is_network_error()
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
