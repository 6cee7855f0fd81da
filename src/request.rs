//! Request and response values that flow through the middleware chain.
//!
//! DESIGN
//! ======
//! Requests are plain data: method, path relative to the base URL, query
//! pairs, headers, and a body. The client stamps the request id at send
//! time, so a request value can be built ahead of time and sent later.
//! Responses carry the raw body bytes; decoding is left to the caller.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Observer for upload progress, called with a 0..=100 percentage.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Clone)]
pub struct ApiRequest {
    /// Set by the client when the request is sent.
    pub id: String,
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: RequestBody,
    pub progress: Option<ProgressFn>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            progress: None,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns a client-side error if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Client(format!("invalid request body: {e}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn json_value(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Serialize `params` as query pairs, skipping `null` fields.
    ///
    /// # Errors
    ///
    /// Returns a client-side error if `params` is not a flat object.
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(params).map_err(|e| ApiError::Client(format!("invalid query: {e}")))?;
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    match value {
                        Value::Null => {}
                        Value::String(s) => self.query.push((key, s)),
                        Value::Bool(_) | Value::Number(_) => self.query.push((key, value.to_string())),
                        Value::Array(_) | Value::Object(_) => {
                            return Err(ApiError::Client(format!("query parameter `{key}` must be a scalar")));
                        }
                    }
                }
            }
            _ => return Err(ApiError::Client("query parameters must be an object".to_owned())),
        }
        Ok(self)
    }

    #[must_use]
    pub fn on_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("id", &self.id)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Identifier for one in-flight call: method, path, send time in epoch
/// millis, and a random suffix so same-millisecond calls stay distinct.
#[must_use]
pub fn request_id(method: &Method, path: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{path}_{millis}_{}", method.as_str().to_ascii_lowercase(), &suffix[..8])
}

/// Percent-encode a caller-supplied value for use as one path segment.
#[must_use]
pub fn path_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

// =============================================================================
// MULTIPART
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, UploadFile)>,
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn file(mut self, name: impl Into<String>, file: UploadFile) -> Self {
        self.files.push((name.into(), file));
        self
    }

    #[must_use]
    pub fn total_file_bytes(&self) -> u64 {
        self.files.iter().map(|(_, f)| f.len()).sum()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name).first_raw().map(str::to_owned);
        Self { file_name, content_type, bytes }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk into memory.
    ///
    /// # Errors
    ///
    /// Returns a client-side error if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Client(format!("failed to read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(file_name, bytes))
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

// =============================================================================
// PROGRESS
// =============================================================================

/// Percentage of `total` covered by `loaded`, rounded and clamped to 100.
///
/// An unknown (zero) total reports 0.
#[must_use]
pub fn upload_progress(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let total = u128::from(total);
    let pct = (u128::from(loaded) * 100 + total / 2) / total;
    u8::try_from(pct.min(100)).unwrap_or(100)
}

/// Progress observer used when the caller supplies none.
#[must_use]
pub fn log_progress() -> ProgressFn {
    Arc::new(|pct| tracing::debug!(progress = pct, "upload progress: {pct}%"))
}

// =============================================================================
// RESPONSE
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    /// Filled in by the timing middleware.
    pub elapsed: Option<Duration>,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, headers: HeaderMap::new(), body: body.into(), elapsed: None }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Body as a JSON value, or `None` when it is empty or not JSON.
    #[must_use]
    pub fn json_value(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }

    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
#[path = "request_test.rs"]
mod tests;
