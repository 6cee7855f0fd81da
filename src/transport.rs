//! The wire seam: turns an [`ApiRequest`] into an [`ApiResponse`].
//!
//! Non-2xx statuses come back as ordinary responses. Deciding what counts as
//! a failure is the client's job, so a mock transport only has to script
//! responses.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::StreamExt;
use reqwest::multipart::{Form, Part};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse, MultipartForm, ProgressFn, RequestBody, log_progress, upload_progress};

/// Upload chunk size; progress is reported once per chunk.
pub const UPLOAD_CHUNK_SIZE: usize = 16 * 1024;

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and collect the full response.
    ///
    /// # Errors
    ///
    /// Network-class errors when no response arrives; client-side errors when
    /// the request cannot be built.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

// =============================================================================
// REQWEST
// =============================================================================

pub struct ReqwestTransport {
    http: reqwest::Client,
    config: Arc<ApiConfig>,
}

impl ReqwestTransport {
    /// Build a transport with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns a client-side error if the HTTP client cannot be constructed.
    pub fn new(config: Arc<ApiConfig>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Client(format!("HTTP client build failed: {e}")))?;
        Ok(Self { http, config })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.config.url(&request.path);
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(value).map_err(|e| ApiError::Client(format!("invalid request body: {e}")))?;
                builder.body(bytes)
            }
            RequestBody::Multipart(form) => {
                let progress = request.progress.clone().unwrap_or_else(log_progress);
                builder.multipart(multipart_form(form, progress)?)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(ApiResponse { status, headers, body, elapsed: None })
    }
}

/// Build a reqwest form whose file parts stream in chunks, reporting the
/// share of all file bytes sent so far.
fn multipart_form(form: &MultipartForm, progress: ProgressFn) -> Result<Form, ApiError> {
    let total = form.total_file_bytes();
    let sent = Arc::new(AtomicU64::new(0));
    // No chunks will be streamed, so report once up front.
    if total == 0 {
        progress(upload_progress(0, 0));
    }

    let mut out = Form::new();
    for (name, value) in &form.fields {
        out = out.text(name.clone(), value.clone());
    }
    for (name, file) in &form.files {
        let chunks: Vec<Vec<u8>> = file
            .bytes
            .chunks(UPLOAD_CHUNK_SIZE)
            .map(<[u8]>::to_vec)
            .collect();
        let sent = sent.clone();
        let progress = progress.clone();
        let stream = futures::stream::iter(chunks).map(move |chunk| {
            let len = chunk.len() as u64;
            let loaded = sent.fetch_add(len, Ordering::Relaxed) + len;
            progress(upload_progress(loaded, total));
            Ok::<_, std::io::Error>(chunk)
        });

        let mut part = Part::stream_with_length(reqwest::Body::wrap_stream(stream), file.len())
            .file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| ApiError::Client(format!("invalid content type {content_type}: {e}")))?;
        }
        out = out.part(name.clone(), part);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
