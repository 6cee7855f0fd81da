//! NyayaSetu API client.
//!
//! One configured [`ApiClient`] reaches the citizen-services backend. It
//! attaches the stored bearer token, times and logs every call, and turns
//! failures into an [`ApiError`] that [`handle_api_error`] can flatten for
//! display. [`ApiService`] layers the namespaced endpoint surface (auth,
//! user, complaints, legal, payments, admin, notifications, chat, files) on
//! top.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use nyayasetu::{ApiClient, ApiConfig, ApiService, FileSessionStore};
//! use nyayasetu::service::types::LoginCredentials;
//!
//! # async fn demo() -> Result<(), nyayasetu::ApiError> {
//! let client = ApiClient::builder(ApiConfig::from_env())
//!     .session(Arc::new(FileSessionStore::new(".nyayasetu/session.json")))
//!     .build()?;
//! let api = ApiService::new(client);
//! api.auth()
//!     .login(&LoginCredentials { email: "asha@example.in".into(), password: "secret".into() })
//!     .await?;
//! let profile: serde_json::Value = api.user().profile().await?.json()?;
//! # let _ = profile;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod redirect;
pub mod request;
pub mod service;
pub mod session;
pub mod timing;
pub mod transport;

#[cfg(test)]
mod test_helpers;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::ApiConfig;
pub use error::{ApiError, ErrorInfo, handle_api_error, is_client_error, is_network_error, is_server_error};
pub use middleware::Middleware;
pub use redirect::{LogNavigator, Navigator, RecordingNavigator};
pub use request::{ApiRequest, ApiResponse, MultipartForm, ProgressFn, UploadFile, upload_progress};
pub use service::ApiService;
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
pub use transport::{ReqwestTransport, Transport};
