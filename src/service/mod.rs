//! Namespaced endpoint surface over [`ApiClient`].
//!
//! DESIGN
//! ======
//! Every method maps to exactly one REST path and verb and returns the raw
//! [`ApiResponse`](crate::request::ApiResponse); decoding the body is left to
//! the caller. Namespaces are borrowed views, so creating one is free:
//!
//! ```no_run
//! # async fn demo(api: &nyayasetu::ApiService) -> Result<(), nyayasetu::ApiError> {
//! let stats = api.complaints().stats().await?;
//! # let _ = stats;
//! # Ok(())
//! # }
//! ```
//!
//! Caller-supplied ids are percent-encoded before being placed in a path.

pub mod admin;
pub mod auth;
pub mod chat;
pub mod complaints;
pub mod files;
pub mod legal;
pub mod notifications;
pub mod payments;
pub mod types;
pub mod user;

use crate::client::ApiClient;

pub use admin::Admin;
pub use auth::Auth;
pub use chat::Chat;
pub use complaints::Complaints;
pub use files::Files;
pub use legal::Legal;
pub use notifications::Notifications;
pub use payments::Payments;
pub use user::User;

#[derive(Clone)]
pub struct ApiService {
    client: ApiClient,
}

impl ApiService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn auth(&self) -> Auth<'_> {
        Auth::new(&self.client)
    }

    #[must_use]
    pub fn user(&self) -> User<'_> {
        User::new(&self.client)
    }

    #[must_use]
    pub fn complaints(&self) -> Complaints<'_> {
        Complaints::new(&self.client)
    }

    #[must_use]
    pub fn legal(&self) -> Legal<'_> {
        Legal::new(&self.client)
    }

    #[must_use]
    pub fn payments(&self) -> Payments<'_> {
        Payments::new(&self.client)
    }

    #[must_use]
    pub fn admin(&self) -> Admin<'_> {
        Admin::new(&self.client)
    }

    #[must_use]
    pub fn notifications(&self) -> Notifications<'_> {
        Notifications::new(&self.client)
    }

    #[must_use]
    pub fn chat(&self) -> Chat<'_> {
        Chat::new(&self.client)
    }

    #[must_use]
    pub fn files(&self) -> Files<'_> {
        Files::new(&self.client)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
