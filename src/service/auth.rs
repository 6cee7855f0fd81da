//! `/auth/*` endpoints and the token lifecycle around them.

use serde::Serialize;
use serde_json::json;

use super::types::{LoginCredentials, OtpLogin, TokenBody};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse};

pub struct Auth<'a> {
    client: &'a ApiClient,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`. Stores the returned `token`, if any.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<ApiResponse, ApiError> {
        let resp = self.client.post("/auth/login", credentials).await?;
        self.remember_token(&resp);
        Ok(resp)
    }

    /// `POST /auth/login/otp`. Stores the returned `token`, if any.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn login_with_otp(&self, login: &OtpLogin) -> Result<ApiResponse, ApiError> {
        let resp = self.client.post("/auth/login/otp", login).await?;
        self.remember_token(&resp);
        Ok(resp)
    }

    /// `POST /auth/register` with a free-form registration payload.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn register<T: Serialize + ?Sized>(&self, user: &T) -> Result<ApiResponse, ApiError> {
        self.client.post("/auth/register", user).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn send_otp(&self, phone: &str) -> Result<ApiResponse, ApiError> {
        self.client.post("/auth/send-otp", &json!({ "phone": phone })).await
    }

    /// `POST /auth/logout`. The local token is cleared whatever the outcome.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn logout(&self) -> Result<ApiResponse, ApiError> {
        let result = self.client.send(ApiRequest::post("/auth/logout")).await;
        if let Err(e) = self.client.session().clear_token() {
            tracing::warn!(error = %e, "failed to clear session token on logout");
        }
        result
    }

    /// `POST /auth/refresh`. Stores the refreshed `token`, if any.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn refresh_token(&self) -> Result<ApiResponse, ApiError> {
        let resp = self.client.send(ApiRequest::post("/auth/refresh")).await?;
        self.remember_token(&resp);
        Ok(resp)
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn reset_password(&self, email: &str) -> Result<ApiResponse, ApiError> {
        self.client.post("/auth/reset-password", &json!({ "email": email })).await
    }

    fn remember_token(&self, resp: &ApiResponse) {
        let Ok(TokenBody { token: Some(token) }) = resp.json::<TokenBody>() else {
            return;
        };
        if token.is_empty() {
            return;
        }
        match self.client.session().set_token(&token) {
            Ok(()) => tracing::debug!("session token stored"),
            Err(e) => tracing::warn!(error = %e, "failed to store session token"),
        }
    }
}
