use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse, path_segment};

pub struct Notifications<'a> {
    client: &'a ApiClient,
}

impl<'a> Notifications<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn list(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/notifications").await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn mark_read(&self, id: &str) -> Result<ApiResponse, ApiError> {
        let path = format!("/notifications/{}/read", path_segment(id));
        self.client.send(ApiRequest::put(path)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn mark_all_read(&self) -> Result<ApiResponse, ApiError> {
        self.client.send(ApiRequest::put("/notifications/read-all")).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn settings(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/notifications/settings").await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn update_settings<T: Serialize + ?Sized>(&self, settings: &T) -> Result<ApiResponse, ApiError> {
        self.client.put("/notifications/settings", settings).await
    }
}
