use serde::Serialize;

use super::types::ComplaintQuery;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse, MultipartForm, UploadFile, path_segment};

pub struct Complaints<'a> {
    client: &'a ApiClient,
}

impl<'a> Complaints<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /complaints` with optional paging and filters.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn list(&self, query: &ComplaintQuery) -> Result<ApiResponse, ApiError> {
        self.client.send(ApiRequest::get("/complaints").query(query)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.client.get(&format!("/complaints/{}", path_segment(id))).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn create<T: Serialize + ?Sized>(&self, complaint: &T) -> Result<ApiResponse, ApiError> {
        self.client.post("/complaints", complaint).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn update<T: Serialize + ?Sized>(&self, id: &str, changes: &T) -> Result<ApiResponse, ApiError> {
        self.client.put(&format!("/complaints/{}", path_segment(id)), changes).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.client.delete(&format!("/complaints/{}", path_segment(id))).await
    }

    /// `POST /complaints/:id/attachments` as multipart field `attachment`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn upload_attachment(&self, complaint_id: &str, file: UploadFile) -> Result<ApiResponse, ApiError> {
        let path = format!("/complaints/{}/attachments", path_segment(complaint_id));
        let form = MultipartForm::new().file("attachment", file);
        self.client.send(ApiRequest::post(path).multipart(form)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn stats(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/complaints/stats").await
    }

    /// Public tracking lookup by tracking id.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn track(&self, tracking_id: &str) -> Result<ApiResponse, ApiError> {
        self.client.get(&format!("/complaints/track/{}", path_segment(tracking_id))).await
    }
}
