use serde::Serialize;

use super::types::PasswordChange;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse, MultipartForm, UploadFile};

pub struct User<'a> {
    client: &'a ApiClient,
}

impl<'a> User<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn profile(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/user/profile").await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn update_profile<T: Serialize + ?Sized>(&self, profile: &T) -> Result<ApiResponse, ApiError> {
        self.client.put("/user/profile", profile).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn change_password(&self, change: &PasswordChange) -> Result<ApiResponse, ApiError> {
        self.client.put("/user/change-password", change).await
    }

    /// `POST /user/avatar` as multipart field `avatar`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn upload_avatar(&self, file: UploadFile) -> Result<ApiResponse, ApiError> {
        let form = MultipartForm::new().file("avatar", file);
        self.client.send(ApiRequest::post("/user/avatar").multipart(form)).await
    }
}
