use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse, MultipartForm, ProgressFn, UploadFile, path_segment};

pub struct Files<'a> {
    client: &'a ApiClient,
}

impl<'a> Files<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /files/upload` as multipart field `file`, plus `folder` when
    /// given. `progress` receives 0..=100 as the file streams out; without
    /// one, progress is logged at debug level.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn upload(
        &self,
        file: UploadFile,
        folder: Option<&str>,
        progress: Option<ProgressFn>,
    ) -> Result<ApiResponse, ApiError> {
        let mut form = MultipartForm::new().file("file", file);
        if let Some(folder) = folder {
            form = form.text("folder", folder);
        }
        let mut request = ApiRequest::post("/files/upload").multipart(form);
        if let Some(progress) = progress {
            request = request.on_progress(progress);
        }
        self.client.send(request).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete(&self, file_id: &str) -> Result<ApiResponse, ApiError> {
        self.client.delete(&format!("/files/{}", path_segment(file_id))).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn signed_url(&self, file_id: &str) -> Result<ApiResponse, ApiError> {
        self.client.get(&format!("/files/{}/signed-url", path_segment(file_id))).await
    }
}
