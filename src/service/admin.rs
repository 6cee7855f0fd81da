use serde_json::Value;

use super::types::{AdminComplaintQuery, Assignment, ExportFormat, ReportKind, StatusUpdate};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse, path_segment};

pub struct Admin<'a> {
    client: &'a ApiClient,
}

impl<'a> Admin<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn dashboard_stats(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/admin/dashboard/stats").await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn complaints(&self, query: &AdminComplaintQuery) -> Result<ApiResponse, ApiError> {
        self.client.send(ApiRequest::get("/admin/complaints").query(query)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn update_complaint_status(&self, id: &str, status: &str, notes: Option<&str>) -> Result<ApiResponse, ApiError> {
        let body = StatusUpdate { status: status.to_owned(), notes: notes.map(str::to_owned) };
        self.client
            .put(&format!("/admin/complaints/{}/status", path_segment(id)), &body)
            .await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn assign_complaint(
        &self,
        id: &str,
        department_id: &str,
        assignee_id: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let body = Assignment { department_id: department_id.to_owned(), assignee_id: assignee_id.map(str::to_owned) };
        self.client
            .put(&format!("/admin/complaints/{}/assign", path_segment(id)), &body)
            .await
    }

    /// `POST /admin/reports/:type` with optional report parameters.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn generate_report(&self, kind: ReportKind, params: Option<&Value>) -> Result<ApiResponse, ApiError> {
        let mut request = ApiRequest::post(format!("/admin/reports/{}", kind.as_str()));
        if let Some(params) = params {
            request = request.json_value(params.clone());
        }
        self.client.send(request).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn reports(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/admin/reports").await
    }

    /// Download a rendered report. The body is binary; read it with
    /// [`ApiResponse::bytes`].
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn export_report(&self, report_id: &str, format: ExportFormat) -> Result<ApiResponse, ApiError> {
        self.client
            .get(&format!("/admin/reports/{}/export/{}", path_segment(report_id), format.as_str()))
            .await
    }
}
