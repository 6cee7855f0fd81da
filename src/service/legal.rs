use super::types::{ConsultationBooking, ConsultationRating, LawyerQuery};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse, path_segment};

pub struct Legal<'a> {
    client: &'a ApiClient,
}

impl<'a> Legal<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /legal/lawyers`, filtered by speciality, location, availability
    /// and pro-bono status.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn lawyers(&self, query: &LawyerQuery) -> Result<ApiResponse, ApiError> {
        self.client.send(ApiRequest::get("/legal/lawyers").query(query)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn lawyer(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.client.get(&format!("/legal/lawyers/{}", path_segment(id))).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn book_consultation(&self, booking: &ConsultationBooking) -> Result<ApiResponse, ApiError> {
        self.client.post("/legal/consultations", booking).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn consultations(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/legal/consultations").await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn cancel_consultation(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.client.delete(&format!("/legal/consultations/{}", path_segment(id))).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn rate_consultation(&self, id: &str, rating: u8, review: Option<&str>) -> Result<ApiResponse, ApiError> {
        let body = ConsultationRating { rating, review: review.map(str::to_owned) };
        self.client
            .post(&format!("/legal/consultations/{}/rating", path_segment(id)), &body)
            .await
    }
}
