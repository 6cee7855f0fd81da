use super::types::{PaymentOrder, PaymentVerification};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{ApiResponse, path_segment};

pub struct Payments<'a> {
    client: &'a ApiClient,
}

impl<'a> Payments<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn create_order(&self, order: &PaymentOrder) -> Result<ApiResponse, ApiError> {
        self.client.post("/payments/create-order", order).await
    }

    /// Confirm a gateway payment by its order id, payment id and signature.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn verify(&self, verification: &PaymentVerification) -> Result<ApiResponse, ApiError> {
        self.client.post("/payments/verify", verification).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn transactions(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/payments/transactions").await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn transaction(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.client.get(&format!("/payments/transactions/{}", path_segment(id))).await
    }
}
