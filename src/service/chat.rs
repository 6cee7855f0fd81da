//! Chat conversations and support tickets.

use super::types::{ChatMessage, SupportTicket};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{ApiResponse, path_segment};

pub struct Chat<'a> {
    client: &'a ApiClient,
}

impl<'a> Chat<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Send a message, starting a new conversation when `conversation_id`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn send_message(&self, message: &str, conversation_id: Option<&str>) -> Result<ApiResponse, ApiError> {
        let body = ChatMessage { message: message.to_owned(), conversation_id: conversation_id.map(str::to_owned) };
        self.client.post("/chat/messages", &body).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn conversations(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/chat/conversations").await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn messages(&self, conversation_id: &str) -> Result<ApiResponse, ApiError> {
        self.client
            .get(&format!("/chat/conversations/{}/messages", path_segment(conversation_id)))
            .await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn create_ticket(&self, ticket: &SupportTicket) -> Result<ApiResponse, ApiError> {
        self.client.post("/support/tickets", ticket).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn tickets(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/support/tickets").await
    }
}
