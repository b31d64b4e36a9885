use super::{ApiError, GatewayClient};
use crate::types::{ApiClient, CreateApiClientPayload, ListResponse};
use tracing::info;

pub const API_CLIENTS_LIST: &str = "/api-clients";
pub const API_CLIENT_CREATE: &str = "/api-client";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientQuery {
    pub q: String,
    pub limit: usize,
    pub offset: usize,
}

impl ClientQuery {
    pub fn new(limit: usize) -> Self {
        Self {
            q: String::new(),
            limit,
            offset: 0,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("q", self.q.trim().to_string()),
        ]
    }
}

pub async fn list_api_clients(
    client: &GatewayClient,
    query: &ClientQuery,
) -> Result<ListResponse<ApiClient>, ApiError> {
    client.get_json(API_CLIENTS_LIST, &query.params()).await
}

pub async fn create_api_client(
    client: &GatewayClient,
    payload: &CreateApiClientPayload,
) -> Result<(), ApiError> {
    client.post_json(API_CLIENT_CREATE, payload, None).await?;
    info!(name = %payload.client_name, "api client created");
    Ok(())
}
