use super::{ApiError, GatewayClient};
use crate::types::{ChannelFilter, ExportFormat, ListResponse, OutgoingMessage};

pub const OUTGOING_MESSAGES: &str = "/outgoing-messages";

/// Filters and window for the outgoing message log
#[derive(Debug, Clone, PartialEq)]
pub struct MessageQuery {
    pub q: String,
    pub channel: ChannelFilter,
    pub client_id: String,
    pub limit: usize,
    pub offset: usize,
}

impl MessageQuery {
    pub fn new(limit: usize) -> Self {
        Self {
            q: String::new(),
            channel: ChannelFilter::All,
            client_id: String::new(),
            limit,
            offset: 0,
        }
    }

    /// Query pairs in wire order; empty filters are dropped by the client
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.q.trim().to_string()),
            (
                "channel",
                self.channel.query_value().unwrap_or_default().to_string(),
            ),
            ("client_id", self.client_id.trim().to_string()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ]
    }
}

pub async fn list_outgoing_messages(
    client: &GatewayClient,
    query: &MessageQuery,
) -> Result<ListResponse<OutgoingMessage>, ApiError> {
    client.get_json(OUTGOING_MESSAGES, &query.params()).await
}

/// Same filters as the list, but the server answers with a file
pub async fn export_outgoing_messages(
    client: &GatewayClient,
    query: &MessageQuery,
    format: ExportFormat,
) -> Result<Vec<u8>, ApiError> {
    let mut params = query.params();
    params.push(("export", "true".to_string()));
    params.push(("type", format.as_str().to_string()));
    client.get_bytes(OUTGOING_MESSAGES, &params).await
}
