use super::{ApiError, GatewayClient};
use crate::types::SendSmsPayload;
use tracing::info;

pub const SMS_SEND: &str = "/sms/send";

/// Send one message to every number in the payload
pub async fn send_sms(
    client: &GatewayClient,
    payload: &SendSmsPayload,
    api_key: &str,
) -> Result<(), ApiError> {
    client.post_json(SMS_SEND, payload, Some(api_key)).await?;
    info!(recipients = payload.phone_numbers.len(), "sms accepted");
    Ok(())
}
