use super::{ApiError, GatewayClient};
use crate::types::{Attachment, SendMailPayload};
use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;
use tracing::info;

pub const MAIL_SEND: &str = "/mail/send";

pub async fn send_mail(
    client: &GatewayClient,
    payload: &SendMailPayload,
    api_key: &str,
) -> Result<(), ApiError> {
    client.post_json(MAIL_SEND, payload, Some(api_key)).await?;
    info!(
        to = payload.to.len(),
        cc = payload.cc.len(),
        bcc = payload.bcc.len(),
        attachments = payload.attachments.len(),
        "mail accepted"
    );
    Ok(())
}

/// Read a file from disk into a base64 attachment named after the file
pub fn load_attachment(path: &Path) -> Result<Attachment> {
    let bytes =
        fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} is not a file", path.display()))?;

    Ok(Attachment {
        name,
        content: STANDARD.encode(bytes),
    })
}
