use serde_json::Value;
use thiserror::Error;

/// Failure of a gateway API call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No HTTP response (connection refused, timeout, ...)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
        body: String,
    },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build a status error, pulling a message out of the response body
    pub fn from_status(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| extract_error_message(&value));
        ApiError::Status {
            status,
            message,
            body,
        }
    }

    /// Human-readable text for banners and toasts
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Dig the most specific message out of the gateway's error body.
///
/// Order: `error.details` (first value of an object, in the order the server
/// sent the keys), `error.message`,
/// top-level `message`, then `error` when it is a plain string.
pub fn extract_error_message(body: &Value) -> Option<String> {
    let error = body.get("error");

    if let Some(details) = error.and_then(|e| e.get("details")) {
        let first = match details {
            Value::Object(map) => map.values().next().and_then(value_text),
            Value::Array(items) => items.first().and_then(value_text),
            other => value_text(other),
        };
        if first.is_some() {
            return first;
        }
    }

    error
        .and_then(|e| e.get("message"))
        .and_then(value_text)
        .or_else(|| body.get("message").and_then(value_text))
        .or_else(|| error.and_then(|e| e.as_str()).map(|s| s.to_string()))
        .filter(|s| !s.trim().is_empty())
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.first().and_then(value_text),
        _ => None,
    }
}
