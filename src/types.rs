use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Instant;

/// Delivery medium of an outgoing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Sms,
    Email,
    Whatsapp,
    Unknown,
}

impl Channel {
    /// Case-insensitive; anything unrecognised is `Unknown`
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sms" => Channel::Sms,
            "email" => Channel::Email,
            "whatsapp" => Channel::Whatsapp,
            _ => Channel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Email => "email",
            Channel::Whatsapp => "whatsapp",
            Channel::Unknown => "unknown",
        }
    }

    /// Capitalized label used in tabs and badges
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Sms => "Sms",
            Channel::Email => "Email",
            Channel::Whatsapp => "Whatsapp",
            Channel::Unknown => "Unknown",
        }
    }
}

/// Channel filter on the outgoing message log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelFilter {
    #[default]
    All,
    Only(Channel),
}

impl ChannelFilter {
    pub const TABS: [ChannelFilter; 4] = [
        ChannelFilter::All,
        ChannelFilter::Only(Channel::Sms),
        ChannelFilter::Only(Channel::Email),
        ChannelFilter::Only(Channel::Whatsapp),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChannelFilter::All => "All",
            ChannelFilter::Only(channel) => channel.label(),
        }
    }

    /// Value sent as the `channel` query parameter, None for "all"
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            ChannelFilter::All => None,
            ChannelFilter::Only(channel) => Some(channel.as_str()),
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::TABS.iter().position(|t| t == self).unwrap_or(0);
        Self::TABS[(idx + 1) % Self::TABS.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = Self::TABS.iter().position(|t| t == self).unwrap_or(0);
        Self::TABS[(idx + Self::TABS.len() - 1) % Self::TABS.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Delivered,
    Failed,
    Unknown,
}

impl DeliveryStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => DeliveryStatus::Pending,
            "sent" => DeliveryStatus::Sent,
            "delivered" => DeliveryStatus::Delivered,
            "failed" => DeliveryStatus::Failed,
            _ => DeliveryStatus::Unknown,
        }
    }
}

/// Server text kept as sent. Null or missing becomes empty; any other JSON
/// value keeps its JSON text.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

/// A message the gateway has dispatched (or tried to). `channel` and
/// `status` hold the raw server strings; use `channel_kind` and
/// `delivery_status` for the parsed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub id: i64,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub api_client: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub channel: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl OutgoingMessage {
    pub fn channel_kind(&self) -> Channel {
        Channel::parse(&self.channel)
    }

    pub fn delivery_status(&self) -> DeliveryStatus {
        DeliveryStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiClient {
    pub id: Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Envelope returned by the list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendSmsPayload {
    #[serde(rename = "phoneNumbers")]
    pub phone_numbers: Vec<String>,
    pub content: String,
    pub dlt_template_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub name: String,
    /// Base64 (standard alphabet) file content
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendMailPayload {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateApiClientPayload {
    #[serde(rename = "clientName")]
    pub client_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Top-level screens, one per console route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    SendSms,
    SendEmail,
    Logs,
    ApiClients,
    NotFound(String),
}

impl Screen {
    /// Screens reachable from the navigation tabs, in tab order
    pub const NAV: [Screen; 5] = [
        Screen::Dashboard,
        Screen::SendSms,
        Screen::SendEmail,
        Screen::Logs,
        Screen::ApiClients,
    ];

    pub fn from_route(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        match normalized {
            "/" | "" => Screen::Dashboard,
            "/sms/send" => Screen::SendSms,
            "/email/send" => Screen::SendEmail,
            "/logs" => Screen::Logs,
            "/api-clients" => Screen::ApiClients,
            other => Screen::NotFound(other.to_string()),
        }
    }

    pub fn route(&self) -> &str {
        match self {
            Screen::Dashboard => "/",
            Screen::SendSms => "/sms/send",
            Screen::SendEmail => "/email/send",
            Screen::Logs => "/logs",
            Screen::ApiClients => "/api-clients",
            Screen::NotFound(path) => path,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::SendSms => "Send SMS",
            Screen::SendEmail => "Send Email",
            Screen::Logs => "Logs",
            Screen::ApiClients => "API Clients",
            Screen::NotFound(_) => "Not Found",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title(), self.route())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    /// Typing into the focused single-line form field
    EditingField,
    /// Multi-line editor modal for a message body
    EditingBody,
    Searching,
    FilteringClientId,
    RoutePrompt,
    EnteringUrl,
    CreatingClient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_round_trip() {
        for screen in Screen::NAV {
            assert_eq!(Screen::from_route(screen.route()), screen);
        }
    }

    #[test]
    fn test_unknown_route_is_not_found() {
        assert_eq!(
            Screen::from_route("/whatsapp/send"),
            Screen::NotFound("/whatsapp/send".to_string())
        );
    }

    #[test]
    fn test_route_trailing_slash() {
        assert_eq!(Screen::from_route("/logs/"), Screen::Logs);
        assert_eq!(Screen::from_route(" / "), Screen::Dashboard);
    }

    #[test]
    fn test_channel_filter_cycle() {
        let mut filter = ChannelFilter::All;
        filter = filter.next();
        assert_eq!(filter, ChannelFilter::Only(Channel::Sms));
        filter = filter.prev().prev();
        assert_eq!(filter, ChannelFilter::Only(Channel::Whatsapp));
        assert_eq!(ChannelFilter::All.query_value(), None);
        assert_eq!(filter.query_value(), Some("whatsapp"));
    }

    #[test]
    fn test_outgoing_message_deserialize() {
        let json = r#"{
            "id": 7,
            "client_id": "c-1",
            "api_client": "billing",
            "channel": "sms",
            "recipient": "9876543210",
            "subject": null,
            "body": "hello",
            "provider": "msg91",
            "metadata": null,
            "status": "delivered",
            "created_at": "2024-05-01T10:00:00Z"
        }"#;
        let msg: OutgoingMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, 7);
        assert_eq!(msg.channel_kind(), Channel::Sms);
        assert_eq!(msg.delivery_status(), DeliveryStatus::Delivered);
        assert_eq!(msg.subject, None);
    }

    #[test]
    fn test_unknown_values_keep_raw_text() {
        let json = r#"{"id": 1, "channel": "telegram", "status": "queued"}"#;
        let msg: OutgoingMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.channel_kind(), Channel::Unknown);
        assert_eq!(msg.delivery_status(), DeliveryStatus::Unknown);
        assert_eq!(msg.channel, "telegram");
        assert_eq!(msg.status, "queued");
    }

    #[test]
    fn test_uppercase_values_parse() {
        let json = r#"{"id": 1, "channel": "SMS", "status": "SENT"}"#;
        let msg: OutgoingMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.channel_kind(), Channel::Sms);
        assert_eq!(msg.delivery_status(), DeliveryStatus::Sent);
        assert_eq!(msg.status, "SENT");
    }

    #[test]
    fn test_null_or_missing_status_keeps_the_page() {
        let json = r#"{"data": [
            {"id": 1, "channel": "sms", "status": "sent"},
            {"id": 2, "channel": "sms", "status": null},
            {"id": 3, "channel": null},
            {"id": 4, "channel": "email", "status": 3}
        ], "total": 4}"#;
        let resp: ListResponse<OutgoingMessage> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.len(), 4);
        assert_eq!(resp.data[1].status, "");
        assert_eq!(resp.data[1].delivery_status(), DeliveryStatus::Unknown);
        assert_eq!(resp.data[2].channel_kind(), Channel::Unknown);
        assert_eq!(resp.data[3].status, "3");
    }

    #[test]
    fn test_list_response_defaults() {
        let resp: ListResponse<ApiClient> = serde_json::from_str("{}").unwrap();
        assert!(resp.data.is_empty());
        assert_eq!(resp.total, None);
    }

    #[test]
    fn test_sms_payload_wire_names() {
        let payload = SendSmsPayload {
            phone_numbers: vec!["123".to_string()],
            content: "hi".to_string(),
            dlt_template_id: "T1".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["phoneNumbers"][0], "123");
        assert_eq!(value["dlt_template_id"], "T1");
    }
}
