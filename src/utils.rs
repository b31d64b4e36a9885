use chrono::{DateTime, Local, NaiveDateTime};

/// Show only the edges of an API key in the UI
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let len = chars.len();
    if len <= 8 {
        return "●".repeat(len);
    }

    let first: String = chars[..4].iter().collect();
    let last: String = chars[len - 4..].iter().collect();
    format!("{first}...{last}")
}

/// Render a backend timestamp in local time; unparseable input comes back as is
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return naive.format("%Y-%m-%d %H:%M:%S").to_string();
        }
    }
    raw.to_string()
}

/// Cut to `max` chars, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("short"), "●●●●●");
        assert_eq!(mask_secret("gk_live_123456789"), "gk_l...6789");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn test_format_timestamp_naive() {
        assert_eq!(
            format_timestamp("2024-03-05T10:20:30.123"),
            "2024-03-05 10:20:30"
        );
        assert_eq!(format_timestamp("2024-03-05 10:20:30"), "2024-03-05 10:20:30");
    }

    #[test]
    fn test_format_timestamp_rfc3339_keeps_shape() {
        let formatted = format_timestamp("2024-03-05T10:20:30Z");
        assert_eq!(formatted.len(), "2024-03-05 10:20:30".len());
    }

    #[test]
    fn test_format_timestamp_garbage() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 6), "hello…");
    }
}
