//! Pieces shared by the send forms

/// Lifecycle of a send form. Validation happens before `Submitting`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Success(String),
    Error(String),
}

impl FormPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormPhase::Submitting)
    }

    /// Banner text for the last outcome
    pub fn banner(&self) -> Option<&str> {
        match self {
            FormPhase::Success(text) | FormPhase::Error(text) => Some(text),
            _ => None,
        }
    }
}

/// Comma-separated list, trimmed, blanks dropped
pub fn split_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Like `split_recipients` but entries without an `@` are dropped too
pub fn split_emails(raw: &str) -> Vec<String> {
    split_recipients(raw)
        .into_iter()
        .filter(|e| e.contains('@'))
        .collect()
}

/// Wrapping focus step over `len` fields
pub fn cycle_focus(focus: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (focus + 1) % len
    } else {
        (focus + len - 1) % len
    }
}

/// Fill the API key field from config, or leave it blank
pub fn prefill_key(default_key: Option<&str>) -> String {
    default_key.map(str::trim).unwrap_or_default().to_string()
}
