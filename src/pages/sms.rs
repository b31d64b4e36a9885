use super::forms::{FormPhase, cycle_focus, prefill_key, split_recipients};
use crate::types::SendSmsPayload;

pub const SEGMENT_CHARS: usize = 160;
pub const SEND_FAILED: &str = "Failed to send SMS. Please check API Key / inputs.";
pub const SEND_OK: &str = "SMS sent successfully.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsField {
    ApiKey,
    PhoneNumbers,
    Content,
    DltTemplateId,
}

impl SmsField {
    pub const ALL: [SmsField; 4] = [
        SmsField::ApiKey,
        SmsField::PhoneNumbers,
        SmsField::Content,
        SmsField::DltTemplateId,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SmsField::ApiKey => "API Key",
            SmsField::PhoneNumbers => "Phone Numbers (comma separated)",
            SmsField::Content => "Message Content",
            SmsField::DltTemplateId => "DLT Template ID",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, SmsField::Content)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SmsForm {
    pub api_key: String,
    pub phone_numbers: String,
    pub content: String,
    pub dlt_template_id: String,
    pub focus: usize,
    pub phase: FormPhase,
}

impl SmsForm {
    pub fn new(default_key: Option<&str>) -> Self {
        Self {
            api_key: prefill_key(default_key),
            ..Default::default()
        }
    }

    pub fn focused(&self) -> SmsField {
        SmsField::ALL[self.focus.min(SmsField::ALL.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = cycle_focus(self.focus, SmsField::ALL.len(), true);
    }

    pub fn focus_prev(&mut self) {
        self.focus = cycle_focus(self.focus, SmsField::ALL.len(), false);
    }

    pub fn value(&self, field: SmsField) -> &str {
        match field {
            SmsField::ApiKey => &self.api_key,
            SmsField::PhoneNumbers => &self.phone_numbers,
            SmsField::Content => &self.content,
            SmsField::DltTemplateId => &self.dlt_template_id,
        }
    }

    pub fn value_mut(&mut self, field: SmsField) -> &mut String {
        match field {
            SmsField::ApiKey => &mut self.api_key,
            SmsField::PhoneNumbers => &mut self.phone_numbers,
            SmsField::Content => &mut self.content,
            SmsField::DltTemplateId => &mut self.dlt_template_id,
        }
    }

    pub fn recipients(&self) -> Vec<String> {
        split_recipients(&self.phone_numbers)
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn segments(&self) -> usize {
        self.char_count().div_ceil(SEGMENT_CHARS)
    }

    /// Labels of the fields that still block submission
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.trim().is_empty() {
            missing.push(SmsField::ApiKey.label());
        }
        if self.recipients().is_empty() {
            missing.push("Recipients");
        }
        if self.content.trim().is_empty() {
            missing.push(SmsField::Content.label());
        }
        if self.dlt_template_id.trim().is_empty() {
            missing.push(SmsField::DltTemplateId.label());
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing().is_empty()
    }

    /// Payload and key for the request, or None when the form is invalid or
    /// a send is already in flight. Moves the form into `Submitting`.
    pub fn begin_submit(&mut self) -> Option<(SendSmsPayload, String)> {
        if !self.is_valid() || self.phase.is_submitting() {
            return None;
        }
        self.phase = FormPhase::Submitting;
        Some((
            SendSmsPayload {
                phone_numbers: self.recipients(),
                content: self.content.trim().to_string(),
                dlt_template_id: self.dlt_template_id.trim().to_string(),
            },
            self.api_key.trim().to_string(),
        ))
    }

    /// Success clears every field; failure keeps them for another attempt
    pub fn finish(&mut self, outcome: Result<(), String>, default_key: Option<&str>) {
        match outcome {
            Ok(()) => {
                *self = Self::new(default_key);
                self.phase = FormPhase::Success(SEND_OK.to_string());
            }
            Err(message) => self.phase = FormPhase::Error(message),
        }
    }
}
