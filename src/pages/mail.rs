use super::forms::{FormPhase, cycle_focus, prefill_key, split_emails};
use crate::api::mail::load_attachment;
use crate::types::{Attachment, SendMailPayload};
use std::path::PathBuf;

pub const SEND_FAILED: &str = "Failed to send Email.";
pub const SEND_OK: &str = "Email sent successfully.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailField {
    ApiKey,
    To,
    Cc,
    Bcc,
    Subject,
    Body,
    AttachmentPath,
}

impl MailField {
    pub const ALL: [MailField; 7] = [
        MailField::ApiKey,
        MailField::To,
        MailField::Cc,
        MailField::Bcc,
        MailField::Subject,
        MailField::Body,
        MailField::AttachmentPath,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MailField::ApiKey => "API Key",
            MailField::To => "To",
            MailField::Cc => "Cc",
            MailField::Bcc => "Bcc",
            MailField::Subject => "Subject",
            MailField::Body => "Body",
            MailField::AttachmentPath => "Attach file (path, Enter to add)",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, MailField::Body)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MailForm {
    pub api_key: String,
    pub to: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    pub body: String,
    pub attachment_path: String,
    pub attachments: Vec<Attachment>,
    pub focus: usize,
    pub phase: FormPhase,
}

impl MailForm {
    pub fn new(default_key: Option<&str>) -> Self {
        Self {
            api_key: prefill_key(default_key),
            ..Default::default()
        }
    }

    pub fn focused(&self) -> MailField {
        MailField::ALL[self.focus.min(MailField::ALL.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = cycle_focus(self.focus, MailField::ALL.len(), true);
    }

    pub fn focus_prev(&mut self) {
        self.focus = cycle_focus(self.focus, MailField::ALL.len(), false);
    }

    pub fn value(&self, field: MailField) -> &str {
        match field {
            MailField::ApiKey => &self.api_key,
            MailField::To => &self.to,
            MailField::Cc => &self.cc,
            MailField::Bcc => &self.bcc,
            MailField::Subject => &self.subject,
            MailField::Body => &self.body,
            MailField::AttachmentPath => &self.attachment_path,
        }
    }

    pub fn value_mut(&mut self, field: MailField) -> &mut String {
        match field {
            MailField::ApiKey => &mut self.api_key,
            MailField::To => &mut self.to,
            MailField::Cc => &mut self.cc,
            MailField::Bcc => &mut self.bcc,
            MailField::Subject => &mut self.subject,
            MailField::Body => &mut self.body,
            MailField::AttachmentPath => &mut self.attachment_path,
        }
    }

    pub fn to_list(&self) -> Vec<String> {
        split_emails(&self.to)
    }

    pub fn cc_list(&self) -> Vec<String> {
        split_emails(&self.cc)
    }

    pub fn bcc_list(&self) -> Vec<String> {
        split_emails(&self.bcc)
    }

    pub fn total_recipients(&self) -> usize {
        self.to_list().len() + self.cc_list().len() + self.bcc_list().len()
    }

    /// Body size in KB, rounded to one decimal
    pub fn content_kb(&self) -> f64 {
        (self.body.chars().count() as f64 / 1024.0 * 10.0).round() / 10.0
    }

    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.trim().is_empty() {
            missing.push(MailField::ApiKey.label());
        }
        if self.to_list().is_empty() {
            missing.push(MailField::To.label());
        }
        if self.subject.trim().is_empty() {
            missing.push(MailField::Subject.label());
        }
        if self.body.trim().is_empty() {
            missing.push(MailField::Body.label());
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing().is_empty()
    }

    /// Load the file named in the path field and append it. A leading `~/`
    /// expands to the home directory. Returns the attachment name.
    pub fn attach_from_path(&mut self) -> anyhow::Result<String> {
        let raw = self.attachment_path.trim();
        let path = match raw.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(raw)),
            None => PathBuf::from(raw),
        };

        let attachment = load_attachment(&path)?;
        let name = attachment.name.clone();
        self.attachments.push(attachment);
        self.attachment_path.clear();
        Ok(name)
    }

    pub fn remove_last_attachment(&mut self) -> Option<Attachment> {
        self.attachments.pop()
    }

    pub fn begin_submit(&mut self) -> Option<(SendMailPayload, String)> {
        if !self.is_valid() || self.phase.is_submitting() {
            return None;
        }
        self.phase = FormPhase::Submitting;
        Some((
            SendMailPayload {
                to: self.to_list(),
                cc: self.cc_list(),
                bcc: self.bcc_list(),
                subject: self.subject.trim().to_string(),
                body: self.body.trim().to_string(),
                attachments: self.attachments.clone(),
            },
            self.api_key.trim().to_string(),
        ))
    }

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
