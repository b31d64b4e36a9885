use crate::config::Config;
use crate::editor::TextEditor;
use crate::pages::clients::ApiClientsPage;
use crate::pages::logs::MessageLogPage;
use crate::pages::mail::MailForm;
use crate::pages::sms::SmsForm;
use crate::theme::{Palette, ThemeMode};
use crate::types::{InputMode, Screen, Toast, ToastKind};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// Everything the UI draws from. Shared with background tasks behind
/// `Arc<RwLock<_>>`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub mode: InputMode,
    pub theme: ThemeMode,

    pub base_url: Option<String>,
    /// Prefill for the API key field of the send forms
    pub default_api_key: Option<String>,
    pub export_dir: PathBuf,

    /// Base URL modal buffer
    pub url_input: String,
    /// `:` prompt buffer
    pub route_input: String,
    /// Buffer for the multi-line field being edited
    pub editor: TextEditor,

    pub sms: SmsForm,
    pub mail: MailForm,
    pub logs: MessageLogPage,
    pub clients: ApiClientsPage,

    pub toast: Option<Toast>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let page_size = config.page_size();
        let api_key = config.gateway.api_key.as_deref();
        let base_url = config.server.base_url.clone();

        Self {
            screen: Screen::Dashboard,
            mode: if base_url.is_none() {
                InputMode::EnteringUrl
            } else {
                InputMode::Normal
            },
            theme: config.ui.theme,
            url_input: base_url.clone().unwrap_or_default(),
            base_url,
            default_api_key: config.gateway.api_key.clone(),
            export_dir: config.export_dir(),
            route_input: String::new(),
            editor: TextEditor::new(),
            sms: SmsForm::new(api_key),
            mail: MailForm::new(api_key),
            logs: MessageLogPage::new(page_size),
            clients: ApiClientsPage::new(page_size),
            toast: None,
        }
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    pub fn show_toast(&mut self, kind: ToastKind, text: impl Into<String>) {
        self.toast = Some(Toast::new(kind, text));
    }

    /// Drop the toast once it has been visible for `TOAST_TTL`
    pub fn expire_toast(&mut self, now: Instant) {
        if let Some(toast) = &self.toast {
            if now.duration_since(toast.shown_at) >= TOAST_TTL {
                self.toast = None;
            }
        }
    }
}
