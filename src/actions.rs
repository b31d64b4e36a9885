use crate::editor::TextEditor;
use crate::state::AppState;
use crate::types::{InputMode, Screen, ToastKind};

/// State changes that need no I/O. Input handlers build these and
/// `apply_action` folds them into `AppState`.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Navigation
    Navigate(Screen),
    OpenRoutePrompt,
    SubmitRoute,

    // Modes
    EnterUrlInputMode,
    EnterSearchMode,
    EnterClientIdFilterMode,
    ExitToNormal,

    // Modal text buffers
    AppendToUrlInput(String),
    BackspaceUrlInput,
    DeleteWordUrlInput,
    ClearUrlInput,
    AppendToRouteInput(String),
    BackspaceRouteInput,
    AppendToClientIdFilter(String),
    BackspaceClientIdFilter,

    // Form fields on the current screen
    StartEditingField,
    FocusNextField,
    FocusPrevField,
    AppendToField(String),
    BackspaceField,
    DeleteWordField,
    ClearField,

    // Multi-line editor
    OpenBodyEditor,
    SaveBodyEditor,
    CancelBodyEditor,

    // Create-client modal
    OpenCreateClient,
    CloseCreateClient,

    // Shell
    ToggleTheme,
    ShowToast(ToastKind, String),
    DismissToast,
}

pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        AppAction::Navigate(screen) => {
            state.screen = screen;
            state.mode = InputMode::Normal;
        }
        AppAction::OpenRoutePrompt => {
            state.route_input = String::from("/");
            state.mode = InputMode::RoutePrompt;
        }
        AppAction::SubmitRoute => {
            state.screen = Screen::from_route(&state.route_input);
            state.route_input.clear();
            state.mode = InputMode::Normal;
        }

        AppAction::EnterUrlInputMode => {
            state.url_input = state.base_url.clone().unwrap_or_default();
            state.mode = InputMode::EnteringUrl;
        }
        AppAction::EnterSearchMode => {
            state.mode = InputMode::Searching;
        }
        AppAction::EnterClientIdFilterMode => {
            state.logs.client_id_input = state.logs.query.client_id.clone();
            state.mode = InputMode::FilteringClientId;
        }
        AppAction::ExitToNormal => {
            state.mode = InputMode::Normal;
            state.route_input.clear();
        }

        AppAction::AppendToUrlInput(s) => state.url_input.push_str(&s),
        AppAction::BackspaceUrlInput => {
            state.url_input.pop();
        }
        AppAction::DeleteWordUrlInput => delete_word(&mut state.url_input),
        AppAction::ClearUrlInput => state.url_input.clear(),
        AppAction::AppendToRouteInput(s) => state.route_input.push_str(&s),
        AppAction::BackspaceRouteInput => {
            state.route_input.pop();
        }
        AppAction::AppendToClientIdFilter(s) => state.logs.client_id_input.push_str(&s),
        AppAction::BackspaceClientIdFilter => {
            state.logs.client_id_input.pop();
        }

        AppAction::StartEditingField => {
            if is_form_screen(&state.screen) {
                state.mode = InputMode::EditingField;
            }
        }
        AppAction::FocusNextField => match &state.screen {
            Screen::SendSms => state.sms.focus_next(),
            Screen::SendEmail => state.mail.focus_next(),
            Screen::ApiClients => {
                if let Some(form) = state.clients.create.as_mut() {
                    form.toggle_focus();
                }
            }
            _ => {}
        },
        AppAction::FocusPrevField => match &state.screen {
            Screen::SendSms => state.sms.focus_prev(),
            Screen::SendEmail => state.mail.focus_prev(),
            Screen::ApiClients => {
                if let Some(form) = state.clients.create.as_mut() {
                    form.toggle_focus();
                }
            }
            _ => {}
        },
        AppAction::AppendToField(s) => {
            if let Some(field) = focused_field(state) {
                field.push_str(&s);
            }
        }
        AppAction::BackspaceField => {
            if let Some(field) = focused_field(state) {
                field.pop();
            }
        }
        AppAction::DeleteWordField => {
            if let Some(field) = focused_field(state) {
                delete_word(field);
            }
        }
        AppAction::ClearField => {
            if let Some(field) = focused_field(state) {
                field.clear();
            }
        }

        AppAction::OpenBodyEditor => {
            let current = match &state.screen {
                Screen::SendSms if state.sms.focused().is_multiline() => {
                    Some(state.sms.content.clone())
                }
                Screen::SendEmail if state.mail.focused().is_multiline() => {
                    Some(state.mail.body.clone())
                }
                _ => None,
            };
            if let Some(text) = current {
                state.editor = TextEditor::with_content(text);
                state.mode = InputMode::EditingBody;
            }
        }
        AppAction::SaveBodyEditor => {
            let text = state.editor.content().to_string();
            match &state.screen {
                Screen::SendSms => state.sms.content = text,
                Screen::SendEmail => state.mail.body = text,
                _ => {}
            }
            state.editor.clear();
            state.mode = InputMode::Normal;
        }
        AppAction::CancelBodyEditor => {
            state.editor.clear();
            state.mode = InputMode::Normal;
        }

        AppAction::OpenCreateClient => {
            state.clients.open_create();
            state.mode = InputMode::CreatingClient;
        }
        AppAction::CloseCreateClient => {
            state.clients.close_create();
            state.mode = InputMode::Normal;
        }

        AppAction::ToggleTheme => state.theme = state.theme.toggled(),
        AppAction::ShowToast(kind, text) => state.show_toast(kind, text),
        AppAction::DismissToast => state.toast = None,
    }
}

fn is_form_screen(screen: &Screen) -> bool {
    matches!(screen, Screen::SendSms | Screen::SendEmail)
}

/// Single-line buffer that typed text goes to
fn focused_field(state: &mut AppState) -> Option<&mut String> {
    if state.mode == InputMode::CreatingClient {
        let form = state.clients.create.as_mut()?;
        let field = form.focused();
        return Some(form.value_mut(field));
    }
    match &state.screen {
        Screen::SendSms => {
            let field = state.sms.focused();
            if field.is_multiline() {
                None
            } else {
                Some(state.sms.value_mut(field))
            }
        }
        Screen::SendEmail => {
            let field = state.mail.focused();
            if field.is_multiline() {
                None
            } else {
                Some(state.mail.value_mut(field))
            }
        }
        _ => None,
    }
}

/// Delete the last word (Ctrl+W)
fn delete_word(s: &mut String) {
    *s = s.trim_end().to_string();

    if let Some(pos) = s.rfind(char::is_whitespace) {
        s.truncate(pos + 1);
        *s = s.trim_end().to_string();
    } else {
        s.clear();
    }
}
