use super::helpers::{apply, apply_many, collect_paste_batch};
use crate::actions::AppAction;
use crate::dispatch::SharedState;
use crate::pages::mail::MailField;
use crate::types::{Screen, ToastKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

/// Typing into a single-line field of the SMS or Email form
pub fn handle_field_input(key: KeyEvent, state: &SharedState) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => apply(state, AppAction::ExitToNormal),
        KeyCode::Enter => {
            if on_attachment_path(state) {
                attach(state);
            } else {
                apply(state, AppAction::ExitToNormal);
            }
        }
        KeyCode::Tab | KeyCode::Down => {
            apply_many(state, vec![AppAction::FocusNextField, AppAction::ExitToNormal]);
            reenter_if_single_line(state);
        }
        KeyCode::BackTab | KeyCode::Up => {
            apply_many(state, vec![AppAction::FocusPrevField, AppAction::ExitToNormal]);
            reenter_if_single_line(state);
        }
        KeyCode::Backspace => apply(state, AppAction::BackspaceField),
        KeyCode::Char('w') if ctrl => apply(state, AppAction::DeleteWordField),
        KeyCode::Char('l') if ctrl => apply(state, AppAction::ClearField),
        KeyCode::Char(c) if !ctrl => {
            let batch = collect_paste_batch(c);
            apply(state, AppAction::AppendToField(batch));
        }
        _ => {}
    }
}

fn on_attachment_path(state: &SharedState) -> bool {
    match state.read() {
        Ok(s) => s.screen == Screen::SendEmail && s.mail.focused() == MailField::AttachmentPath,
        Err(_) => false,
    }
}

/// Moving onto a multi-line field drops back to normal mode; it is edited
/// in the body editor instead.
fn reenter_if_single_line(state: &SharedState) {
    let single_line = match state.read() {
        Ok(s) => match s.screen {
            Screen::SendSms => !s.sms.focused().is_multiline(),
            Screen::SendEmail => !s.mail.focused().is_multiline(),
            _ => false,
        },
        Err(_) => false,
    };
    if single_line {
        apply(state, AppAction::StartEditingField);
    }
}

fn attach(state: &SharedState) {
    let Ok(mut s) = state.write() else {
        return;
    };
    if s.mail.attachment_path.trim().is_empty() {
        return;
    }
    match s.mail.attach_from_path() {
        Ok(name) => s.show_toast(ToastKind::Success, format!("Attached {name}")),
        Err(err) => {
            warn!(error = %err, "could not attach file");
            s.show_toast(ToastKind::Error, format!("{err:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::state::AppState;
    use crate::types::InputMode;
    use std::sync::{Arc, RwLock};

    fn editing(screen: Screen, focus: usize) -> SharedState {
        let mut config = Config::default();
        config.server.base_url = Some("http://localhost:8080".into());
        let mut state = AppState::new(&config);
        state.screen = screen;
        state.mode = InputMode::EditingField;
        state.sms.focus = focus;
        state.mail.focus = focus;
        Arc::new(RwLock::new(state))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_backspace_and_clear() {
        let state = editing(Screen::SendSms, 1);
        state.write().unwrap().sms.phone_numbers = "98765".into();

        handle_field_input(press(KeyCode::Backspace), &state);
        assert_eq!(state.read().unwrap().sms.phone_numbers, "9876");

        handle_field_input(
            KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL),
            &state,
        );
        assert_eq!(state.read().unwrap().sms.phone_numbers, "");
    }

    #[test]
    fn test_tab_onto_multiline_leaves_edit_mode() {
        // PhoneNumbers -> Content
        let state = editing(Screen::SendSms, 1);
        handle_field_input(press(KeyCode::Tab), &state);

        let s = state.read().unwrap();
        assert_eq!(s.sms.focus, 2);
        assert_eq!(s.mode, InputMode::Normal);
    }

    #[test]
    fn test_tab_between_single_line_fields_keeps_editing() {
        let state = editing(Screen::SendEmail, 1);
        handle_field_input(press(KeyCode::Tab), &state);

        let s = state.read().unwrap();
        assert_eq!(s.mail.focus, 2);
        assert_eq!(s.mode, InputMode::EditingField);
    }

    #[test]
    fn test_enter_on_attachment_path_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let state = editing(Screen::SendEmail, 6);
        state.write().unwrap().mail.attachment_path = path.display().to_string();
        handle_field_input(press(KeyCode::Enter), &state);

        let s = state.read().unwrap();
        assert_eq!(s.mail.attachments.len(), 1);
        assert_eq!(s.mail.attachments[0].name, "notes.txt");
        assert!(s.mail.attachment_path.is_empty());
        assert_eq!(s.toast.as_ref().map(|t| t.kind), Some(ToastKind::Success));
    }

    #[test]
    fn test_missing_attachment_shows_error() {
        let state = editing(Screen::SendEmail, 6);
        state.write().unwrap().mail.attachment_path = "/no/such/file.pdf".into();
        handle_field_input(press(KeyCode::Enter), &state);

        let s = state.read().unwrap();
        assert!(s.mail.attachments.is_empty());
        assert_eq!(s.toast.as_ref().map(|t| t.kind), Some(ToastKind::Error));
    }
}
