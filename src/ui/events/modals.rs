//! Modal dialog handlers
//!
//! Base URL configuration, the `:` route prompt, the create-client dialog
//! and the multi-line body editor.

use super::helpers::{apply, collect_paste_batch};
use super::navigation;
use super::Command;
use crate::actions::AppAction;
use crate::config::validate_url;
use crate::dispatch::SharedState;
use crate::types::{Screen, ToastKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

/// Base URL modal. Closing without a saved URL is not allowed.
pub fn handle_url_input(key: KeyEvent, state: &SharedState, commands: &mut Vec<Command>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            let has_url = state.read().map(|s| s.base_url.is_some()).unwrap_or(false);
            if has_url {
                apply(state, AppAction::ExitToNormal);
            }
        }
        KeyCode::Enter => {
            let Ok(mut s) = state.write() else {
                return;
            };
            let url = s.url_input.trim().trim_end_matches('/').to_string();
            match validate_url(&url) {
                Ok(()) => {
                    debug!(%url, "base url submitted");
                    commands.push(Command::SetBaseUrl(url));
                }
                Err(message) => s.show_toast(ToastKind::Error, message),
            }
        }
        KeyCode::Backspace => apply(state, AppAction::BackspaceUrlInput),
        KeyCode::Char('w') if ctrl => apply(state, AppAction::DeleteWordUrlInput),
        KeyCode::Char('l') if ctrl => apply(state, AppAction::ClearUrlInput),
        KeyCode::Char(c) if !ctrl => {
            let batch = collect_paste_batch(c);
            apply(state, AppAction::AppendToUrlInput(batch));
        }
        _ => {}
    }
}

pub fn handle_route_prompt(key: KeyEvent, state: &SharedState, commands: &mut Vec<Command>) {
    match key.code {
        KeyCode::Esc => apply(state, AppAction::ExitToNormal),
        KeyCode::Enter => {
            let screen = match state.read() {
                Ok(s) => Screen::from_route(&s.route_input),
                Err(_) => return,
            };
            apply(state, AppAction::SubmitRoute);
            navigation::navigate(screen, state, commands);
        }
        KeyCode::Backspace => apply(state, AppAction::BackspaceRouteInput),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::AppendToRouteInput(c.to_string()))
        }
        _ => {}
    }
}

pub fn handle_create_client(key: KeyEvent, state: &SharedState, commands: &mut Vec<Command>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            let submitting = state
                .read()
                .map(|s| s.clients.create.as_ref().is_some_and(|f| f.submitting))
                .unwrap_or(false);
            if !submitting {
                apply(state, AppAction::CloseCreateClient);
            }
        }
        KeyCode::Enter => commands.push(Command::CreateClient),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            apply(state, AppAction::FocusNextField)
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

/// Multi-line editor for SMS content and the email body
pub fn handle_body_editor(key: KeyEvent, state: &SharedState) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => apply(state, AppAction::CancelBodyEditor),
        KeyCode::Char('s') if ctrl => apply(state, AppAction::SaveBodyEditor),
        KeyCode::Char(c) if !ctrl => {
            if let Ok(mut s) = state.write() {
                s.editor.handle_paste_batch(c);
            }
        }
        _ => {
            if let Ok(mut s) = state.write() {
                s.editor.handle_key_event(key);
            }
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

    fn shared(base_url: Option<&str>) -> SharedState {
        let mut config = Config::default();
        config.server.base_url = base_url.map(String::from);
        Arc::new(RwLock::new(AppState::new(&config)))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_url_modal_cannot_close_without_url() {
        let state = shared(None);
        handle_url_input(press(KeyCode::Esc), &state, &mut Vec::new());
        assert_eq!(state.read().unwrap().mode, InputMode::EnteringUrl);
    }

    #[test]
    fn test_url_modal_rejects_invalid_url() {
        let state = shared(None);
        state.write().unwrap().url_input = "not a url".into();

        let mut commands = Vec::new();
        handle_url_input(press(KeyCode::Enter), &state, &mut commands);

        assert!(commands.is_empty());
        let s = state.read().unwrap();
        assert_eq!(s.toast.as_ref().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn test_url_modal_submits_trimmed_url() {
        let state = shared(None);
        state.write().unwrap().url_input = " https://gw.example.com/ ".into();

        let mut commands = Vec::new();
        handle_url_input(press(KeyCode::Enter), &state, &mut commands);
        assert_eq!(
            commands,
            vec![Command::SetBaseUrl("https://gw.example.com".into())]
        );
    }

    #[test]
    fn test_route_prompt_navigates_and_fetches() {
        let state = shared(Some("http://localhost:8080"));
        {
            let mut s = state.write().unwrap();
            s.mode = InputMode::RoutePrompt;
            s.route_input = "/outgoing-messages".into();
        }

        let mut commands = Vec::new();
        handle_route_prompt(press(KeyCode::Enter), &state, &mut commands);

        let s = state.read().unwrap();
        assert_eq!(s.screen, Screen::Logs);
        assert_eq!(s.mode, InputMode::Normal);
        assert_eq!(commands, vec![Command::FetchMessages]);
    }

    #[test]
    fn test_create_client_typing_and_submit() {
        let state = shared(Some("http://localhost:8080"));
        {
            let mut s = state.write().unwrap();
            s.screen = Screen::ApiClients;
        }
        apply(&state, AppAction::OpenCreateClient);

        handle_create_client(press(KeyCode::Tab), &state, &mut Vec::new());
        handle_create_client(press(KeyCode::Backspace), &state, &mut Vec::new());

        let mut commands = Vec::new();
        handle_create_client(press(KeyCode::Enter), &state, &mut commands);
        assert_eq!(commands, vec![Command::CreateClient]);

        handle_create_client(press(KeyCode::Esc), &state, &mut Vec::new());
        let s = state.read().unwrap();
        assert!(s.clients.create.is_none());
        assert_eq!(s.mode, InputMode::Normal);
    }

    #[test]
    fn test_body_editor_save_and_cancel() {
        let state = shared(Some("http://localhost:8080"));
        {
            let mut s = state.write().unwrap();
            s.screen = Screen::SendSms;
            s.sms.focus = 2;
            s.sms.content = "draft".into();
        }
        apply(&state, AppAction::OpenBodyEditor);
        handle_body_editor(press(KeyCode::Enter), &state);
        handle_body_editor(
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
            &state,
        );
        assert_eq!(state.read().unwrap().sms.content, "draft\n");

        apply(&state, AppAction::OpenBodyEditor);
        handle_body_editor(press(KeyCode::Backspace), &state);
        handle_body_editor(press(KeyCode::Esc), &state);
        assert_eq!(state.read().unwrap().sms.content, "draft\n");
    }
}
