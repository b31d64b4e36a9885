//! Helpers shared by the event handlers

use crate::actions::{AppAction, apply_action};
use crate::dispatch::SharedState;
use crate::types::InputMode;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::time::Duration;
use tracing::warn;

pub fn current_mode(state: &SharedState) -> Option<InputMode> {
    match state.read() {
        Ok(s) => Some(s.mode.clone()),
        Err(_) => {
            warn!("state lock poisoned");
            None
        }
    }
}

/// Apply a single action to state
pub fn apply(state: &SharedState, action: AppAction) {
    if let Ok(mut s) = state.write() {
        apply_action(action, &mut s);
    }
}

/// Apply several actions under one lock
pub fn apply_many(state: &SharedState, actions: Vec<AppAction>) {
    if let Ok(mut s) = state.write() {
        for action in actions {
            apply_action(action, &mut s);
        }
    }
}

/// Collect characters that are already queued behind `initial_char`, so a
/// paste in a terminal without bracketed paste lands as one insert.
pub fn collect_paste_batch(initial_char: char) -> String {
    let mut batch = String::from(initial_char);

    while let Ok(true) = event::poll(Duration::from_millis(0)) {
        match event::read() {
            Ok(Event::Key(next)) => match next.code {
                KeyCode::Char(c) if !next.modifiers.contains(KeyModifiers::CONTROL) => {
                    batch.push(c)
                }
                _ => break,
            },
            _ => break,
        }
    }

    batch
}

/// Bracketed paste goes to whatever buffer the current mode edits
pub fn handle_paste(text: &str, state: &SharedState) {
    let Ok(mut s) = state.write() else {
        return;
    };
    let single_line = text.replace(['\r', '\n'], "");
    let action = match s.mode {
        InputMode::EditingBody => {
            s.editor.insert_str(text);
            return;
        }
        InputMode::EnteringUrl => AppAction::AppendToUrlInput(single_line),
        InputMode::RoutePrompt => AppAction::AppendToRouteInput(single_line),
        InputMode::FilteringClientId => AppAction::AppendToClientIdFilter(single_line),
        InputMode::EditingField | InputMode::CreatingClient => {
            AppAction::AppendToField(single_line)
        }
        InputMode::Searching | InputMode::Normal => return,
    };
    apply_action(action, &mut s);
}
