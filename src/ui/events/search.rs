//! Search and filter input for the list screens
//!
//! Search text is sent to the app loop, which debounces it before the table
//! is asked to refetch. The client id filter is applied on Enter only.

use super::helpers::apply;
use super::{Command, SearchTarget};
use crate::actions::AppAction;
use crate::dispatch::SharedState;
use crate::table::{DataTable, TableRow};
use crate::types::Screen;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_search_input(key: KeyEvent, state: &SharedState, commands: &mut Vec<Command>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc | KeyCode::Enter => apply(state, AppAction::ExitToNormal),
        _ => {
            let Ok(mut s) = state.write() else {
                return;
            };
            let screen = s.screen.clone();
            let edited = match screen {
                Screen::Logs => edit_search(key, ctrl, &mut s.logs.table)
                    .map(|text| (SearchTarget::Logs, text)),
                Screen::ApiClients => edit_search(key, ctrl, &mut s.clients.table)
                    .map(|text| (SearchTarget::Clients, text)),
                _ => None,
            };
            if let Some((target, text)) = edited {
                commands.push(Command::ScheduleSearch(target, text));
            }
        }
    }
}

/// Apply an edit to the table's search box; returns the new text if it changed
fn edit_search<T: TableRow>(
    key: KeyEvent,
    ctrl: bool,
    table: &mut DataTable<T>,
) -> Option<String> {
    match key.code {
        KeyCode::Backspace => Some(table.pop_search_char().to_string()),
        KeyCode::Char('l') | KeyCode::Char('u') if ctrl => {
            table.clear_search();
            Some(String::new())
        }
        KeyCode::Char(c) if !ctrl => Some(table.push_search_char(c).to_string()),
        _ => None,
    }
}

pub fn handle_client_id_input(key: KeyEvent, state: &SharedState, commands: &mut Vec<Command>) {
    match key.code {
        KeyCode::Esc => apply(state, AppAction::ExitToNormal),
        KeyCode::Enter => {
            if let Ok(mut s) = state.write() {
                if s.logs.commit_client_id() {
                    commands.push(Command::FetchMessages);
                }
            }
            apply(state, AppAction::ExitToNormal);
        }
        KeyCode::Backspace => apply(state, AppAction::BackspaceClientIdFilter),
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Ok(mut s) = state.write() {
                s.logs.client_id_input.clear();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::AppendToClientIdFilter(c.to_string()))
        }
        _ => {}
    }
}
