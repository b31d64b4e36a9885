//! Normal-mode keys
//!
//! Global keys work on every screen. The rest depend on the screen: form
//! screens move between fields, list screens drive their table.

use super::helpers::apply;
use super::{Command, yank};
use crate::actions::AppAction;
use crate::dispatch::SharedState;
use crate::pages::logs::PAGE_SIZES;
use crate::pages::mail::MailField;
use crate::table::{DataTable, TableEvent, TableRow};
use crate::types::{ExportFormat, Screen, ToastKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

/// Returns true when the key was a global binding
pub fn handle_global(key: KeyEvent, state: &SharedState, commands: &mut Vec<Command>) -> bool {
    match key.code {
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            navigate(Screen::NAV[idx].clone(), state, commands);
        }
        KeyCode::Char(':') => apply(state, AppAction::OpenRoutePrompt),
        KeyCode::Char(',') => apply(state, AppAction::EnterUrlInputMode),
        KeyCode::Char('t') => {
            apply(state, AppAction::ToggleTheme);
            commands.push(Command::PersistTheme);
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            refresh(state, commands);
        }
        KeyCode::Esc => apply(state, AppAction::DismissToast),
        _ => return false,
    }
    true
}

/// Switch screens and load list data for list screens
pub fn navigate(screen: Screen, state: &SharedState, commands: &mut Vec<Command>) {
    debug!(route = screen.route(), "navigate");
    match screen {
        Screen::Logs => commands.push(Command::FetchMessages),
        Screen::ApiClients => commands.push(Command::FetchClients),
        _ => {}
    }
    apply(state, AppAction::Navigate(screen));
}

/// Re-issue the current list query (Ctrl+R)
pub fn refresh(state: &SharedState, commands: &mut Vec<Command>) {
    let Ok(s) = state.read() else {
        return;
    };
    match s.screen {
        Screen::Logs => commands.push(Command::FetchMessages),
        Screen::ApiClients => commands.push(Command::FetchClients),
        _ => {}
    }
}

pub fn handle_screen(key: KeyEvent, state: &SharedState, commands: &mut Vec<Command>) {
    let screen = match state.read() {
        Ok(s) => s.screen.clone(),
        Err(_) => return,
    };

    match screen {
        Screen::SendSms | Screen::SendEmail => handle_form_screen(key, &screen, state, commands),
        Screen::Logs => handle_logs(key, state, commands),
        Screen::ApiClients => handle_clients(key, state, commands),
        Screen::Dashboard | Screen::NotFound(_) => {
            if key.code == KeyCode::Enter {
                navigate(Screen::Dashboard, state, commands);
            }
        }
    }
}

fn handle_form_screen(
    key: KeyEvent,
    screen: &Screen,
    state: &SharedState,
    commands: &mut Vec<Command>,
) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
            apply(state, AppAction::FocusNextField)
        }
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
            apply(state, AppAction::FocusPrevField)
        }
        KeyCode::Enter | KeyCode::Char('i') => {
            let multiline = match state.read() {
                Ok(s) => match screen {
                    Screen::SendSms => s.sms.focused().is_multiline(),
                    _ => s.mail.focused().is_multiline(),
                },
                Err(_) => return,
            };
            if multiline {
                apply(state, AppAction::OpenBodyEditor);
            } else {
                apply(state, AppAction::StartEditingField);
            }
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            submit_form(screen, commands)
        }
        KeyCode::Char('S') => submit_form(screen, commands),
        KeyCode::Char('x') if *screen == Screen::SendEmail => {
            if let Ok(mut s) = state.write() {
                if let Some(removed) = s.mail.remove_last_attachment() {
                    s.show_toast(ToastKind::Warning, format!("Removed {}", removed.name));
                }
            }
        }
        KeyCode::Char('a') if *screen == Screen::SendEmail => {
            if let Ok(mut s) = state.write() {
                s.mail.focus = MailField::ALL
                    .iter()
                    .position(|f| *f == MailField::AttachmentPath)
                    .unwrap_or(0);
            }
            apply(state, AppAction::StartEditingField);
        }
        _ => {}
    }
}

fn submit_form(screen: &Screen, commands: &mut Vec<Command>) {
    match screen {
        Screen::SendSms => commands.push(Command::SendSms),
        Screen::SendEmail => commands.push(Command::SendMail),
        _ => {}
    }
}

/// Keys every list screen shares. Returns the table's request, if any.
fn handle_table_keys<T: TableRow>(key: KeyEvent, table: &mut DataTable<T>) -> Option<TableEvent> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => table.select_next(),
        KeyCode::Char('k') | KeyCode::Up => table.select_prev(),
        KeyCode::Char('h') | KeyCode::Left => table.cursor_left(),
        KeyCode::Char('l') | KeyCode::Right => table.cursor_right(),
        KeyCode::Char('H') => table.scroll_left(),
        KeyCode::Char('L') => table.scroll_right(),
        KeyCode::Char('o') | KeyCode::Enter => {
            table.sort_by_cursor();
        }
        KeyCode::Char('n') | KeyCode::PageDown => return table.next_page(),
        KeyCode::Char('p') | KeyCode::PageUp => return table.prev_page(),
        KeyCode::Char('+') => return table.cycle_page_size(&PAGE_SIZES),
        _ => {}
    }
    None
}

fn handle_logs(key: KeyEvent, state: &SharedState, commands: &mut Vec<Command>) {
    match key.code {
        KeyCode::Char('/') => apply(state, AppAction::EnterSearchMode),
        KeyCode::Char('f') => apply(state, AppAction::EnterClientIdFilterMode),
        KeyCode::Char('y') => yank::yank_selected_message(state),
        KeyCode::Char('e') => commands.push(Command::Export(ExportFormat::Csv)),
        KeyCode::Char('E') => commands.push(Command::Export(ExportFormat::Pdf)),
        KeyCode::Char('c') | KeyCode::Tab | KeyCode::Char('C') | KeyCode::BackTab => {
            let forward = matches!(key.code, KeyCode::Char('c') | KeyCode::Tab);
            if let Ok(mut s) = state.write() {
                let current = s.logs.query.channel;
                let next = if forward { current.next() } else { current.prev() };
                if s.logs.set_channel(next) {
                    commands.push(Command::FetchMessages);
                }
            }
        }
        _ => {
            if let Ok(mut s) = state.write() {
                if let Some(event) = handle_table_keys(key, &mut s.logs.table) {
                    if s.logs.apply_table_event(event) {
                        commands.push(Command::FetchMessages);
                    }
                }
            }
        }
    }
}

fn handle_clients(key: KeyEvent, state: &SharedState, commands: &mut Vec<Command>) {
    match key.code {
        KeyCode::Char('/') => apply(state, AppAction::EnterSearchMode),
        KeyCode::Char('a') => apply(state, AppAction::OpenCreateClient),
        KeyCode::Char('y') => yank::yank_selected_client(state),
        _ => {
            if let Ok(mut s) = state.write() {
                if let Some(event) = handle_table_keys(key, &mut s.clients.table) {
                    if s.clients.apply_table_event(event) {
                        commands.push(Command::FetchClients);
                    }
                }
            }
        }
    }
}
