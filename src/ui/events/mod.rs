//! Event handling
//!
//! Key presses are routed by `InputMode`. Pure state changes go through
//! `AppAction`/`apply_action`; anything that needs the network, the config
//! file or the search debouncer is returned to the app loop as a `Command`.
//!
//! Locks on the shared state are taken per handler and released before
//! returning, so background tasks are never blocked for long.

mod forms;
mod helpers;
mod modals;
mod navigation;
mod search;
mod yank;


use crate::dispatch::SharedState;
use crate::types::{ExportFormat, InputMode};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Which table a debounced search belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    Logs,
    Clients,
}

/// Work the app loop performs after input handling
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchMessages,
    FetchClients,
    SendSms,
    SendMail,
    CreateClient,
    Export(ExportFormat),
    ScheduleSearch(SearchTarget, String),
    SetBaseUrl(String),
    PersistTheme,
}

#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll for one terminal event and turn it into state changes and commands
    pub fn handle_events(&mut self, state: &SharedState) -> Result<Vec<Command>> {
        let mut commands = Vec::new();

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key, state, &mut commands);
                }
                Event::Paste(text) => helpers::handle_paste(&text, state),
                _ => {}
            }
        }

        Ok(commands)
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &SharedState, commands: &mut Vec<Command>) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let Some(mode) = helpers::current_mode(state) else {
            return;
        };

        match mode {
            InputMode::EnteringUrl => modals::handle_url_input(key, state, commands),
            InputMode::RoutePrompt => modals::handle_route_prompt(key, state, commands),
            InputMode::CreatingClient => modals::handle_create_client(key, state, commands),
            InputMode::EditingBody => modals::handle_body_editor(key, state),
            InputMode::EditingField => forms::handle_field_input(key, state),
            InputMode::Searching => search::handle_search_input(key, state, commands),
            InputMode::FilteringClientId => search::handle_client_id_input(key, state, commands),
            InputMode::Normal => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                    return;
                }
                if !navigation::handle_global(key, state, commands) {
                    navigation::handle_screen(key, state, commands);
                }
            }
        }
    }
}
