use crate::api::GatewayClient;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::dispatch::{self, SharedState};
use crate::state::AppState;
use crate::table::TableEvent;
use crate::types::{InputMode, Screen, ToastKind};
use crate::ui::{Command, EventHandler, SearchTarget, draw};
use color_eyre::Result;
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Owns everything the UI loop needs besides the terminal: shared state,
/// the persisted config, the gateway client and one search debouncer per list.
#[derive(Debug)]
pub struct App {
    state: SharedState,
    config: Config,
    config_path: PathBuf,
    client: Option<GatewayClient>,
    event_handler: EventHandler,
    log_search: Debouncer<(SearchTarget, String)>,
    client_search: Debouncer<(SearchTarget, String)>,
    search_rx: UnboundedReceiver<(SearchTarget, String)>,
    spinner_index: usize,
    last_tick: Instant,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        let client = config.server.base_url.as_deref().and_then(build_client);
        let state = AppState::new(&config);
        let delay = Duration::from_millis(config.ui.search_debounce_ms);
        let (log_search, search_rx) = Debouncer::new(delay);
        let client_search = Debouncer::with_sender(delay, log_search.sender());

        Self {
            state: Arc::new(RwLock::new(state)),
            config,
            config_path,
            client,
            event_handler: EventHandler::new(),
            log_search,
            client_search,
            search_rx,
            spinner_index: 0,
            last_tick: Instant::now(),
        }
    }

    pub fn state(&self) -> SharedState {
        Arc::clone(&self.state)
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        info!(base_url = ?self.config.server.base_url, "gateway console started");

        while !self.event_handler.should_quit {
            if self.last_tick.elapsed() >= SPINNER_TICK {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            if let Ok(mut s) = self.state.write() {
                s.expire_toast(Instant::now());
            }

            let spinner_index = self.spinner_index;
            terminal.draw(|frame| {
                if let Ok(s) = self.state.read() {
                    draw::render(frame, &s, spinner_index);
                }
            })?;

            let commands = self.event_handler.handle_events(&self.state)?;
            for command in commands {
                self.execute(command);
            }
            self.drain_search();

            // Let spawned requests make progress between frames
            tokio::task::yield_now().await;
        }

        info!("gateway console exiting");
        Ok(())
    }

    /// Carry out one command from the event layer. Returns the spawned task,
    /// if the command started one.
    pub fn execute(&mut self, command: Command) -> Option<JoinHandle<()>> {
        match command {
            Command::ScheduleSearch(target, text) => {
                let debouncer = match target {
                    SearchTarget::Logs => &mut self.log_search,
                    SearchTarget::Clients => &mut self.client_search,
                };
                debouncer.schedule((target, text));
                None
            }
            Command::SetBaseUrl(url) => {
                self.set_base_url(url);
                None
            }
            Command::PersistTheme => {
                self.persist_theme();
                None
            }
            other => {
                let Some(client) = self.client.clone() else {
                    warn!(command = ?other, "no gateway client configured");
                    if let Ok(mut s) = self.state.write() {
                        s.show_toast(ToastKind::Warning, "Set a base URL first (,)");
                    }
                    return None;
                };
                let state = self.state();
                match other {
                    Command::FetchMessages => dispatch::fetch_messages(state, client),
                    Command::FetchClients => dispatch::fetch_clients(state, client),
                    Command::SendSms => dispatch::submit_sms(state, client),
                    Command::SendMail => dispatch::submit_mail(state, client),
                    Command::CreateClient => dispatch::submit_new_client(state, client),
                    Command::Export(format) => dispatch::export_messages(state, client, format),
                    Command::ScheduleSearch(..) | Command::SetBaseUrl(_) | Command::PersistTheme => {
                        None
                    }
                }
            }
        }
    }

    /// Apply debounced search text that has settled since the last tick
    pub fn drain_search(&mut self) -> Vec<JoinHandle<()>> {
        let mut tasks = Vec::new();
        while let Ok((target, text)) = self.search_rx.try_recv() {
            let changed = match self.state.write() {
                Ok(mut s) => match target {
                    SearchTarget::Logs => s.logs.apply_table_event(TableEvent::SearchChanged(text)),
                    SearchTarget::Clients => {
                        s.clients.apply_table_event(TableEvent::SearchChanged(text))
                    }
                },
                Err(_) => false,
            };
            if changed {
                let command = match target {
                    SearchTarget::Logs => Command::FetchMessages,
                    SearchTarget::Clients => Command::FetchClients,
                };
                tasks.extend(self.execute(command));
            }
        }
        tasks
    }

    fn set_base_url(&mut self, url: String) {
        let Some(client) = build_client(&url) else {
            if let Ok(mut s) = self.state.write() {
                s.show_toast(ToastKind::Error, "Invalid base URL");
            }
            return;
        };
        self.client = Some(client);
        self.config.server.base_url = Some(url.clone());

        let saved = self.config.save_to(&self.config_path);
        if let Err(err) = &saved {
            error!(error = %err, "failed to save config");
        }

        let refresh = match self.state.write() {
            Ok(mut s) => {
                s.base_url = Some(url.clone());
                s.url_input = url;
                s.mode = InputMode::Normal;
                match saved {
                    Ok(()) => s.show_toast(ToastKind::Success, "Base URL saved"),
                    Err(_) => s.show_toast(ToastKind::Warning, "Base URL set but not saved"),
                }
                match s.screen {
                    Screen::Logs => Some(Command::FetchMessages),
                    Screen::ApiClients => Some(Command::FetchClients),
                    _ => None,
                }
            }
            Err(_) => None,
        };

        if let Some(command) = refresh {
            self.execute(command);
        }
    }

    fn persist_theme(&mut self) {
        let Ok(theme) = self.state.read().map(|s| s.theme) else {
            return;
        };
        self.config.ui.theme = theme;
        if let Err(err) = self.config.save_to(&self.config_path) {
            error!(error = %err, "failed to save theme preference");
        }
    }
}

fn build_client(url: &str) -> Option<GatewayClient> {
    match GatewayClient::new(url) {
        Ok(client) => Some(client),
        Err(err) => {
            warn!(error = %err, url, "could not build gateway client");
            None
        }
    }
}
