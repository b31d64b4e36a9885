//! UI drawing module
//!
//! - `components`: header, footer, toast, search bar
//! - `screens`: one renderer per screen
//! - `modals`: base URL, route prompt, body editor, create client
//! - `styling`: shared style helpers

mod components;
mod modals;
mod screens;
mod styling;

use crate::state::AppState;
use crate::types::{InputMode, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
};

/// Draw one full frame from state
pub fn render(frame: &mut Frame, state: &AppState, spinner_index: usize) {
    let palette = state.palette();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.surface).fg(palette.text)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    components::render_header(frame, chunks[0], state, &palette);

    match &state.screen {
        Screen::Dashboard => screens::render_dashboard(frame, chunks[1], &palette),
        Screen::SendSms => screens::render_sms(frame, chunks[1], state, &palette),
        Screen::SendEmail => screens::render_mail(frame, chunks[1], state, &palette),
        Screen::Logs => screens::render_logs(frame, chunks[1], state, &palette, spinner_index),
        Screen::ApiClients => {
            screens::render_clients(frame, chunks[1], state, &palette, spinner_index)
        }
        Screen::NotFound(route) => screens::render_not_found(frame, chunks[1], route, &palette),
    }

    components::render_footer(frame, chunks[2], state, &palette);

    match state.mode {
        InputMode::EnteringUrl => modals::render_url_modal(frame, state, &palette),
        InputMode::RoutePrompt => modals::render_route_prompt(frame, state, &palette),
        InputMode::EditingBody => modals::render_body_editor(frame, state, &palette),
        InputMode::CreatingClient => modals::render_create_client(frame, state, &palette),
        _ => {}
    }

    if let Some(toast) = &state.toast {
        components::render_toast(frame, toast, &palette);
    }
}
