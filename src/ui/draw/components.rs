//! Shell components: header with navigation, footer key hints, toast and
//! the search bar used by the list screens.

use super::styling::{panel, toast_color};
use crate::state::AppState;
use crate::theme::Palette;
use crate::types::{InputMode, Screen, Toast};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
};

/// Navigation tabs on the left, base URL and theme on the right
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(48)])
        .split(area);

    let titles: Vec<Line> = Screen::NAV
        .iter()
        .enumerate()
        .map(|(i, screen)| Line::from(format!("{} {}", i + 1, screen.title())))
        .collect();
    let selected = Screen::NAV.iter().position(|s| *s == state.screen);

    let mut tabs = Tabs::new(titles)
        .block(panel(" Gateway Console ", false, palette))
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    if let Some(idx) = selected {
        tabs = tabs.select(idx);
    }
    frame.render_widget(tabs, chunks[0]);

    let url = state.base_url.as_deref().unwrap_or("no base URL");
    let status = Paragraph::new(Line::from(vec![
        Span::styled(url.to_string(), Style::default().fg(palette.text)),
        Span::styled(
            format!("  [{}]", state.theme.label()),
            Style::default().fg(palette.muted),
        ),
    ]))
    .block(panel(" Server (,) ", false, palette));
    frame.render_widget(status, chunks[1]);
}

/// Key hints for the current mode and screen
pub fn footer_hint(state: &AppState) -> &'static str {
    match state.mode {
        InputMode::EnteringUrl => "Enter:Save  Ctrl+W:Delete word  Ctrl+L:Clear  Esc:Close",
        InputMode::RoutePrompt => "Enter:Go  Esc:Cancel",
        InputMode::EditingField => "Type to edit  Tab/Shift+Tab:Next/Prev  Enter:Done  Esc:Done",
        InputMode::EditingBody => "Ctrl+S:Save  Esc:Cancel  Enter:New line",
        InputMode::Searching => "Type to search  Ctrl+L:Clear  Enter/Esc:Done",
        InputMode::FilteringClientId => "Enter:Apply filter  Esc:Cancel",
        InputMode::CreatingClient => "Tab:Next field  Enter:Create  Esc:Cancel",
        InputMode::Normal => match state.screen {
            Screen::SendSms => "j/k:Field  Enter:Edit  S/Ctrl+S:Send  1-5:Nav  t:Theme  q:Quit",
            Screen::SendEmail => {
                "j/k:Field  Enter:Edit  a:Attach  x:Remove attachment  S:Send  q:Quit"
            }
            Screen::Logs => {
                "/:Search  c/C:Channel  f:Client ID  h/l:Column  o:Sort  n/p:Page  +:Size  e/E:Export  y:Copy"
            }
            Screen::ApiClients => {
                "/:Search  a:Create  h/l:Column  H/L:Scroll  o:Sort  n/p:Page  +:Size  y:Copy"
            }
            Screen::Dashboard | Screen::NotFound(_) => {
                "1-5:Navigate  ::Go to route  ,:Base URL  t:Theme  Ctrl+R:Refresh  q:Quit"
            }
        },
    }
}

pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let footer = Paragraph::new(footer_hint(state))
        .style(Style::default().fg(palette.warning))
        .block(panel("Commands", false, palette));
    frame.render_widget(footer, area);
}

/// Toast in the bottom-right corner, above the footer
pub fn render_toast(frame: &mut Frame, toast: &Toast, palette: &Palette) {
    let area = frame.area();
    let max_width = area.width.min(60);
    let width = (toast.text.chars().count() as u16 + 4).clamp(20.min(max_width), max_width);
    let height = 3;
    let rect = Rect {
        x: area.width.saturating_sub(width + 1),
        y: area.height.saturating_sub(height + 3),
        width,
        height,
    };

    let color = toast_color(toast.kind, palette);
    frame.render_widget(Clear, rect);
    let widget = Paragraph::new(toast.text.clone())
        .style(Style::default().fg(color).bg(palette.surface))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(widget, rect);
}

/// Search box above a list. Shows a cursor while active.
pub fn render_search_bar(
    frame: &mut Frame,
    area: Rect,
    text: &str,
    active: bool,
    palette: &Palette,
) {
    let border = if active {
        palette.focused_border
    } else if !text.is_empty() {
        palette.success
    } else {
        palette.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Search (/) ");

    let content = if active {
        format!("{text}_")
    } else {
        text.to_string()
    };

    frame.render_widget(Paragraph::new(content).block(block), area);
}
