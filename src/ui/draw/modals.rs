//! Modal dialog rendering
//!
//! Base URL, route prompt, body editor and the create-client dialog. Each
//! modal clears the area behind it before drawing.

use super::styling::field_label_style;
use crate::pages::clients::CreateField;
use crate::state::AppState;
use crate::theme::Palette;
use crate::types::Screen;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Rect of `width` x `height` centered in `area`, shrunk to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn modal_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(palette.focused_border)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(palette.surface).fg(palette.text))
}

fn help_line(text: &str, palette: &Palette) -> Paragraph<'static> {
    Paragraph::new(text.to_string())
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center)
}

pub fn render_url_modal(frame: &mut Frame, state: &AppState, palette: &Palette) {
    let area = centered_rect(frame.area(), (frame.area().width as f32 * 0.7).min(90.0) as u16, 9);
    frame.render_widget(Clear, area);

    let block = modal_block(" Gateway Base URL ", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let intro = if state.base_url.is_none() {
        "Set the gateway base URL to get started"
    } else {
        "Base URL used for every request"
    };
    frame.render_widget(
        Paragraph::new(intro)
            .style(Style::default().fg(palette.muted))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let input = Paragraph::new(format!("{}_", state.url_input)).style(
        Style::default()
            .fg(palette.warning)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(input, chunks[1]);

    let help = if state.base_url.is_some() {
        "Enter: Save  |  Ctrl+L: Clear  |  Esc: Cancel"
    } else {
        "Enter: Save  |  Ctrl+L: Clear"
    };
    frame.render_widget(help_line(help, palette), chunks[3]);
}

pub fn render_route_prompt(frame: &mut Frame, state: &AppState, palette: &Palette) {
    let area = frame.area();
    let rect = Rect {
        x: area.x,
        y: area.height.saturating_sub(3),
        width: area.width,
        height: 3.min(area.height),
    };
    frame.render_widget(Clear, rect);

    let routes = Screen::NAV
        .iter()
        .map(|s| s.route())
        .collect::<Vec<_>>()
        .join("  ");
    let prompt = Paragraph::new(Line::from(vec![
        Span::styled(":", Style::default().fg(palette.primary)),
        Span::raw(format!("{}_", state.route_input)),
    ]))
    .block(modal_block(" Go to route ", palette).title_bottom(Line::from(routes)));
    frame.render_widget(prompt, rect);
}

pub fn render_body_editor(frame: &mut Frame, state: &AppState, palette: &Palette) {
    let screen = frame.area();
    let area = centered_rect(
        screen,
        (screen.width as f32 * 0.8) as u16,
        (screen.height as f32 * 0.7) as u16,
    );
    frame.render_widget(Clear, area);

    let title = match state.screen {
        Screen::SendEmail => " Email Body ",
        _ => " Message Content ",
    };
    let block = modal_block(title, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let editor = &state.editor;
    let (cursor_line, cursor_col) = editor.cursor_line_col();
    let visible = chunks[0].height as usize;
    let skip = (cursor_line + 1).saturating_sub(visible);

    let lines: Vec<Line> = editor
        .lines()
        .into_iter()
        .enumerate()
        .skip(skip)
        .take(visible)
        .map(|(idx, line)| {
            if idx != cursor_line {
                return Line::from(line.to_string());
            }
            let split = line
                .char_indices()
                .nth(cursor_col)
                .map(|(i, _)| i)
                .unwrap_or(line.len());
            let (before, after) = line.split_at(split);
            let mut chars = after.chars();
            let at = chars.next().map(String::from).unwrap_or_else(|| " ".into());
            Line::from(vec![
                Span::raw(before.to_string()),
                Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
                Span::raw(chars.as_str().to_string()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let status = format!(
        "Ln {}, Col {}  |  {} chars  |  Ctrl+S: Save  Esc: Cancel",
        cursor_line + 1,
        cursor_col + 1,
        editor.char_count()
    );
    frame.render_widget(help_line(&status, palette), chunks[1]);
}

pub fn render_create_client(frame: &mut Frame, state: &AppState, palette: &Palette) {
    let Some(form) = state.clients.create.as_ref() else {
        return;
    };
    let area = centered_rect(frame.area(), 70, 11);
    frame.render_widget(Clear, area);

    let block = modal_block(" Create API Client ", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for field in CreateField::ALL {
        let focused = form.focused() == field;
        let value = match field {
            CreateField::Name => &form.name,
            CreateField::Description => &form.description,
        };
        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(Span::styled(
            field.label(),
            field_label_style(focused, palette),
        )));
        lines.push(Line::from(format!("  {value}{cursor}")));
        lines.push(Line::from(""));
    }
    let footer = if form.submitting {
        "Creating..."
    } else {
        "Tab: Next field  |  Enter: Create  |  Esc: Cancel"
    };
    lines.push(Line::from(Span::styled(
        footer,
        Style::default().fg(palette.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(area, 60, 10), Rect::new(20, 15, 60, 10));
        // Shrinks to fit
        assert_eq!(centered_rect(area, 200, 50), area);
    }
}
