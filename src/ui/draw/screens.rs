//! One renderer per screen

use super::components::render_search_bar;
use super::styling::{field_label_style, panel, phase_style};
use crate::pages::dashboard::{Availability, SERVICES};
use crate::pages::forms::FormPhase;
use crate::pages::mail::MailField;
use crate::pages::sms::{SEGMENT_CHARS, SmsField};
use crate::state::AppState;
use crate::table::render::render_table;
use crate::theme::Palette;
use crate::types::{ChannelFilter, InputMode};
use crate::utils::{mask_secret, truncate};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs, Wrap},
};

pub fn render_dashboard(frame: &mut Frame, area: Rect, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let intro = Paragraph::new("Messaging services exposed by this gateway")
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center);
    frame.render_widget(intro, rows[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);

    for (card, rect) in SERVICES.iter().zip(cards.iter()) {
        let color = match card.availability {
            Availability::Available => palette.success,
            Availability::WorkInProgress => palette.warning,
        };
        let body = vec![
            Line::from(""),
            Line::from(Span::styled(
                card.title,
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.availability.label(),
                Style::default().fg(color),
            )),
        ];
        let widget = Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(panel("", false, palette));
        frame.render_widget(widget, *rect);
    }
}

/// One form row: label line, then the value line
fn field_lines(
    label: &str,
    value: String,
    focused: bool,
    editing: bool,
    palette: &Palette,
) -> [Line<'static>; 2] {
    let marker = if focused { "> " } else { "  " };
    let value = if focused && editing {
        format!("{value}_")
    } else {
        value
    };
    [
        Line::from(Span::styled(
            format!("{marker}{label}"),
            field_label_style(focused, palette),
        )),
        Line::from(Span::styled(
            format!("    {value}"),
            Style::default().fg(palette.text),
        )),
    ]
}

/// Secrets are shown in full only while they are being typed
fn display_key(key: &str, focused: bool, editing: bool) -> String {
    if focused && editing {
        key.to_string()
    } else {
        mask_secret(key)
    }
}

/// Multi-line values show their first line and a line count
fn preview(text: &str, width: usize) -> String {
    let lines = text.lines().count();
    let first = text.lines().next().unwrap_or_default();
    if lines > 1 {
        format!("{} (+{} lines, Enter to edit)", truncate(first, width), lines - 1)
    } else {
        truncate(first, width)
    }
}

fn banner(phase: &FormPhase, palette: &Palette) -> Paragraph<'static> {
    let text = match phase {
        FormPhase::Submitting => "Sending...".to_string(),
        other => other.banner().unwrap_or_default().to_string(),
    };
    Paragraph::new(text)
        .style(phase_style(phase, palette).add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
}

fn form_layout(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[0]);
    (cols[0], cols[1], rows[1])
}

pub fn render_sms(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let form = &state.sms;
    let editing = state.mode == InputMode::EditingField;
    let (left, right, bottom) = form_layout(area);
    let width = left.width.saturating_sub(8) as usize;

    let mut lines = Vec::new();
    for field in SmsField::ALL {
        let focused = form.focused() == field;
        let value = match field {
            SmsField::ApiKey => display_key(&form.api_key, focused, editing),
            SmsField::Content => preview(&form.content, width),
            other => form.value(other).to_string(),
        };
        lines.extend(field_lines(field.label(), value, focused, editing, palette));
        lines.push(Line::from(""));
    }
    frame.render_widget(
        Paragraph::new(lines).block(panel(" Send SMS ", true, palette)),
        left,
    );

    let missing = form.missing();
    let mut stats = vec![
        Line::from(format!("Recipients: {}", form.recipients().len())),
        Line::from(format!("Characters: {}", form.char_count())),
        Line::from(format!(
            "Segments:   {} ({SEGMENT_CHARS} chars each)",
            form.segments()
        )),
        Line::from(""),
    ];
    if missing.is_empty() {
        stats.push(Line::from(Span::styled(
            "Ready to send (S)",
            Style::default().fg(palette.success),
        )));
    } else {
        stats.push(Line::from(Span::styled(
            format!("Missing: {}", missing.join(", ")),
            Style::default().fg(palette.warning),
        )));
    }
    frame.render_widget(
        Paragraph::new(stats)
            .style(Style::default().fg(palette.text))
            .wrap(Wrap { trim: true })
            .block(panel(" Summary ", false, palette)),
        right,
    );

    frame.render_widget(banner(&form.phase, palette).block(panel("", false, palette)), bottom);
}

pub fn render_mail(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let form = &state.mail;
    let editing = state.mode == InputMode::EditingField;
    let (left, right, bottom) = form_layout(area);
    let width = left.width.saturating_sub(8) as usize;

    let mut lines = Vec::new();
    for field in MailField::ALL {
        let focused = form.focused() == field;
        let value = match field {
            MailField::ApiKey => display_key(&form.api_key, focused, editing),
            MailField::Body => preview(&form.body, width),
            other => form.value(other).to_string(),
        };
        lines.extend(field_lines(field.label(), value, focused, editing, palette));
    }
    frame.render_widget(
        Paragraph::new(lines).block(panel(" Send Email ", true, palette)),
        left,
    );

    let mut side = vec![
        Line::from(format!("Recipients: {}", form.total_recipients())),
        Line::from(format!("Content:    {:.1} KB", form.content_kb())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Attachments ({})", form.attachments.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for attachment in &form.attachments {
        side.push(Line::from(format!("  {}", attachment.name)));
    }
    let missing = form.missing();
    if !missing.is_empty() {
        side.push(Line::from(""));
        side.push(Line::from(Span::styled(
            format!("Missing: {}", missing.join(", ")),
            Style::default().fg(palette.warning),
        )));
    }
    frame.render_widget(
        Paragraph::new(side)
            .style(Style::default().fg(palette.text))
            .wrap(Wrap { trim: true })
            .block(panel(" Summary ", false, palette)),
        right,
    );

    frame.render_widget(banner(&form.phase, palette).block(panel("", false, palette)), bottom);
}

fn summary_line(summary: String, has_prev: bool, has_next: bool, palette: &Palette) -> Line<'static> {
    let nav = |label: &'static str, enabled: bool| {
        let color = if enabled { palette.primary } else { palette.muted };
        Span::styled(label, Style::default().fg(color))
    };
    Line::from(vec![
        Span::styled(summary, Style::default().fg(palette.muted)),
        Span::raw("   "),
        nav("< Prev (p)", has_prev),
        Span::raw("  "),
        nav("Next (n) >", has_next),
    ])
}

pub fn render_logs(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    palette: &Palette,
    spinner_index: usize,
) {
    let page = &state.logs;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let titles: Vec<Line> = ChannelFilter::TABS
        .iter()
        .map(|t| Line::from(t.label()))
        .collect();
    let selected = ChannelFilter::TABS
        .iter()
        .position(|t| *t == page.query.channel)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(panel(" Channel (c/C) ", false, palette))
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, rows[0]);

    let filters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);
    render_search_bar(
        frame,
        filters[0],
        page.table.search_input(),
        state.mode == InputMode::Searching,
        palette,
    );

    let filtering = state.mode == InputMode::FilteringClientId;
    let client_id = if filtering {
        format!("{}_", page.client_id_input)
    } else {
        page.query.client_id.clone()
    };
    frame.render_widget(
        Paragraph::new(client_id).block(panel(" Client ID (f) ", filtering, palette)),
        filters[1],
    );

    let title = if page.exporting {
        "Outgoing Messages (exporting...)"
    } else {
        "Outgoing Messages"
    };
    render_table(
        frame,
        rows[2],
        &page.table,
        title,
        state.mode == InputMode::Normal,
        palette,
        spinner_index,
    );

    frame.render_widget(
        Paragraph::new(summary_line(
            page.summary(),
            page.has_prev(),
            page.has_next(),
            palette,
        )),
        rows[3],
    );
}

pub fn render_clients(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    palette: &Palette,
    spinner_index: usize,
) {
    let page = &state.clients;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_search_bar(
        frame,
        rows[0],
        page.table.search_input(),
        state.mode == InputMode::Searching,
        palette,
    );

    render_table(
        frame,
        rows[1],
        &page.table,
        "API Clients (a: create)",
        state.mode == InputMode::Normal,
        palette,
        spinner_index,
    );

    frame.render_widget(
        Paragraph::new(summary_line(
            page.summary(),
            page.table.has_prev_page(),
            page.table.has_next_page(),
            palette,
        )),
        rows[2],
    );
}

pub fn render_not_found(frame: &mut Frame, area: Rect, route: &str, palette: &Palette) {
    let text = vec![
        Line::from(Span::styled(
            "404",
            Style::default()
                .fg(palette.danger)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Nothing lives at {route}")),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to go to the dashboard",
            Style::default().fg(palette.muted),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.text))
            .block(panel(" Not Found ", false, palette)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_key_masks_unless_editing() {
        assert_eq!(display_key("sk-live-123456", true, true), "sk-live-123456");
        assert_ne!(display_key("sk-live-123456", true, false), "sk-live-123456");
        assert_ne!(display_key("sk-live-123456", false, true), "sk-live-123456");
    }

    #[test]
    fn test_preview_counts_extra_lines() {
        assert_eq!(preview("hello", 40), "hello");
        assert_eq!(
            preview("line one\nline two\nline three", 40),
            "line one (+2 lines, Enter to edit)"
        );
        assert_eq!(preview("", 40), "");
    }
}
