//! Style helpers shared by the renderers

use crate::pages::forms::FormPhase;
use crate::theme::Palette;
use crate::types::ToastKind;
use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block whose border follows focus
pub fn panel<'a>(title: &'a str, focused: bool, palette: &Palette) -> Block<'a> {
    let border = if focused {
        palette.focused_border
    } else {
        palette.border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
}

pub fn toast_color(kind: ToastKind, palette: &Palette) -> Color {
    match kind {
        ToastKind::Success => palette.success,
        ToastKind::Warning => palette.warning,
        ToastKind::Error => palette.danger,
    }
}

pub fn field_label_style(focused: bool, palette: &Palette) -> Style {
    if focused {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    }
}

pub fn phase_style(phase: &FormPhase, palette: &Palette) -> Style {
    match phase {
        FormPhase::Success(_) => Style::default().fg(palette.success),
        FormPhase::Error(_) => Style::default().fg(palette.danger),
        FormPhase::Submitting => Style::default().fg(palette.warning),
        FormPhase::Idle => Style::default().fg(palette.muted),
    }
}
