//! Drawing for `DataTable`
//!
//! Pinned columns are always drawn. The unpinned columns start at the
//! table's scroll offset and are cut off at the right when they no longer
//! fit. Whatever is drawn keeps the declared column order.

use super::{DataTable, Pin, TableRow};
use crate::theme::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};

pub const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

const COLUMN_SPACING: u16 = 1;

/// Column indices in draw order (ascending, one entry per drawn column)
pub fn layout_columns<T>(table: &DataTable<T>, width: u16) -> Vec<usize>
where
    T: TableRow,
{
    let columns = table.columns();
    let left: Vec<usize> = (0..columns.len())
        .filter(|i| columns[*i].pinned == Some(Pin::Left))
        .collect();
    let right: Vec<usize> = (0..columns.len())
        .filter(|i| columns[*i].pinned == Some(Pin::Right))
        .collect();

    let pinned_width: u16 = left
        .iter()
        .chain(right.iter())
        .map(|i| columns[*i].width + COLUMN_SPACING)
        .sum();
    let mut budget = width.saturating_sub(pinned_width);

    let mut middle = Vec::new();
    for idx in (0..columns.len())
        .filter(|i| columns[*i].pinned.is_none())
        .skip(table.scroll_offset())
    {
        let needed = columns[idx].width + COLUMN_SPACING;
        // Always show at least one scrolling column
        if needed > budget && !middle.is_empty() {
            break;
        }
        budget = budget.saturating_sub(needed);
        middle.push(idx);
    }

    let mut order: Vec<usize> = left.into_iter().chain(middle).chain(right).collect();
    order.sort_unstable();
    order
}

pub fn render_table<T: TableRow>(
    frame: &mut Frame,
    area: Rect,
    table: &DataTable<T>,
    title: &str,
    focused: bool,
    palette: &Palette,
    spinner_index: usize,
) {
    let border_style = if focused {
        Style::default().fg(palette.focused_border)
    } else {
        Style::default().fg(palette.border)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {title} · page {} ", table.page()));

    let inner_width = block.inner(area).width;
    let order = layout_columns(table, inner_width);
    let columns = table.columns();

    let pinned_style = Style::default().bg(palette.pinned);

    let header_cells = order.iter().map(|idx| {
        let col = &columns[*idx];
        let mut style = Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD);
        if col.pinned.is_some() {
            style = style.bg(palette.pinned);
        }
        if focused && *idx == table.cursor_column() {
            style = style.fg(palette.primary).add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(table.header_label(*idx)).style(style)
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(palette.pinned))
        .height(1);

    let visible = table.visible_rows();
    let rows: Vec<Row> = if visible.is_empty() {
        let placeholder = if table.is_loading() { "" } else { "No rows" };
        vec![Row::new(vec![
            Cell::from(placeholder).style(Style::default().fg(palette.muted)),
        ])]
    } else {
        visible
            .iter()
            .map(|row| {
                let cells = order.iter().map(|idx| {
                    let col = &columns[*idx];
                    let line: Line = match col.render {
                        Some(render) => render(row, palette),
                        None => Line::from(row.cell(col.key).to_string()),
                    };
                    let cell = Cell::from(line);
                    if col.pinned.is_some() {
                        cell.style(pinned_style)
                    } else {
                        cell
                    }
                });
                Row::new(cells).style(Style::default().fg(palette.text))
            })
            .collect()
    };

    let widths: Vec<Constraint> = if visible.is_empty() {
        vec![Constraint::Min(0)]
    } else {
        order
            .iter()
            .map(|idx| Constraint::Length(columns[*idx].width))
            .collect()
    };

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(COLUMN_SPACING)
        .row_highlight_style(
            Style::default()
                .bg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if focused && !visible.is_empty() {
        state.select(Some(table.selected_index()));
    }
    frame.render_stateful_widget(widget, area, &mut state);

    if table.is_loading() {
        render_loading_overlay(frame, area, palette, spinner_index);
    }
}

/// Small box in the middle of the table; the rows underneath stay drawn
fn render_loading_overlay(frame: &mut Frame, area: Rect, palette: &Palette, spinner_index: usize) {
    let width = 24.min(area.width);
    let height = 3.min(area.height);
    let overlay = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, overlay);
    let text = format!("{} Syncing data", SPINNER[spinner_index % SPINNER.len()]);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.warning).bg(palette.surface))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.warning)),
        );
    frame.render_widget(paragraph, overlay);
}
