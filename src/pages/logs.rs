//! Outgoing message log
//!
//! Server-paginated: the table holds one page and every filter or paging
//! change becomes a new `MessageQuery`. Each dispatched query gets a fresh
//! request id and only the response carrying the latest id is applied.

use crate::api::ApiError;
use crate::api::messages::MessageQuery;
use crate::table::{CellValue, Column, DataTable, Pagination, Pin, TableEvent, TableRow};
use crate::theme::Palette;
use crate::types::{Channel, ChannelFilter, DeliveryStatus, ListResponse, OutgoingMessage};
use crate::utils::format_timestamp;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use tracing::{debug, error};

pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

impl TableRow for OutgoingMessage {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => CellValue::Int(self.id),
            "api_client" => CellValue::text(self.api_client.as_deref()),
            "client_id" => CellValue::text(self.client_id.as_deref()),
            "channel" => CellValue::Text(self.channel.clone()),
            "recipient" => CellValue::Text(self.recipient.clone()),
            "subject" => CellValue::text(self.subject.as_deref()),
            "provider" => CellValue::text(self.provider.as_deref()),
            "status" => CellValue::Text(self.status.clone()),
            "created_at" => CellValue::text(self.created_at.as_deref()),
            _ => CellValue::Null,
        }
    }
}

pub fn status_color(status: DeliveryStatus, palette: &Palette) -> ratatui::style::Color {
    match status {
        DeliveryStatus::Sent | DeliveryStatus::Delivered => palette.success,
        DeliveryStatus::Failed => palette.danger,
        DeliveryStatus::Pending => palette.warning,
        DeliveryStatus::Unknown => palette.muted,
    }
}

/// Raw server text, or a placeholder when the field was null
fn raw_or_unknown(raw: &str) -> &str {
    if raw.trim().is_empty() { "unknown" } else { raw }
}

fn channel_badge(row: &OutgoingMessage, palette: &Palette) -> Line<'static> {
    let label = match row.channel_kind() {
        Channel::Unknown => raw_or_unknown(&row.channel),
        known => known.label(),
    };
    Line::from(Span::styled(
        format!(" {label} "),
        Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
    ))
}

fn status_badge(row: &OutgoingMessage, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {} ", raw_or_unknown(&row.status)),
        Style::default()
            .fg(status_color(row.delivery_status(), palette))
            .add_modifier(Modifier::BOLD),
    ))
}

fn sent_at(row: &OutgoingMessage, _palette: &Palette) -> Line<'static> {
    Line::from(row.created_at.as_deref().map(format_timestamp).unwrap_or_default())
}

pub fn columns() -> Vec<Column<OutgoingMessage>> {
    vec![
        Column::new("id", "ID").width(8).pinned(Pin::Left),
        Column::new("api_client", "Client").width(18).sortable(),
        Column::new("channel", "Channel")
            .width(11)
            .sortable()
            .render(channel_badge),
        Column::new("recipient", "Recipient").width(28).sortable(),
        Column::new("subject", "Subject").width(24),
        Column::new("provider", "Provider").width(12).sortable(),
        Column::new("status", "Status").width(11).render(status_badge),
        Column::new("created_at", "Sent At")
            .width(20)
            .sortable()
            .render(sent_at)
            .pinned(Pin::Right),
    ]
}

#[derive(Debug, Clone)]
pub struct MessageLogPage {
    pub table: DataTable<OutgoingMessage>,
    pub query: MessageQuery,
    pub total: usize,
    /// Client id being typed; committed with Enter
    pub client_id_input: String,
    pub exporting: bool,
    request_seq: u64,
}

impl MessageLogPage {
    pub fn new(page_size: usize) -> Self {
        Self {
            table: DataTable::new(
                columns(),
                Pagination::Server {
                    page_size,
                    total: Some(0),
                },
            ),
            query: MessageQuery::new(page_size),
            total: 0,
            client_id_input: String::new(),
            exporting: false,
            request_seq: 0,
        }
    }

    fn reset_offset(&mut self) {
        self.query.offset = 0;
        self.table.set_page(1);
    }

    /// Fold a table request into the query. Returns true when a fetch is needed.
    pub fn apply_table_event(&mut self, event: TableEvent) -> bool {
        match event {
            TableEvent::PageChanged(page) => {
                self.query.offset = (page.max(1) - 1) * self.query.limit;
                self.table.set_page(page);
                true
            }
            TableEvent::PageSizeChanged(size) => {
                self.query.limit = size;
                self.reset_offset();
                true
            }
            TableEvent::SearchChanged(q) => {
                if q.trim() == self.query.q.trim() {
                    return false;
                }
                self.query.q = q;
                self.reset_offset();
                true
            }
        }
    }

    pub fn set_channel(&mut self, channel: ChannelFilter) -> bool {
        if self.query.channel == channel {
            return false;
        }
        self.query.channel = channel;
        self.reset_offset();
        true
    }

    pub fn commit_client_id(&mut self) -> bool {
        let value = self.client_id_input.trim().to_string();
        if value == self.query.client_id {
            return false;
        }
        self.query.client_id = value;
        self.reset_offset();
        true
    }

    /// Claim a request id for the current query
    pub fn begin_fetch(&mut self) -> (u64, MessageQuery) {
        self.request_seq += 1;
        self.table.set_loading(true);
        (self.request_seq, self.query.clone())
    }

    /// Apply a list response if it answers the newest request.
    /// Failures leave the page empty with a total of 0.
    pub fn apply_fetch(
        &mut self,
        request_id: u64,
        result: Result<ListResponse<OutgoingMessage>, ApiError>,
    ) -> bool {
        if request_id != self.request_seq {
            debug!(
                request_id,
                latest = self.request_seq,
                "dropping stale outgoing messages response"
            );
            return false;
        }

        match result {
            Ok(resp) => {
                self.total = resp.total.unwrap_or(0) as usize;
                self.table.set_total(Some(self.total));
                self.table.set_rows(resp.data);
            }
            Err(err) => {
                error!(error = %err, "failed to fetch outgoing messages");
                self.total = 0;
                self.table.set_total(Some(0));
                self.table.set_rows(Vec::new());
            }
        }
        self.table.set_loading(false);
        true
    }

    pub fn has_prev(&self) -> bool {
        self.query.offset > 0
    }

    pub fn has_next(&self) -> bool {
        self.query.offset + self.query.limit < self.total
    }

    pub fn summary(&self) -> String {
        let (from, to) =
            crate::table::showing_range(self.query.offset, self.query.limit, self.total);
        format!("Showing {from} to {to} of {}", self.total)
    }
}
