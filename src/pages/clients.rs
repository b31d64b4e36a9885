use super::forms::cycle_focus;
use crate::api::ApiError;
use crate::api::clients::ClientQuery;
use crate::table::{CellValue, Column, DataTable, Pagination, Pin, TableEvent, TableRow};
use crate::theme::Palette;
use crate::types::{ApiClient, CreateApiClientPayload, ListResponse};
use crate::utils::format_timestamp;
use ratatui::text::Line;
use tracing::{debug, error};

impl TableRow for ApiClient {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => CellValue::from(&self.id),
            "name" => CellValue::text(self.name.as_deref()),
            "description" => CellValue::text(self.description.as_deref()),
            "created_at" => CellValue::text(self.created_at.as_deref()),
            _ => CellValue::Null,
        }
    }
}

fn created_at(row: &ApiClient, _palette: &Palette) -> Line<'static> {
    Line::from(row.created_at.as_deref().map(format_timestamp).unwrap_or_default())
}

pub fn columns() -> Vec<Column<ApiClient>> {
    vec![
        Column::new("id", "ID").width(8).pinned(Pin::Left),
        Column::new("name", "Client").width(24).sortable(),
        Column::new("description", "Description").width(40),
        Column::new("created_at", "Created At")
            .width(20)
            .sortable()
            .render(created_at),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    Name,
    Description,
}

impl CreateField {
    pub const ALL: [CreateField; 2] = [CreateField::Name, CreateField::Description];

    pub fn label(self) -> &'static str {
        match self {
            CreateField::Name => "Client Name *",
            CreateField::Description => "Description",
        }
    }
}

/// Create modal state
#[derive(Debug, Clone, Default)]
pub struct CreateClientForm {
    pub name: String,
    pub description: String,
    pub focus: usize,
    pub submitting: bool,
}

impl CreateClientForm {
    pub fn focused(&self) -> CreateField {
        CreateField::ALL[self.focus.min(CreateField::ALL.len() - 1)]
    }

    pub fn toggle_focus(&mut self) {
        self.focus = cycle_focus(self.focus, CreateField::ALL.len(), true);
    }

    pub fn value_mut(&mut self, field: CreateField) -> &mut String {
        match field {
            CreateField::Name => &mut self.name,
            CreateField::Description => &mut self.description,
        }
    }

    /// `Err` carries the warning to show when the name is blank
    pub fn begin_submit(&mut self) -> Result<Option<CreateApiClientPayload>, &'static str> {
        if self.name.trim().is_empty() {
            return Err("Client name is required");
        }
        if self.submitting {
            return Ok(None);
        }
        self.submitting = true;
        Ok(Some(CreateApiClientPayload {
            client_name: self.name.clone(),
            description: self.description.clone(),
        }))
    }
}

#[derive(Debug, Clone)]
pub struct ApiClientsPage {
    pub table: DataTable<ApiClient>,
    pub query: ClientQuery,
    pub total: Option<usize>,
    pub create: Option<CreateClientForm>,
    request_seq: u64,
}

impl ApiClientsPage {
    pub fn new(page_size: usize) -> Self {
        Self {
            table: DataTable::new(
                columns(),
                Pagination::Server {
                    page_size,
                    total: None,
                },
            ),
            query: ClientQuery::new(page_size),
            total: None,
            create: None,
            request_seq: 0,
        }
    }

    pub fn apply_table_event(&mut self, event: TableEvent) -> bool {
        match event {
            TableEvent::PageChanged(page) => {
                self.query.offset = (page.max(1) - 1) * self.query.limit;
                self.table.set_page(page);
                true
            }
            TableEvent::PageSizeChanged(size) => {
                self.query.limit = size;
                self.query.offset = 0;
                self.table.set_page(1);
                true
            }
            TableEvent::SearchChanged(q) => {
                if q.trim() == self.query.q.trim() {
                    return false;
                }
                self.query.q = q;
                self.query.offset = 0;
                self.table.set_page(1);
                true
            }
        }
    }

    pub fn begin_fetch(&mut self) -> (u64, ClientQuery) {
        self.request_seq += 1;
        self.table.set_loading(true);
        (self.request_seq, self.query.clone())
    }

    pub fn apply_fetch(
        &mut self,
        request_id: u64,
        result: Result<ListResponse<ApiClient>, ApiError>,
    ) -> bool {
        if request_id != self.request_seq {
            debug!(
                request_id,
                latest = self.request_seq,
                "dropping stale api clients response"
            );
            return false;
        }

        match result {
            Ok(resp) => {
                self.total = resp.total.map(|t| t as usize);
                self.table.set_total(self.total);
                self.table.set_rows(resp.data);
            }
            Err(err) => {
                error!(error = %err, "failed to fetch api clients");
                self.total = Some(0);
                self.table.set_total(Some(0));
                self.table.set_rows(Vec::new());
            }
        }
        self.table.set_loading(false);
        true
    }

    pub fn open_create(&mut self) {
        self.create = Some(CreateClientForm::default());
    }

    pub fn close_create(&mut self) {
        self.create = None;
    }

    pub fn summary(&self) -> String {
        let shown = self.table.rows().len();
        match self.total {
            Some(total) => {
                let (from, to) =
                    crate::table::showing_range(self.query.offset, self.query.limit, total);
                format!("Showing {from} to {to} of {total}")
            }
            None if shown == 0 => "No clients".to_string(),
            None => format!(
                "Showing {} to {}",
                self.query.offset + 1,
                self.query.offset + shown
            ),
        }
    }
}
