//! Generic tabular viewer
//!
//! `DataTable<T>` is the pure model: column descriptors, rows, sort state,
//! paging, selection and the search input. It does no I/O. Page and page-size
//! changes come back to the caller as `TableEvent`s, and the caller decides
//! whether they mean "slice locally" (client pagination) or "re-query"
//! (server pagination).
//!
//! Drawing lives in [`render`].

pub mod render;

use crate::theme::Palette;
use ratatui::text::Line;
use std::cmp::Ordering;
use std::fmt;

/// A sortable, displayable field value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Int(i64),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) => CellValue::Text(s.to_string()),
            None => CellValue::Null,
        }
    }

    /// Natural ordering of two defined values
    fn natural_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (a, b) => a.to_string().cmp(&b.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => CellValue::Text(n.to_string()),
            },
            serde_json::Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// Rows expose their fields by column key
pub trait TableRow {
    fn cell(&self, key: &str) -> CellValue;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pin {
    Left,
    Right,
}

/// Custom cell renderer, e.g. a colored status badge
pub type CellRenderer<T> = fn(&T, &Palette) -> Line<'static>;

/// Declarative column description
pub struct Column<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub pinned: Option<Pin>,
    pub width: u16,
    pub render: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: false,
            pinned: None,
            width: 14,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn pinned(mut self, pin: Pin) -> Self {
        self.pinned = Some(pin);
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn render(mut self, render: CellRenderer<T>) -> Self {
        self.render = Some(render);
        self
    }
}

// Manual impls: derive would demand T: Clone/Debug even though T is only
// used behind the fn pointer.
impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label,
            sortable: self.sortable,
            pinned: self.pinned,
            width: self.width,
            render: self.render,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("pinned", &self.pinned)
            .field("width", &self.width)
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// The table holds the full set and pages it in memory
    Client { page_size: usize },
    /// The table holds one page; `total` is the server-side row count if known
    Server {
        page_size: usize,
        total: Option<usize>,
    },
}

/// Requests the table sends back to its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// 1-indexed page
    PageChanged(usize),
    PageSizeChanged(usize),
    SearchChanged(String),
}

#[derive(Debug, Clone)]
pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    pagination: Pagination,
    page: usize,
    sort: Option<SortState>,
    cursor_column: usize,
    /// First unpinned column drawn
    scroll: usize,
    selected: usize,
    loading: bool,
    search_input: String,
}

impl<T: TableRow> DataTable<T> {
    pub fn new(columns: Vec<Column<T>>, pagination: Pagination) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            pagination,
            page: 1,
            sort: None,
            cursor_column: 0,
            scroll: 0,
            selected: 0,
            loading: false,
            search_input: String::new(),
        }
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Replace the data set. Selection and page are clamped to the new data.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        if let Pagination::Client { .. } = self.pagination {
            self.page = self.page.min(self.total_pages());
        }
        let shown = self.visible_rows().len();
        if self.selected >= shown {
            self.selected = shown.saturating_sub(1);
        }
    }

    /// Server-side row count (ignored for client pagination)
    pub fn set_total(&mut self, total: Option<usize>) {
        if let Pagination::Server { page_size, .. } = self.pagination {
            self.pagination = Pagination::Server { page_size, total };
        }
    }

    /// Jump to a page without emitting an event (owner-driven resets)
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
        self.selected = 0;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        match self.pagination {
            Pagination::Client { page_size } | Pagination::Server { page_size, .. } => {
                page_size.max(1)
            }
        }
    }

    pub fn total_pages(&self) -> usize {
        let page_size = self.page_size();
        match self.pagination {
            Pagination::Client { .. } => self.rows.len().div_ceil(page_size).max(1),
            Pagination::Server {
                total: Some(total), ..
            } => total.div_ceil(page_size).max(1),
            // Unknown total: a full page suggests there is at least one more
            Pagination::Server { total: None, .. } => {
                if self.rows.len() >= page_size {
                    self.page + 1
                } else {
                    self.page
                }
            }
        }
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn next_page(&mut self) -> Option<TableEvent> {
        if !self.has_next_page() {
            return None;
        }
        self.page += 1;
        self.selected = 0;
        Some(TableEvent::PageChanged(self.page))
    }

    pub fn prev_page(&mut self) -> Option<TableEvent> {
        if !self.has_prev_page() {
            return None;
        }
        self.page -= 1;
        self.selected = 0;
        Some(TableEvent::PageChanged(self.page))
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Option<TableEvent> {
        let page_size = page_size.max(1);
        if page_size == self.page_size() {
            return None;
        }
        self.pagination = match self.pagination {
            Pagination::Client { .. } => Pagination::Client { page_size },
            Pagination::Server { total, .. } => Pagination::Server { page_size, total },
        };
        self.page = 1;
        self.selected = 0;
        Some(TableEvent::PageSizeChanged(page_size))
    }

    /// Step to the next size in `sizes`, wrapping around
    pub fn cycle_page_size(&mut self, sizes: &[usize]) -> Option<TableEvent> {
        if sizes.is_empty() {
            return None;
        }
        let current = self.page_size();
        let next = sizes
            .iter()
            .copied()
            .find(|s| *s > current)
            .unwrap_or(sizes[0]);
        self.set_page_size(next)
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    /// Header click: unsorted -> asc -> desc -> asc; a new column starts at asc.
    /// Returns false for non-sortable columns.
    pub fn toggle_sort(&mut self, column: usize) -> bool {
        match self.columns.get(column) {
            Some(col) if col.sortable => {}
            _ => return false,
        }

        self.sort = Some(match self.sort {
            Some(SortState {
                column: current,
                order: SortOrder::Ascending,
            }) if current == column => SortState {
                column,
                order: SortOrder::Descending,
            },
            _ => SortState {
                column,
                order: SortOrder::Ascending,
            },
        });
        self.selected = 0;
        true
    }

    pub fn cursor_column(&self) -> usize {
        self.cursor_column
    }

    pub fn cursor_left(&mut self) {
        self.cursor_column = self.cursor_column.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_column + 1 < self.columns.len() {
            self.cursor_column += 1;
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn scroll_left(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Stops with the last unpinned column still in view
    pub fn scroll_right(&mut self) {
        let unpinned = self.columns.iter().filter(|c| c.pinned.is_none()).count();
        if self.scroll + 1 < unpinned {
            self.scroll += 1;
        }
    }

    pub fn sort_by_cursor(&mut self) -> bool {
        self.toggle_sort(self.cursor_column)
    }

    /// All rows in display order (sorted when a sort key is active)
    pub fn sorted_rows(&self) -> Vec<&T> {
        let mut rows: Vec<&T> = self.rows.iter().collect();

        if let Some(SortState { column, order }) = self.sort {
            if let Some(col) = self.columns.get(column) {
                let key = col.key;
                // sort_by is stable: ties keep their input order
                rows.sort_by(|a, b| compare_cells(&a.cell(key), &b.cell(key), order));
            }
        }

        rows
    }

    /// Rows for the current page
    pub fn visible_rows(&self) -> Vec<&T> {
        let rows = self.sorted_rows();
        match self.pagination {
            Pagination::Server { .. } => rows,
            Pagination::Client { .. } => {
                let page_size = self.page_size();
                let start = (self.page - 1) * page_size;
                let end = (start + page_size).min(rows.len());
                if start >= rows.len() {
                    Vec::new()
                } else {
                    rows[start..end].to_vec()
                }
            }
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&T> {
        self.visible_rows().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let shown = self.visible_rows().len();
        if self.selected + 1 < shown {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Header text with the sort indicator for the active column
    pub fn header_label(&self, column: usize) -> String {
        let Some(col) = self.columns.get(column) else {
            return String::new();
        };
        match self.sort_state() {
            Some(SortState {
                column: active,
                order,
            }) if active == column => {
                let arrow = match order {
                    SortOrder::Ascending => "▲",
                    SortOrder::Descending => "▼",
                };
                format!("{} {arrow}", col.label)
            }
            _ if col.sortable => format!("{} ↕", col.label),
            _ => col.label.to_string(),
        }
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn push_search_char(&mut self, c: char) -> &str {
        self.search_input.push(c);
        &self.search_input
    }

    pub fn pop_search_char(&mut self) -> &str {
        self.search_input.pop();
        &self.search_input
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
    }
}

/// Nulls go last no matter the direction
fn compare_cells(a: &CellValue, b: &CellValue, order: SortOrder) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.natural_cmp(b);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        }
    }
}

/// 1-indexed (from, to) for "Showing {from} to {to} of {total}"
pub fn showing_range(offset: usize, limit: usize, total: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    let from = (offset + 1).min(total);
    let to = (offset + limit).min(total);
    (from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        name: Option<&'static str>,
    }

    impl TableRow for Item {
        fn cell(&self, key: &str) -> CellValue {
            match key {
                "id" => CellValue::Int(self.id),
                "name" => CellValue::text(self.name),
                _ => CellValue::Null,
            }
        }
    }

    fn item(id: i64, name: Option<&'static str>) -> Item {
        Item { id, name }
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("id", "ID").sortable().pinned(Pin::Left),
            Column::new("name", "Name").sortable(),
            Column::new("note", "Note"),
        ]
    }

    fn client_table(rows: Vec<Item>, page_size: usize) -> DataTable<Item> {
        let mut table = DataTable::new(columns(), Pagination::Client { page_size });
        table.set_rows(rows);
        table
    }

    fn names(rows: &[&Item]) -> Vec<Option<&'static str>> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_sort_ascending_by_name() {
        let mut table = client_table(vec![item(2, Some("B")), item(1, Some("A"))], 10);
        assert!(table.toggle_sort(1));
        assert_eq!(names(&table.visible_rows()), vec![Some("A"), Some("B")]);
    }

    #[test]
    fn test_sort_cycle_and_column_switch() {
        let mut table = client_table(
            vec![item(3, Some("A")), item(1, Some("C")), item(2, Some("B"))],
            10,
        );
        assert_eq!(table.sort_state(), None);

        table.toggle_sort(0);
        let ids: Vec<i64> = table.visible_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        table.toggle_sort(0);
        let ids: Vec<i64> = table.visible_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        table.toggle_sort(0);
        assert_eq!(
            table.sort_state(),
            Some(SortState {
                column: 0,
                order: SortOrder::Ascending
            })
        );

        // Descending on id, then switching column resets to ascending
        table.toggle_sort(0);
        table.toggle_sort(1);
        assert_eq!(
            table.sort_state(),
            Some(SortState {
                column: 1,
                order: SortOrder::Ascending
            })
        );
        assert_eq!(
            names(&table.visible_rows()),
            vec![Some("A"), Some("B"), Some("C")]
        );
    }

    #[test]
    fn test_non_sortable_column_ignored() {
        let mut table = client_table(vec![item(1, None)], 10);
        assert!(!table.toggle_sort(2));
        assert!(!table.toggle_sort(99));
        assert_eq!(table.sort_state(), None);
    }

    #[test]
    fn test_nulls_last_both_directions() {
        let mut table = client_table(
            vec![item(1, None), item(2, Some("B")), item(3, Some("A")), item(4, None)],
            10,
        );
        table.toggle_sort(1);
        assert_eq!(
            names(&table.visible_rows()),
            vec![Some("A"), Some("B"), None, None]
        );
        table.toggle_sort(1);
        assert_eq!(
            names(&table.visible_rows()),
            vec![Some("B"), Some("A"), None, None]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut table = client_table(
            vec![item(1, Some("X")), item(2, Some("X")), item(3, Some("A"))],
            10,
        );
        table.toggle_sort(1);
        let ids: Vec<i64> = table.visible_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_unsorted_keeps_input_order() {
        let table = client_table(vec![item(2, Some("B")), item(1, Some("A"))], 10);
        let ids: Vec<i64> = table.visible_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_client_pagination_slices() {
        let rows: Vec<Item> = (1..=23).map(|i| item(i, None)).collect();
        let mut table = client_table(rows, 10);
        assert_eq!(table.total_pages(), 3);

        let ids: Vec<i64> = table.visible_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());

        assert_eq!(table.next_page(), Some(TableEvent::PageChanged(2)));
        assert_eq!(table.next_page(), Some(TableEvent::PageChanged(3)));
        let ids: Vec<i64> = table.visible_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![21, 22, 23]);

        assert_eq!(table.next_page(), None);
        assert!(!table.has_next_page());
    }

    #[test]
    fn test_total_pages_minimum_one() {
        let table = client_table(Vec::new(), 10);
        assert_eq!(table.total_pages(), 1);
        assert!(table.visible_rows().is_empty());
        assert!(!table.has_prev_page());
        assert!(!table.has_next_page());
    }

    #[test]
    fn test_set_rows_clamps_page() {
        let rows: Vec<Item> = (1..=30).map(|i| item(i, None)).collect();
        let mut table = client_table(rows, 10);
        table.next_page();
        table.next_page();
        assert_eq!(table.page(), 3);

        table.set_rows((1..=5).map(|i| item(i, None)).collect());
        assert_eq!(table.page(), 1);
        assert_eq!(table.visible_rows().len(), 5);
    }

    #[test]
    fn test_server_mode_does_not_slice() {
        let mut table = DataTable::new(
            columns(),
            Pagination::Server {
                page_size: 10,
                total: Some(47),
            },
        );
        table.set_rows((41..=47).map(|i| item(i, None)).collect());
        table.set_page(5);

        assert_eq!(table.visible_rows().len(), 7);
        assert_eq!(table.total_pages(), 5);
        assert!(!table.has_next_page());
        assert_eq!(table.prev_page(), Some(TableEvent::PageChanged(4)));
    }

    #[test]
    fn test_server_mode_unknown_total() {
        let mut table = DataTable::new(
            columns(),
            Pagination::Server {
                page_size: 2,
                total: None,
            },
        );
        table.set_rows(vec![item(1, None), item(2, None)]);
        assert!(table.has_next_page());

        table.set_rows(vec![item(3, None)]);
        assert!(!table.has_next_page());
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let rows: Vec<Item> = (1..=30).map(|i| item(i, None)).collect();
        let mut table = client_table(rows, 10);
        table.next_page();

        assert_eq!(
            table.cycle_page_size(&[10, 25, 50]),
            Some(TableEvent::PageSizeChanged(25))
        );
        assert_eq!(table.page(), 1);
        assert_eq!(table.total_pages(), 2);

        assert_eq!(table.set_page_size(25), None);
        assert_eq!(
            table.cycle_page_size(&[10, 25, 50]),
            Some(TableEvent::PageSizeChanged(50))
        );
        assert_eq!(
            table.cycle_page_size(&[10, 25, 50]),
            Some(TableEvent::PageSizeChanged(10))
        );
    }

    #[test]
    fn test_selection_bounds() {
        let mut table = client_table(vec![item(1, None), item(2, None)], 10);
        table.select_prev();
        assert_eq!(table.selected_index(), 0);
        table.select_next();
        table.select_next();
        assert_eq!(table.selected_index(), 1);
        assert_eq!(table.selected_row().map(|r| r.id), Some(2));

        table.set_rows(vec![item(9, None)]);
        assert_eq!(table.selected_index(), 0);
    }

    #[test]
    fn test_header_labels() {
        let mut table = client_table(vec![], 10);
        assert_eq!(table.header_label(0), "ID ↕");
        assert_eq!(table.header_label(2), "Note");
        table.toggle_sort(0);
        assert_eq!(table.header_label(0), "ID ▲");
        table.toggle_sort(0);
        assert_eq!(table.header_label(0), "ID ▼");
    }

    #[test]
    fn test_cursor_sort() {
        let mut table = client_table(vec![], 10);
        table.cursor_right();
        table.cursor_right();
        table.cursor_right();
        assert_eq!(table.cursor_column(), 2);
        assert!(!table.sort_by_cursor());
        table.cursor_left();
        assert!(table.sort_by_cursor());
        assert_eq!(table.sort_state().map(|s| s.column), Some(1));
    }

    #[test]
    fn test_scroll_only_counts_unpinned() {
        let mut table = client_table(vec![], 10);
        table.scroll_left();
        assert_eq!(table.scroll_offset(), 0);
        table.scroll_right();
        assert_eq!(table.scroll_offset(), 1);
        // two unpinned columns: name, note
        table.scroll_right();
        assert_eq!(table.scroll_offset(), 1);
        table.scroll_left();
        assert_eq!(table.scroll_offset(), 0);
    }

    #[test]
    fn test_showing_range() {
        assert_eq!(showing_range(40, 10, 47), (41, 47));
        assert_eq!(showing_range(0, 50, 0), (0, 0));
        assert_eq!(showing_range(0, 10, 47), (1, 10));
    }

    #[test]
    fn test_cell_value_from_json() {
        assert_eq!(CellValue::from(&serde_json::json!(5)), CellValue::Int(5));
        assert_eq!(
            CellValue::from(&serde_json::json!("abc")),
            CellValue::Text("abc".to_string())
        );
        assert_eq!(CellValue::from(&serde_json::Value::Null), CellValue::Null);
    }

    #[test]
    fn test_search_input() {
        let mut table = client_table(vec![], 10);
        table.push_search_char('o');
        assert_eq!(table.push_search_char('t'), "ot");
        assert_eq!(table.pop_search_char(), "o");
        table.clear_search();
        assert_eq!(table.search_input(), "");
    }
}
