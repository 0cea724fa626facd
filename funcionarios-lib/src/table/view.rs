//! Table rendering
//!
//! Binds an entity's columns to the page produced by the pipeline. Rendering
//! is presentation only: user intents go back to the [`EntityStore`].

use super::Direction;
use super::EntityStore;
use super::PageInfo;
use super::RowIntent;
use super::TableRecord;
use super::date::parse_timestamp;
use super::filter_records;
use super::paginate;
use super::sort_records;
use crate::model::FuncionarioRef;

/// One table column.
pub struct Column<R: TableRecord> {
    /// Header label.
    pub header: &'static str,
    /// Cell formatter.
    pub cell: fn(&R) -> String,
    /// Field sorted when the header is clicked.
    pub sort: Option<R::SortField>,
}

impl<R: TableRecord> Column<R> {
    /// Creates a non-sortable column.
    pub fn new(header: &'static str, cell: fn(&R) -> String) -> Self {
        Self {
            header,
            cell,
            sort: None,
        }
    }

    /// Makes the header sort by `field`.
    pub fn sortable(mut self, field: R::SortField) -> Self {
        self.sort = Some(field);
        self
    }
}

impl<R: TableRecord> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            header: self.header,
            cell: self.cell,
            sort: self.sort,
        }
    }
}

impl<R: TableRecord> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("sort", &self.sort)
            .finish()
    }
}

/// A rendered column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell<F> {
    pub label: &'static str,
    /// Field to pass to [`EntityStore::toggle_sort`] on click.
    pub sort: Option<F>,
    /// Arrow to draw if this column is the active sort.
    pub indicator: Option<Direction>,
}

/// A rendered row.
#[derive(Debug, Clone)]
pub struct Row<'a, R> {
    pub record: &'a R,
    pub cells: Vec<String>,
    pub intents: Vec<RowIntent>,
    /// Ticked for bulk actions.
    pub selected: bool,
}

/// Everything a list view draws for the current state.
#[derive(Debug, Clone)]
pub struct TableState<'a, R: TableRecord> {
    pub headers: Vec<HeaderCell<R::SortField>>,
    pub rows: Vec<Row<'a, R>>,
    pub page: PageInfo,
    /// Ids of every record matching the filters, across all pages.
    pub matching_ids: Vec<i64>,
    /// Page sizes for the page-size selector.
    pub page_size_options: Vec<usize>,
    /// Page buttons for the pager strip.
    pub page_numbers: Vec<usize>,
}

impl<R: TableRecord> TableState<'_, R> {
    /// Returns `true` if the filters left nothing to show.
    pub fn is_empty(&self) -> bool {
        self.page.total_items == 0
    }

    /// "Mostrando 11 a 20 de 45" style summary.
    pub fn summary(&self) -> String {
        format!(
            "Mostrando {} a {} de {}",
            self.page.start_index, self.page.end_index, self.page.total_items
        )
    }
}

/// Column layout of one entity's table.
#[derive(Debug, Clone)]
pub struct TableView<R: TableRecord> {
    columns: Vec<Column<R>>,
}

impl<R: TableRecord> Default for TableView<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TableRecord> TableView<R> {
    /// Uses the entity's own column layout.
    pub fn new() -> Self {
        Self::with_columns(R::columns())
    }

    /// Uses a custom column layout.
    pub fn with_columns(columns: Vec<Column<R>>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Runs filter, sort and paginate over `collection` for the store's
    /// current state.
    ///
    /// `None` (collection still loading) renders as an empty table.
    pub fn derive<'a>(&self, store: &EntityStore<R>, collection: Option<&'a [R]>) -> TableState<'a, R> {
        let records = collection.unwrap_or_default();
        let filtered = filter_records(records, store.filters(), store.show_deleted());
        let sorted = sort_records(filtered, store.sort());
        let page = paginate(&sorted, store.pagination());

        let rows = page
            .items
            .iter()
            .map(|record| Row {
                record: *record,
                cells: self.columns.iter().map(|column| (column.cell)(record)).collect(),
                intents: RowIntent::available_for(*record),
                selected: store.is_row_selected(record.id()),
            })
            .collect();

        let headers = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                label: column.header,
                sort: column.sort,
                indicator: column.sort.and_then(|field| store.sort().indicator(field)),
            })
            .collect();

        TableState {
            headers,
            rows,
            page: page.info,
            matching_ids: sorted.iter().map(|record| record.id()).collect(),
            page_size_options: store.config().page_size_options.clone(),
            page_numbers: page.info.page_numbers(store.config().page_window),
        }
    }

    /// Derives the view and writes the resulting page count back to the
    /// store, so navigation actions see the current total.
    pub fn render<'a>(&self, store: &mut EntityStore<R>, collection: Option<&'a [R]>) -> TableState<'a, R> {
        let state = self.derive(store, collection);
        store.sync_page(&state.page);
        state
    }
}

// =============================================================================
// Cell formatters
// =============================================================================

/// Formats a date as `DD/MM/YYYY`; unparseable values are shown as sent,
/// absent ones as `-`.
pub fn date_cell(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => parse_timestamp(raw)
            .map(|timestamp| timestamp.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "-".to_string(),
    }
}

/// Optional text, `-` when absent or blank.
pub fn text_cell(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "-".to_string(),
    }
}

pub fn flag_cell(value: bool) -> String {
    let label = if value { "Sí" } else { "No" };
    label.to_string()
}

/// Funcionario name followed by the document number.
pub fn funcionario_cell(funcionario: Option<&FuncionarioRef>) -> String {
    match funcionario {
        Some(f) if f.numero_documento.is_empty() => f.nombre_completo.clone(),
        Some(f) => format!("{} ({})", f.nombre_completo, f.numero_documento),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sancion;
    use crate::model::SancionSort;
    use crate::model::test_support::sancion;

    fn collection() -> Vec<Sancion> {
        (1..=12)
            .map(|id| sancion(id, &format!("Funcionario {id:02}"), "multa", Some("2024-01-01"), None))
            .collect()
    }

    #[test]
    fn test_loading_collection_renders_empty() {
        let store = EntityStore::<Sancion>::default();
        let state = TableView::new().derive(&store, None);
        assert!(state.is_empty());
        assert!(state.rows.is_empty());
        assert_eq!(state.page.total_pages, 1);
        assert_eq!(state.summary(), "Mostrando 0 a 0 de 0");
    }

    #[test]
    fn test_rows_follow_columns() {
        let records = collection();
        let mut store = EntityStore::<Sancion>::default();
        store.set_items_per_page(5);

        let view = TableView::new();
        let state = view.render(&mut store, Some(records.as_slice()));

        assert_eq!(state.rows.len(), 5);
        assert_eq!(state.headers.len(), view.columns().len());
        for row in &state.rows {
            assert_eq!(row.cells.len(), view.columns().len());
        }
        assert_eq!(state.rows[0].cells[1], "Funcionario 01 (101)");
        assert_eq!(state.matching_ids.len(), 12);
        assert_eq!(state.summary(), "Mostrando 1 a 5 de 12");
    }

    #[test]
    fn test_header_indicator_follows_sort() {
        let records = collection();
        let mut store = EntityStore::<Sancion>::default();
        store.toggle_sort(SancionSort::Id);
        store.toggle_sort(SancionSort::Id);

        let state = TableView::new().derive(&store, Some(records.as_slice()));
        let id_header = state
            .headers
            .iter()
            .find(|h| h.sort == Some(SancionSort::Id))
            .unwrap();
        assert_eq!(id_header.indicator, Some(Direction::Desc));
        assert_eq!(state.rows[0].record.id, 12);
    }

    #[test]
    fn test_render_syncs_total_pages() {
        let records = collection();
        let mut store = EntityStore::<Sancion>::default();
        store.set_items_per_page(5);
        TableView::new().render(&mut store, Some(records.as_slice()));

        store.go_to_last_page();
        assert_eq!(store.pagination().current_page(), 3);
    }

    #[test]
    fn test_cells() {
        assert_eq!(date_cell(Some("2024-03-10T08:00:00Z")), "10/03/2024");
        assert_eq!(date_cell(Some("ayer")), "ayer");
        assert_eq!(date_cell(None), "-");
        assert_eq!(text_cell(Some("  ")), "-");
        assert_eq!(flag_cell(true), "Sí");
    }
}
