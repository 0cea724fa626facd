//! Per-entity list view state
//!
//! [`EntityStore`] is the single source of truth of one list view. Every
//! write goes through a named action (or [`EntityStore::dispatch`]), which is
//! where the cross-axis rules live: any filter change returns to page 1 and
//! drops the bulk selection.

use std::collections::BTreeSet;
use std::collections::HashSet;

use super::Bound;
use super::FilterState;
use super::PageInfo;
use super::PaginationState;
use super::SortState;
use super::TableConfig;
use super::TableRecord;
use crate::api::Mutation;
use crate::model::Record;

/// Modal dialogs a list view can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialog {
    Create,
    Edit,
    Delete,
    Restore,
    View,
}

/// What a user asked for on one table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIntent {
    View,
    Edit,
    Delete,
    Restore,
    ToggleActive,
}

impl RowIntent {
    /// Row actions offered for `record`.
    ///
    /// Trashed records can only be viewed or restored.
    pub fn available_for<R: Record>(record: &R) -> Vec<RowIntent> {
        if record.is_deleted() {
            return vec![Self::View, Self::Restore];
        }
        let mut intents = vec![Self::View, Self::Edit, Self::Delete];
        if R::ACTIVE_FIELD.is_some() {
            intents.push(Self::ToggleActive);
        }
        intents
    }
}

/// Actions applied to every selected row at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Activate,
    Deactivate,
    Delete,
    Restore,
}

/// Every state transition of an [`EntityStore`], for reducer-style callers.
#[derive(Debug, Clone)]
pub enum StoreAction<R: TableRecord> {
    OpenDialog(Dialog, Option<R>),
    CloseDialog(Dialog),
    SetSearch(String),
    SetEnumFilter(R::EnumFilter, String),
    SetDateBound(R::DateFilter, Bound, Option<String>),
    SetShowDeleted(bool),
    ClearFilters,
    ToggleSort(R::SortField),
    ClearSort,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    SetPage(i64),
    SetItemsPerPage(usize),
    ToggleRowSelection(i64),
    SelectAll(Vec<i64>),
    ClearSelection,
}

/// UI state of one entity's list view.
#[derive(Debug, Clone)]
pub struct EntityStore<R: TableRecord> {
    config: TableConfig,
    dialogs: HashSet<Dialog>,
    selected: Option<R>,
    filters: FilterState<R>,
    show_deleted: bool,
    sort: SortState<R::SortField>,
    pagination: PaginationState,
    /// Matching records in the last derived view, 0 until one is synced.
    total_items: usize,
    selection: BTreeSet<i64>,
}

impl<R: TableRecord> Default for EntityStore<R> {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

impl<R: TableRecord> EntityStore<R> {
    /// Creates a store with no filters, no sort and page 1.
    pub fn new(config: TableConfig) -> Self {
        Self {
            pagination: PaginationState::new(config.items_per_page),
            config,
            dialogs: HashSet::new(),
            selected: None,
            filters: FilterState::new(),
            show_deleted: false,
            sort: SortState::default(),
            total_items: 0,
            selection: BTreeSet::new(),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn filters(&self) -> &FilterState<R> {
        &self.filters
    }

    pub fn show_deleted(&self) -> bool {
        self.show_deleted
    }

    pub fn sort(&self) -> &SortState<R::SortField> {
        &self.sort
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Page count for the last synced result size at the current page size.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.total_items)
    }

    /// The record the open dialog targets.
    pub fn selected(&self) -> Option<&R> {
        self.selected.as_ref()
    }

    pub fn is_dialog_open(&self, dialog: Dialog) -> bool {
        self.dialogs.contains(&dialog)
    }

    /// Ids ticked for bulk actions, ascending.
    pub fn selected_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.selection.iter().copied()
    }

    pub fn is_row_selected(&self, id: i64) -> bool {
        self.selection.contains(&id)
    }

    // =========================================================================
    // Dialogs
    // =========================================================================

    /// Opens `dialog`, targeting `record` if one is given.
    pub fn open_dialog(&mut self, dialog: Dialog, record: Option<R>) {
        self.dialogs.insert(dialog);
        if record.is_some() {
            self.selected = record;
        }
    }

    /// Closes `dialog` and forgets the targeted record.
    pub fn close_dialog(&mut self, dialog: Dialog) {
        self.dialogs.remove(&dialog);
        self.selected = None;
    }

    /// Closes a confirmation dialog and returns the mutation it confirmed.
    ///
    /// Only [`Dialog::Delete`] and [`Dialog::Restore`] confirm a mutation;
    /// the other dialogs submit forms through the client directly.
    pub fn confirm_dialog(&mut self, dialog: Dialog) -> Option<Mutation> {
        let id = self.selected.as_ref().map(Record::id);
        self.close_dialog(dialog);
        match (dialog, id) {
            (Dialog::Delete, Some(id)) => Some(Mutation::delete::<R>(id)),
            (Dialog::Restore, Some(id)) => Some(Mutation::restore::<R>(id)),
            _ => None,
        }
    }

    /// Routes a row intent: dialogs open here, a flag toggle is returned as
    /// a mutation for the data layer.
    pub fn handle_intent(&mut self, intent: RowIntent, record: &R) -> Option<Mutation> {
        match intent {
            RowIntent::View => self.open_dialog(Dialog::View, Some(record.clone())),
            RowIntent::Edit => self.open_dialog(Dialog::Edit, Some(record.clone())),
            RowIntent::Delete => self.open_dialog(Dialog::Delete, Some(record.clone())),
            RowIntent::Restore => self.open_dialog(Dialog::Restore, Some(record.clone())),
            RowIntent::ToggleActive => {
                let current = record.is_active()?;
                return Mutation::set_active::<R>(record.id(), !current);
            }
        }
        None
    }

    // =========================================================================
    // Filters
    // =========================================================================

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filters.set_search(term);
        self.on_filter_changed();
    }

    pub fn set_enum_filter(&mut self, key: R::EnumFilter, value: impl Into<String>) {
        self.filters.set_enum(key, value);
        self.on_filter_changed();
    }

    pub fn set_date_from(&mut self, key: R::DateFilter, value: Option<String>) {
        self.filters.set_date_bound(key, Bound::From, value);
        self.on_filter_changed();
    }

    pub fn set_date_to(&mut self, key: R::DateFilter, value: Option<String>) {
        self.filters.set_date_bound(key, Bound::To, value);
        self.on_filter_changed();
    }

    /// Switches between the live records and the trash.
    pub fn set_show_deleted(&mut self, show_deleted: bool) {
        self.show_deleted = show_deleted;
        self.on_filter_changed();
    }

    pub fn toggle_show_deleted(&mut self) {
        self.set_show_deleted(!self.show_deleted);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.on_filter_changed();
    }

    // Back to page 1; ticks on rows the new filters may hide are dropped.
    fn on_filter_changed(&mut self) {
        self.pagination.go_to_first_page();
        self.total_items = 0;
        self.selection.clear();
    }

    // =========================================================================
    // Sort
    // =========================================================================

    pub fn toggle_sort(&mut self, field: R::SortField) {
        self.sort.toggle(field);
    }

    pub fn clear_sort(&mut self) {
        self.sort.clear();
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Records the result size of the last derived view and clamps the
    /// current page into it.
    pub fn sync_page(&mut self, info: &PageInfo) {
        self.total_items = info.total_items;
        self.pagination.clamp(self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.pagination.next_page(self.total_pages());
    }

    pub fn prev_page(&mut self) {
        self.pagination.prev_page();
    }

    pub fn go_to_first_page(&mut self) {
        self.pagination.go_to_first_page();
    }

    pub fn go_to_last_page(&mut self) {
        self.pagination.go_to_last_page(self.total_pages());
    }

    pub fn set_current_page(&mut self, page: i64) {
        self.pagination.set_current_page(page, self.total_pages());
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.pagination.set_items_per_page(items_per_page);
    }

    // =========================================================================
    // Bulk selection
    // =========================================================================

    pub fn toggle_row_selection(&mut self, id: i64) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// Ticks exactly `ids` (typically every row matching the filters).
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = i64>) {
        self.selection = ids.into_iter().collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Expands a bulk action into one mutation per ticked row and clears the
    /// selection.
    ///
    /// Activation on an entity without an active flag yields nothing.
    pub fn bulk(&mut self, action: BulkAction) -> Vec<Mutation> {
        let ids = std::mem::take(&mut self.selection);
        ids.into_iter()
            .filter_map(|id| match action {
                BulkAction::Activate => Mutation::set_active::<R>(id, true),
                BulkAction::Deactivate => Mutation::set_active::<R>(id, false),
                BulkAction::Delete => Some(Mutation::delete::<R>(id)),
                BulkAction::Restore => Some(Mutation::restore::<R>(id)),
            })
            .collect()
    }

    // =========================================================================
    // Reducer
    // =========================================================================

    /// Applies one action.
    pub fn dispatch(&mut self, action: StoreAction<R>) {
        match action {
            StoreAction::OpenDialog(dialog, record) => self.open_dialog(dialog, record),
            StoreAction::CloseDialog(dialog) => self.close_dialog(dialog),
            StoreAction::SetSearch(term) => self.set_search(term),
            StoreAction::SetEnumFilter(key, value) => self.set_enum_filter(key, value),
            StoreAction::SetDateBound(key, Bound::From, value) => self.set_date_from(key, value),
            StoreAction::SetDateBound(key, Bound::To, value) => self.set_date_to(key, value),
            StoreAction::SetShowDeleted(show_deleted) => self.set_show_deleted(show_deleted),
            StoreAction::ClearFilters => self.clear_filters(),
            StoreAction::ToggleSort(field) => self.toggle_sort(field),
            StoreAction::ClearSort => self.clear_sort(),
            StoreAction::NextPage => self.next_page(),
            StoreAction::PrevPage => self.prev_page(),
            StoreAction::FirstPage => self.go_to_first_page(),
            StoreAction::LastPage => self.go_to_last_page(),
            StoreAction::SetPage(page) => self.set_current_page(page),
            StoreAction::SetItemsPerPage(size) => self.set_items_per_page(size),
            StoreAction::ToggleRowSelection(id) => self.toggle_row_selection(id),
            StoreAction::SelectAll(ids) => self.select_all(ids),
            StoreAction::ClearSelection => self.clear_selection(),
        }
    }
}
