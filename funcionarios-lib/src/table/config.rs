//! List view configuration

/// Defaults applied when a list view's store is created.
///
/// # Example
///
/// ```
/// use funcionarios_lib::table::TableConfig;
///
/// let config = TableConfig::default()
///     .with_items_per_page(25)
///     .with_page_window(7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Initial page size.
    ///
    /// Default: 10
    pub items_per_page: usize,

    /// Page sizes offered in the page-size selector.
    ///
    /// Default: 5, 10, 25, 50
    pub page_size_options: Vec<usize>,

    /// Maximum number of page buttons in the pager strip.
    ///
    /// Default: 5
    pub page_window: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            items_per_page: 10,
            page_size_options: vec![5, 10, 25, 50],
            page_window: 5,
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial page size.
    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page.max(1);
        self
    }

    /// Sets the page sizes offered to the user.
    pub fn with_page_size_options(mut self, options: impl IntoIterator<Item = usize>) -> Self {
        self.page_size_options = options.into_iter().filter(|size| *size > 0).collect();
        self
    }

    /// Sets the pager strip width.
    pub fn with_page_window(mut self, window: usize) -> Self {
        self.page_window = window.max(1);
        self
    }
}
