//! Paginator

/// Page position of a list view.
///
/// `current_page` is 1-based. Navigation never fails: requests outside
/// `[1, total_pages]` clamp silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: usize,
    items_per_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PaginationState {
    /// Starts on page 1. A zero page size is treated as 1.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Advances one page unless already on the last one.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.current_page < total_pages {
            self.current_page += 1;
        }
    }

    /// Goes back one page unless already on the first one.
    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    pub fn go_to_first_page(&mut self) {
        self.current_page = 1;
    }

    pub fn go_to_last_page(&mut self, total_pages: usize) {
        self.current_page = total_pages.max(1);
    }

    /// Jumps to page `page`, clamped into `[1, max(1, total_pages)]`.
    pub fn set_current_page(&mut self, page: i64, total_pages: usize) {
        let last = total_pages.max(1) as i64;
        self.current_page = page.clamp(1, last) as usize;
    }

    /// Changes the page size and returns to page 1.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    /// Pulls the current page back into range after the result set shrank.
    pub fn clamp(&mut self, total_pages: usize) {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }

    /// Number of pages needed for `total_items`, never less than 1.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.items_per_page).max(1)
    }
}

/// Navigation metadata of one rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// The page actually shown, after clamping.
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    /// At least 1, even for an empty result set.
    pub total_pages: usize,
    /// 1-based index of the first item shown, 0 when the page is empty.
    pub start_index: usize,
    /// 1-based index of the last item shown, never above `total_items`.
    pub end_index: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageInfo {
    /// Page numbers for a pager strip of at most `window` buttons, centred on
    /// the current page where possible.
    pub fn page_numbers(&self, window: usize) -> Vec<usize> {
        let window = window.max(1).min(self.total_pages);
        let half = window / 2;
        let start = self
            .current_page
            .saturating_sub(half)
            .max(1)
            .min(self.total_pages + 1 - window);
        (start..start + window).collect()
    }
}

/// One page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub info: PageInfo,
}

/// Slices `items` into the page selected by `state`.
///
/// The state's page is clamped for slicing but not written back; see
/// [`PaginationState::clamp`].
pub fn paginate<'a, T>(items: &'a [T], state: &PaginationState) -> Page<'a, T> {
    let total_items = items.len();
    let items_per_page = state.items_per_page();
    let total_pages = state.total_pages(total_items);
    let current_page = state.current_page().clamp(1, total_pages);

    let offset = (current_page - 1) * items_per_page;
    let end = (offset + items_per_page).min(total_items);
    let slice = &items[offset.min(total_items)..end];

    let (start_index, end_index) = if slice.is_empty() {
        (0, 0)
    } else {
        (offset + 1, end)
    };

    Page {
        items: slice,
        info: PageInfo {
            current_page,
            items_per_page,
            total_items,
            total_pages,
            start_index,
            end_index,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_page_one_of_one() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, &PaginationState::new(10));
        assert!(page.items.is_empty());
        assert_eq!(page.info.total_pages, 1);
        assert_eq!(page.info.current_page, 1);
        assert_eq!((page.info.start_index, page.info.end_index), (0, 0));
        assert!(!page.info.has_next_page);
        assert!(!page.info.has_prev_page);
    }

    #[test]
    fn test_showing_11_to_20_of_45() {
        let items: Vec<u32> = (1..=45).collect();
        let mut state = PaginationState::new(10);
        state.set_current_page(2, state.total_pages(items.len()));

        let page = paginate(&items, &state);
        assert_eq!(page.items, &items[10..20]);
        assert_eq!((page.info.start_index, page.info.end_index), (11, 20));
        assert_eq!(page.info.total_pages, 5);
        assert!(page.info.has_next_page && page.info.has_prev_page);
    }

    #[test]
    fn test_last_page_end_index_clamped() {
        let items: Vec<u32> = (1..=45).collect();
        let mut state = PaginationState::new(10);
        state.go_to_last_page(5);

        let page = paginate(&items, &state);
        assert_eq!(page.items.len(), 5);
        assert_eq!((page.info.start_index, page.info.end_index), (41, 45));
        assert!(!page.info.has_next_page);
    }

    #[test]
    fn test_set_current_page_clamps() {
        let mut state = PaginationState::new(5);
        for (requested, expected) in [(-3, 1), (0, 1), (2, 2), (4, 4), (99, 4)] {
            state.set_current_page(requested, 4);
            assert_eq!(state.current_page(), expected, "requested {requested}");
        }
        state.set_current_page(7, 0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_navigation_is_noop_at_edges() {
        let mut state = PaginationState::new(5);
        state.prev_page();
        assert_eq!(state.current_page(), 1);

        state.next_page(2);
        state.next_page(2);
        assert_eq!(state.current_page(), 2);

        state.go_to_first_page();
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_items_per_page_resets_page() {
        let mut state = PaginationState::new(5);
        state.set_current_page(3, 10);
        state.set_items_per_page(25);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.items_per_page(), 25);

        state.set_items_per_page(0);
        assert_eq!(state.items_per_page(), 1);
    }

    #[test]
    fn test_stale_page_is_clamped_when_slicing() {
        let items: Vec<u32> = (1..=7).collect();
        let mut state = PaginationState::new(5);
        state.set_current_page(9, 9);

        let page = paginate(&items, &state);
        assert_eq!(page.info.current_page, 2);
        assert_eq!(page.items, &[6, 7]);

        state.clamp(page.info.total_pages);
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_pages_cover_everything_once() {
        let items: Vec<u32> = (1..=23).collect();
        let mut state = PaginationState::new(4);
        let total_pages = state.total_pages(items.len());

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            state.set_current_page(page as i64, total_pages);
            seen.extend_from_slice(paginate(&items, &state).items);
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn test_page_numbers_window() {
        let items: Vec<u32> = (1..=100).collect();
        let mut state = PaginationState::new(10);

        let info = paginate(&items, &state).info;
        assert_eq!(info.page_numbers(5), vec![1, 2, 3, 4, 5]);

        state.set_current_page(6, 10);
        assert_eq!(paginate(&items, &state).info.page_numbers(5), vec![4, 5, 6, 7, 8]);

        state.go_to_last_page(10);
        assert_eq!(paginate(&items, &state).info.page_numbers(5), vec![6, 7, 8, 9, 10]);

        let few: Vec<u32> = (1..=3).collect();
        assert_eq!(paginate(&few, &state).info.page_numbers(5), vec![1]);
    }
}
