//! Page-number windows and bounds-checked page navigation

/// Number of page links shown around the current page
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Compute the page numbers to display around `current`
///
/// The result is a contiguous ascending run of length `min(max_visible, total)`
/// inside `[1, total]`, centred on `current` where the bounds allow.
pub fn page_window(current: usize, total: usize, max_visible: usize) -> Vec<usize> {
    if total <= max_visible {
        return (1..=total).collect();
    }

    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = total.min(start + max_visible - 1);

    // Near the last page the window would come up short, so pull it left
    if end + 1 < start + max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }

    (start..=end).collect()
}

/// Number of pages needed for `total_items` at `page_size` per page
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Paged listing state
///
/// `current_page` is 1-based and always within `[1, max(total_pages, 1)]`.
/// Navigation outside the valid range is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl Paginator {
    /// Create an empty listing; a zero page size is treated as one
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    /// Create a listing positioned on the first page of `total_items`
    pub fn with_total(page_size: usize, total_items: usize) -> Self {
        let mut paginator = Self::new(page_size);
        paginator.set_total_items(total_items);
        paginator
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Replace the item count, clamping the current page into range
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.current_page.clamp(1, self.total_pages().max(1));
    }

    /// Jump to `target`; returns whether the page changed
    pub fn go_to_page(&mut self, target: usize) -> bool {
        if target < 1 || target > self.total_pages() || target == self.current_page {
            return false;
        }

        self.current_page = target;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn previous(&mut self) -> bool {
        self.go_to_page(self.current_page - 1)
    }

    pub fn first(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn last(&mut self) -> bool {
        self.go_to_page(self.total_pages())
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        !self.is_first_page()
    }

    pub fn has_next(&self) -> bool {
        !self.is_last_page()
    }

    /// Page links around the current page
    pub fn window(&self) -> Vec<usize> {
        self.window_of(DEFAULT_MAX_VISIBLE)
    }

    pub fn window_of(&self, max_visible: usize) -> Vec<usize> {
        page_window(self.current_page, self.total_pages(), max_visible)
    }

    /// Zero-based offset of the first item on the current page
    pub fn offset(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }

    /// 1-based index of the first item shown, or 0 for an empty listing
    pub fn start_item_index(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// 1-based index of the last item shown
    pub fn end_item_index(&self) -> usize {
        (self.current_page * self.page_size).min(self.total_items)
    }

    /// The items of `items` that fall on the current page
    pub fn page_of<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}
