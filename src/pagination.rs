/// Number of items returned per page by list endpoints.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows skipped before the page starts; page `0` is treated as page `1`.
    ///
    /// Saturates instead of overflowing for absurd page numbers.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }
}
