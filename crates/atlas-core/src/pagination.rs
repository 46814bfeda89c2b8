//! Offset-window pagination for tag listings.

/// Number of assets per page when `ATLAS_PAGE_SIZE` is not set.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Half-open index range `[start, end)` into an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u64,
    pub end: u64,
}

impl PageWindow {
    /// Window for a 1-indexed `page`. Pages below 1 are treated as page 1.
    #[must_use]
    pub fn for_page(page: u32, page_size: u32) -> Self {
        let index = u64::from(page.max(1) - 1);
        let size = u64::from(page_size);
        let start = index.saturating_mul(size);
        Self {
            start,
            end: start.saturating_add(size),
        }
    }
}
