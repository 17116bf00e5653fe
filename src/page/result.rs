//! Page envelope
//!
//! Metadata invariants: `total_pages = ceil(total_count / page_size)`,
//! `total_pages = 0` iff `total_count = 0`, `has_next = page < total_pages`,
//! `has_previous = page > 1`.

use crate::store::Cursor;

/// One page of records plus pagination metadata
#[derive(Debug, Clone)]
pub struct PageResult<T> {
    /// Records in result order
    pub items: Vec<T>,
    /// 1-based page number of this page
    pub page: u32,
    /// Requested page size (items may be fewer on the last page)
    pub page_size: usize,
    /// Total records matching the filter across all pages
    pub total_count: u64,
    /// Total pages at this page size
    pub total_pages: u32,
    /// Whether a later page exists
    pub has_next: bool,
    /// Whether an earlier page exists
    pub has_previous: bool,
    /// Position to resume after for the next page, when the store order
    /// supports it
    pub next_cursor: Option<Cursor>,
    /// True when the count query failed and `total_count` is estimated from
    /// the fetched items
    pub count_degraded: bool,
}

impl<T> PageResult<T> {
    /// Assembles the envelope, deriving the metadata from the invariants
    pub fn assemble(
        items: Vec<T>,
        page: u32,
        page_size: usize,
        total_count: u64,
        count_degraded: bool,
        next_cursor: Option<Cursor>,
    ) -> Self {
        let total_pages = if total_count == 0 {
            0
        } else {
            ((total_count + page_size as u64 - 1) / page_size as u64) as u32
        };

        Self {
            items,
            page,
            page_size,
            total_count,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
            next_cursor,
            count_degraded,
        }
    }

    /// The empty page: nothing matched, no store round-trip implied
    pub fn empty(page: u32, page_size: usize) -> Self {
        Self::assemble(Vec::new(), page, page_size, 0, false, None)
    }

    /// Converts the items while keeping the metadata intact
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
            next_cursor: self.next_cursor,
            count_degraded: self.count_degraded,
        }
    }

    /// Fallible item conversion; the first error aborts the page
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<PageResult<U>, E> {
        let items = self
            .items
            .into_iter()
            .map(f)
            .collect::<Result<Vec<_>, E>>()?;

        Ok(PageResult {
            items,
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
            next_cursor: self.next_cursor,
            count_degraded: self.count_degraded,
        })
    }
}
