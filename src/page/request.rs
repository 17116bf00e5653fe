//! Page request structure

use crate::filter::FilterExpr;
use crate::store::{Cursor, SortDirection};

/// A request for one page of records
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Records per page
    pub page_size: usize,
    /// Prefix search term (ignored when no search field is designated)
    pub search: Option<String>,
    /// Designated search field for the entity being listed
    pub search_field: Option<String>,
    /// Field to sort by
    pub sort_field: String,
    /// Sort direction
    pub sort_direction: SortDirection,
    /// Filter scope for the listing
    pub filters: FilterExpr,
    /// Position of the previous page's last record; the caller owns
    /// continuity between successive requests
    pub cursor: Option<Cursor>,
}

impl PageRequest {
    /// Creates a request with the listing defaults: newest first by id,
    /// no search, unrestricted filter.
    pub fn new(page: u32, page_size: usize) -> Self {
        Self {
            page,
            page_size,
            search: None,
            search_field: None,
            sort_field: "id".into(),
            sort_direction: SortDirection::Desc,
            filters: FilterExpr::always(),
            cursor: None,
        }
    }

    /// Sets the search term
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the designated search field
    pub fn with_search_field(mut self, field: impl Into<String>) -> Self {
        self.search_field = Some(field.into());
        self
    }

    /// Sets the sort field and direction
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = field.into();
        self.sort_direction = direction;
        self
    }

    /// Sets the filter scope
    pub fn with_filters(mut self, filters: FilterExpr) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the cursor to resume after
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }
}
