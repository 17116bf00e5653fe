//! Page fetch orchestration
//!
//! Fetch and count are independent store operations and run concurrently;
//! so do the per-disjunct queries of a fan-out. Dropping the returned future
//! cancels every in-flight sub-operation together.

use std::sync::Arc;

use futures_util::future::{join_all, try_join_all};

use crate::filter::FilterExpr;
use crate::observability::{Event, Logger};
use crate::store::{Document, DocumentStore, OrderBy, Predicate};
use crate::translate::QueryTranslator;

use super::errors::PageError;
use super::merge::merge_disjuncts;
use super::request::PageRequest;
use super::result::PageResult;

/// Upper bound on `page_size` unless configured otherwise
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Runs paged fetches against a document store
pub struct Paginator<S> {
    store: Arc<S>,
    max_page_size: usize,
}

impl<S: DocumentStore> Paginator<S> {
    /// Creates a paginator over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Overrides the maximum page size
    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Fetches one page of records.
    ///
    /// Cursor advance only applies beyond page 1; the caller is responsible
    /// for handing back the cursor of the previous page.
    pub async fn get_page(
        &self,
        collection: &str,
        request: &PageRequest,
    ) -> Result<PageResult<Document>, PageError> {
        self.validate(request)?;

        let effective = Self::effective_filter(request);
        let plan = QueryTranslator::translate(&effective)?;

        // Zero disjuncts resolve to the empty set without a store round-trip
        if plan.is_empty_set() {
            return Ok(PageResult::empty(request.page, request.page_size));
        }

        let order = OrderBy {
            field: request.sort_field.clone(),
            direction: request.sort_direction,
        };

        match plan.single() {
            Some(predicates) => {
                self.fetch_single(collection, request, predicates, &order)
                    .await
            }
            None => {
                self.fetch_fan_out(collection, request, &plan.disjuncts, &order)
                    .await
            }
        }
    }

    fn validate(&self, request: &PageRequest) -> Result<(), PageError> {
        if request.page < 1 {
            return Err(PageError::InvalidRequest("page must be at least 1".into()));
        }
        if request.page_size < 1 {
            return Err(PageError::InvalidRequest(
                "page size must be at least 1".into(),
            ));
        }
        if request.page_size > self.max_page_size {
            return Err(PageError::InvalidRequest(format!(
                "page size {} exceeds maximum {}",
                request.page_size, self.max_page_size
            )));
        }
        Ok(())
    }

    /// Folds the search term into the filter as a prefix range.
    ///
    /// Searching an entity with no designated search field is a no-op, not
    /// an error: some entities have nothing searchable.
    fn effective_filter(request: &PageRequest) -> FilterExpr {
        match (request.search.as_deref(), request.search_field.as_deref()) {
            (Some(search), Some(field)) if !search.is_empty() => FilterExpr::and([
                request.filters.clone(),
                QueryTranslator::prefix_filter(field, search),
            ]),
            _ => request.filters.clone(),
        }
    }

    async fn fetch_single(
        &self,
        collection: &str,
        request: &PageRequest,
        predicates: &[Predicate],
        order: &OrderBy,
    ) -> Result<PageResult<Document>, PageError> {
        let after = if request.page > 1 {
            request.cursor.as_ref()
        } else {
            None
        };

        let fetch = self.store.query(
            collection,
            predicates,
            Some(order),
            Some(request.page_size),
            after,
        );
        let count = self.store.count(collection, predicates);
        let (fetched, counted) = tokio::join!(fetch, count);

        let items = fetched?;
        let (total_count, count_degraded) = match counted {
            Ok(total) => (total, false),
            Err(err) => {
                Logger::log(
                    Event::CountDegraded,
                    &[
                        ("collection", collection.to_string()),
                        ("error", err.to_string()),
                    ],
                );
                (items.len() as u64, true)
            }
        };

        let next_cursor = items.last().map(|doc| doc.position.clone());
        Ok(PageResult::assemble(
            items,
            request.page,
            request.page_size,
            total_count,
            count_degraded,
            next_cursor,
        ))
    }

    /// One store query per disjunct, merged client-side.
    ///
    /// Store cursors cannot span merged streams, so each disjunct is fetched
    /// from the start up to the requested window and the page is sliced out
    /// of the union; no cursor is returned. The summed count is an upper
    /// bound when disjuncts overlap.
    async fn fetch_fan_out(
        &self,
        collection: &str,
        request: &PageRequest,
        disjuncts: &[Vec<Predicate>],
        order: &OrderBy,
    ) -> Result<PageResult<Document>, PageError> {
        let window_end = request.page as usize * request.page_size;

        let queries = disjuncts.iter().map(|predicates| {
            self.store
                .query(collection, predicates, Some(order), Some(window_end), None)
        });
        let counts = disjuncts
            .iter()
            .map(|predicates| self.store.count(collection, predicates));

        let (batches, counted) = tokio::join!(try_join_all(queries), join_all(counts));
        let batches = batches?;

        let merged = merge_disjuncts(batches, order);
        Logger::log(
            Event::FanOutMerged,
            &[
                ("collection", collection.to_string()),
                ("disjuncts", disjuncts.len().to_string()),
                ("merged", merged.len().to_string()),
            ],
        );

        let items: Vec<Document> = merged
            .into_iter()
            .skip((request.page as usize - 1) * request.page_size)
            .take(request.page_size)
            .collect();

        let mut count_degraded = false;
        let mut total_count: u64 = 0;
        for result in counted {
            match result {
                Ok(count) => total_count += count,
                Err(err) => {
                    Logger::log(
                        Event::CountDegraded,
                        &[
                            ("collection", collection.to_string()),
                            ("error", err.to_string()),
                        ],
                    );
                    count_degraded = true;
                }
            }
        }
        if count_degraded {
            total_count = items.len() as u64;
        }

        Ok(PageResult::assemble(
            items,
            request.page,
            request.page_size,
            total_count,
            count_degraded,
            None,
        ))
    }
}
