//! Paged query orchestration
//!
//! The [`Paginator`] turns a [`PageRequest`] into a [`PageResult`]:
//!
//! 1. Validate page bounds
//! 2. Fold the search term into the filter as a prefix range
//! 3. Lower the filter to a disjunctive plan
//! 4. Fetch the page (ordered, limited, cursor-advanced) and count the total
//!    in parallel; fan out one query per disjunct when the plan has several
//! 5. Reconcile both into the page envelope
//!
//! A failed count degrades pagination metadata to an approximation instead
//! of failing the page; the degraded mode is observable on the result.

mod errors;
mod merge;
mod paginator;
mod request;
mod result;

pub use errors::PageError;
pub use paginator::{Paginator, DEFAULT_MAX_PAGE_SIZE};
pub use request::PageRequest;
pub use result::PageResult;
