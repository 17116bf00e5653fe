//! Document store contract
//!
//! The engine consumes an external document store through the
//! [`DocumentStore`] trait: equality/range/membership predicates, a single
//! ordering field, limit, cursor advance and a count aggregation. Nothing in
//! this crate assumes more than those primitives.
//!
//! [`MemoryStore`] is the deterministic in-process implementation used by the
//! test suites and local development.

mod contract;
mod errors;
mod memory;
mod ordering;

pub use contract::{Cursor, Document, DocumentStore, OrderBy, Predicate, SortDirection};
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use ordering::compare_field_values;
