//! Store contract types and trait
//!
//! [`Predicate`] is the primitive predicate shape the store evaluates
//! server-side. A query is always a conjunction of predicates; disjunction is
//! a client-side concern layered above this contract.

use async_trait::async_trait;
use serde_json::Value;

use crate::filter::CompareOp;

use super::errors::StoreResult;

/// A primitive predicate the store can evaluate server-side
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field name
    pub field: String,
    /// Comparison operator
    pub op: CompareOp,
    /// Comparison value
    pub value: Value,
}

impl Predicate {
    /// Creates a new predicate
    pub fn new(field: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Create an equality predicate
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, CompareOp::Eq, value)
    }

    /// Create a range predicate (gte)
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, CompareOp::Gte, value)
    }

    /// Create a range predicate (lte)
    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, CompareOp::Lte, value)
    }

    /// Create a range predicate (gt)
    pub fn gt(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, CompareOp::Gt, value)
    }

    /// Create a range predicate (lt)
    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, CompareOp::Lt, value)
    }

    /// Returns true if this is a range predicate
    pub fn is_range(&self) -> bool {
        self.op.is_range()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Single-field ordering specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Opaque store-native position token for cursor-based paging
///
/// The engine never inspects the token; it only hands it back to the store
/// that minted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    /// Wraps a store-native token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored record together with its store-native position
#[derive(Debug, Clone)]
pub struct Document {
    /// Record id, assigned by the store at creation
    pub id: i64,
    /// Record body
    pub body: Value,
    /// Position token a query may resume after
    pub position: Cursor,
}

impl Document {
    /// Creates a new document
    pub fn new(id: i64, body: Value, position: Cursor) -> Self {
        Self { id, body, position }
    }

    /// Returns a field of the body, if present
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }
}

/// The primitive operations a document store must expose
///
/// All operations are I/O-bound; implementations must be safe to call from
/// concurrent tasks. Timeouts and retries are the implementation's concern.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a record by id
    async fn get(&self, collection: &str, id: i64) -> StoreResult<Option<Document>>;

    /// Run a conjunctive query: all predicates must hold
    ///
    /// Results are ordered by `order_by` (store-default order when absent),
    /// truncated at `limit`, and resume strictly after `after` when given.
    async fn query(
        &self,
        collection: &str,
        predicates: &[Predicate],
        order_by: Option<&OrderBy>,
        limit: Option<usize>,
        after: Option<&Cursor>,
    ) -> StoreResult<Vec<Document>>;

    /// Count records matching a conjunctive predicate set
    async fn count(&self, collection: &str, predicates: &[Predicate]) -> StoreResult<u64>;

    /// Create a record; the store assigns the id
    async fn create(&self, collection: &str, data: Value) -> StoreResult<Document>;

    /// Apply a partial patch to a record, last write wins
    ///
    /// Returns the updated record, or `None` if the id does not exist.
    async fn update(&self, collection: &str, id: i64, patch: Value) -> StoreResult<Option<Document>>;

    /// Hard-delete a record; returns whether it existed
    async fn delete(&self, collection: &str, id: i64) -> StoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predicate_builders() {
        let eq = Predicate::eq("role", json!("admin"));
        assert_eq!(eq.op, CompareOp::Eq);
        assert!(!eq.is_range());

        let gte = Predicate::gte("name", json!("Al"));
        assert!(gte.is_range());
    }

    #[test]
    fn test_order_by() {
        let asc = OrderBy::asc("joined-date");
        assert_eq!(asc.direction, SortDirection::Asc);
        assert_eq!(SortDirection::Desc.as_str(), "desc");
    }

    #[test]
    fn test_cursor_is_opaque_token() {
        let cursor = Cursor::new("pos:42");
        assert_eq!(cursor.as_str(), "pos:42");
        assert_eq!(cursor, Cursor::new("pos:42"));
    }
}
