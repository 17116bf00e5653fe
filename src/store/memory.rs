//! Deterministic in-memory document store
//!
//! Backs the test suites and local development. Evaluation is strict in the
//! same way the executor of a real document store is: no type coercion,
//! missing field = no match, null never matches.
//!
//! Queries are totally ordered (requested sort field, then id) so repeated
//! runs over the same data return identical sequences, and cursors resume at
//! a well-defined position.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering as AtomicOrdering};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::filter::CompareOp;

use super::contract::{Cursor, Document, DocumentStore, OrderBy, Predicate, SortDirection};
use super::errors::{StoreError, StoreResult};
use super::ordering::compare_field_values;

type Collections = HashMap<String, BTreeMap<i64, Value>>;

/// In-memory document store with fault injection for tests
pub struct MemoryStore {
    collections: RwLock<Collections>,
    next_id: AtomicI64,
    fail_queries: AtomicBool,
    fail_counts: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            fail_queries: AtomicBool::new(false),
            fail_counts: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent `query` call fail with `Unavailable`
    pub fn set_fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, AtomicOrdering::SeqCst);
    }

    /// Makes every subsequent `count` call fail with `Unavailable`
    pub fn set_fail_counts(&self, fail: bool) {
        self.fail_counts.store(fail, AtomicOrdering::SeqCst);
    }

    fn read_collections(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
    }

    fn write_collections(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
    }

    /// Checks if a record matches all predicates (AND semantics)
    fn matches(body: &Value, predicates: &[Predicate]) -> bool {
        predicates.iter().all(|pred| Self::matches_predicate(body, pred))
    }

    fn matches_predicate(body: &Value, predicate: &Predicate) -> bool {
        let field_value = match body.get(&predicate.field) {
            Some(v) => v,
            None => return false, // Missing field = no match
        };

        // Null values never match
        if field_value.is_null() {
            return false;
        }

        match predicate.op {
            CompareOp::Eq => field_value == &predicate.value,
            CompareOp::Lt => {
                matches!(
                    Self::compare_scalars(field_value, &predicate.value),
                    Some(Ordering::Less)
                )
            }
            CompareOp::Lte => {
                matches!(
                    Self::compare_scalars(field_value, &predicate.value),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }
            CompareOp::Gt => {
                matches!(
                    Self::compare_scalars(field_value, &predicate.value),
                    Some(Ordering::Greater)
                )
            }
            CompareOp::Gte => {
                matches!(
                    Self::compare_scalars(field_value, &predicate.value),
                    Some(Ordering::Greater | Ordering::Equal)
                )
            }
            CompareOp::ArrayContains => match field_value {
                Value::Array(items) => items.iter().any(|item| item == &predicate.value),
                _ => false,
            },
        }
    }

    /// Ordered comparison for range predicates (numbers and strings only)
    fn compare_scalars(actual: &Value, bound: &Value) -> Option<Ordering> {
        match (actual, bound) {
            (Value::Number(a), Value::Number(b)) => {
                let (af, bf) = (a.as_f64()?, b.as_f64()?);
                af.partial_cmp(&bf)
            }
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Matching records in the requested order.
    ///
    /// Uses the reference value order with record id as the tie-break, so
    /// repeated queries over the same data return identical sequences.
    fn ordered_matches(
        collection: &BTreeMap<i64, Value>,
        predicates: &[Predicate],
        order_by: Option<&OrderBy>,
    ) -> Vec<(i64, Value)> {
        let mut matches: Vec<(i64, Value)> = collection
            .iter()
            .filter(|(_, body)| Self::matches(body, predicates))
            .map(|(id, body)| (*id, body.clone()))
            .collect();

        match order_by {
            Some(order) => {
                matches.sort_by(|(a_id, a_body), (b_id, b_body)| {
                    let ordering =
                        compare_field_values(a_body.get(&order.field), b_body.get(&order.field))
                            .then(a_id.cmp(b_id));
                    match order.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                });
            }
            None => matches.sort_by_key(|(id, _)| *id),
        }

        matches
    }

    fn to_document(id: i64, body: Value) -> Document {
        Document::new(id, body, Cursor::new(id.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: i64) -> StoreResult<Option<Document>> {
        let collections = self.read_collections()?;
        Ok(collections
            .get(collection)
            .and_then(|c| c.get(&id))
            .map(|body| Self::to_document(id, body.clone())))
    }

    async fn query(
        &self,
        collection: &str,
        predicates: &[Predicate],
        order_by: Option<&OrderBy>,
        limit: Option<usize>,
        after: Option<&Cursor>,
    ) -> StoreResult<Vec<Document>> {
        if self.fail_queries.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Unavailable("injected query failure".into()));
        }

        let collections = self.read_collections()?;
        let records = match collections.get(collection) {
            Some(c) => Self::ordered_matches(c, predicates, order_by),
            None => Vec::new(),
        };

        // Resume strictly after the cursor position under the same order
        let skip = match after.and_then(|c| c.as_str().parse::<i64>().ok()) {
            Some(after_id) => records
                .iter()
                .position(|(id, _)| *id == after_id)
                .map(|i| i + 1)
                .unwrap_or(0),
            None => 0,
        };

        let mut documents: Vec<Document> = records
            .into_iter()
            .skip(skip)
            .map(|(id, body)| Self::to_document(id, body))
            .collect();

        if let Some(limit) = limit {
            documents.truncate(limit);
        }

        Ok(documents)
    }

    async fn count(&self, collection: &str, predicates: &[Predicate]) -> StoreResult<u64> {
        if self.fail_counts.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Unavailable("injected count failure".into()));
        }

        let collections = self.read_collections()?;
        Ok(collections
            .get(collection)
            .map(|c| c.values().filter(|body| Self::matches(body, predicates)).count() as u64)
            .unwrap_or(0))
    }

    async fn create(&self, collection: &str, data: Value) -> StoreResult<Document> {
        let mut body = match data {
            Value::Object(map) => Value::Object(map),
            _ => return Err(StoreError::Rejected("record body must be an object".into())),
        };

        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        if let Some(obj) = body.as_object_mut() {
            obj.insert("id".into(), Value::from(id));
        }

        let mut collections = self.write_collections()?;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, body.clone());

        Ok(Self::to_document(id, body))
    }

    async fn update(&self, collection: &str, id: i64, patch: Value) -> StoreResult<Option<Document>> {
        let patch = match patch {
            Value::Object(map) => map,
            _ => return Err(StoreError::Rejected("patch must be an object".into())),
        };

        let mut collections = self.write_collections()?;
        let body = match collections.get_mut(collection).and_then(|c| c.get_mut(&id)) {
            Some(body) => body,
            None => return Ok(None),
        };

        if let Some(obj) = body.as_object_mut() {
            for (key, value) in patch {
                obj.insert(key, value);
            }
        }

        Ok(Some(Self::to_document(id, body.clone())))
    }

    async fn delete(&self, collection: &str, id: i64) -> StoreResult<bool> {
        let mut collections = self.write_collections()?;
        Ok(collections
            .get_mut(collection)
            .map(|c| c.remove(&id).is_some())
            .unwrap_or(false))
    }
}
