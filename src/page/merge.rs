//! Client-side union of disjunct fan-out results
//!
//! The store has no native disjunction across fields, so an `Or` runs as one
//! query per disjunct. The merge is deterministic: deduplicate by record id
//! (a record appearing in several disjuncts counts once), then sort the
//! union by the requested field and direction with record id as tie-break.

use std::collections::HashSet;

use crate::store::{compare_field_values, Document, OrderBy, SortDirection};

/// Merges per-disjunct result batches into one ordered, deduplicated set
pub(crate) fn merge_disjuncts(batches: Vec<Vec<Document>>, order: &OrderBy) -> Vec<Document> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Document> = batches
        .into_iter()
        .flatten()
        .filter(|doc| seen.insert(doc.id))
        .collect();

    merged.sort_by(|a, b| {
        let ordering = compare_field_values(a.field(&order.field), b.field(&order.field))
            .then(a.id.cmp(&b.id));
        match order.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    merged
}
