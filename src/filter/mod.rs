//! Boolean filter expressions for scoping queries
//!
//! A [`FilterExpr`] is an immutable expression tree over field predicates.
//! It is the leaf layer of the query engine: pure data, no store access,
//! walked by the translator to produce store-native predicates.
//!
//! # Identity elements
//!
//! - `and()` with zero children is the universal-true expression
//! - `or()` with zero children is the universal-false expression

mod expr;

pub use expr::{CompareOp, Condition, FilterExpr};
