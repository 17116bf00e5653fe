//! Expression lowering
//!
//! Produces a deterministic disjunctive plan: same expression, same plan.
//! Disjunct order follows the order of the children in the source
//! expression.

use crate::filter::{CompareOp, Condition, FilterExpr};
use crate::store::Predicate;

use super::errors::{TranslateResult, UnsupportedExpression};

/// A lowered query: one conjunction of primitive predicates per disjunct
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// Disjuncts, each a conjunction executed as a single store query
    pub disjuncts: Vec<Vec<Predicate>>,
}

impl QueryPlan {
    /// True if the plan resolves to the empty set without a store call
    pub fn is_empty_set(&self) -> bool {
        self.disjuncts.is_empty()
    }

    /// The single conjunction, when no fan-out is needed
    pub fn single(&self) -> Option<&[Predicate]> {
        match self.disjuncts.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Lowers filter expressions to store-native predicates
pub struct QueryTranslator;

impl QueryTranslator {
    /// Translates an expression into a disjunctive plan.
    ///
    /// Every disjunct is validated against the store limitation that at most
    /// one field may carry range predicates in a single query.
    pub fn translate(expr: &FilterExpr) -> TranslateResult<QueryPlan> {
        let disjuncts = Self::lower(expr)?;
        for disjunct in &disjuncts {
            Self::check_single_range_field(disjunct)?;
        }
        Ok(QueryPlan { disjuncts })
    }

    /// Inclusive bounds matching every string with the given prefix.
    ///
    /// The upper bound appends the maximum code point, so all strings with
    /// prefix `s` sort at or below it.
    pub fn prefix_range(field: &str, prefix: &str) -> [Predicate; 2] {
        let upper = format!("{}{}", prefix, char::MAX);
        [
            Predicate::gte(field, prefix.into()),
            Predicate::lte(field, upper.into()),
        ]
    }

    /// Prefix match as a composable filter expression
    pub fn prefix_filter(field: &str, prefix: &str) -> FilterExpr {
        let [lower, upper] = Self::prefix_range(field, prefix);
        FilterExpr::and([
            FilterExpr::condition(lower.field, lower.op, lower.value),
            FilterExpr::condition(upper.field, upper.op, upper.value),
        ])
    }

    fn lower(expr: &FilterExpr) -> TranslateResult<Vec<Vec<Predicate>>> {
        match expr {
            FilterExpr::Condition(condition) => {
                Ok(vec![vec![Self::lower_condition(condition)?]])
            }

            // Conjunction distributes over child disjunctions (cross product)
            FilterExpr::And(children) => {
                let mut acc: Vec<Vec<Predicate>> = vec![Vec::new()];
                for child in children {
                    let lowered = Self::lower(child)?;
                    let mut next = Vec::with_capacity(acc.len() * lowered.len());
                    for left in &acc {
                        for right in &lowered {
                            let mut merged = left.clone();
                            merged.extend(right.iter().cloned());
                            next.push(merged);
                        }
                    }
                    acc = next;
                }
                Ok(acc)
            }

            FilterExpr::Or(children) => {
                let mut acc = Vec::new();
                for child in children {
                    acc.extend(Self::lower(child)?);
                }
                Ok(acc)
            }

            // The store has no native negation; a negated equality becomes
            // the union of the two open ranges around the value.
            FilterExpr::Not(child) => match child.as_ref() {
                FilterExpr::Condition(condition) if condition.op.is_equality() => {
                    if condition.field.is_empty() {
                        return Err(UnsupportedExpression::EmptyField);
                    }
                    Ok(vec![
                        vec![Predicate::lt(&condition.field, condition.value.clone())],
                        vec![Predicate::gt(&condition.field, condition.value.clone())],
                    ])
                }
                _ => Err(UnsupportedExpression::Negation),
            },
        }
    }

    fn lower_condition(condition: &Condition) -> TranslateResult<Predicate> {
        if condition.field.is_empty() {
            return Err(UnsupportedExpression::EmptyField);
        }
        Ok(Predicate::new(
            &condition.field,
            condition.op,
            condition.value.clone(),
        ))
    }

    fn check_single_range_field(disjunct: &[Predicate]) -> TranslateResult<()> {
        let mut ranged: Option<&str> = None;
        for predicate in disjunct.iter().filter(|p| p.is_range()) {
            match ranged {
                None => ranged = Some(&predicate.field),
                Some(first) if first != predicate.field => {
                    return Err(UnsupportedExpression::MultipleRangeFields {
                        first: first.to_string(),
                        second: predicate.field.clone(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
