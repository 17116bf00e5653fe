//! Deterministic ordering over document field values
//!
//! The contract expects stores to sequence records by a single field. This
//! is the reference order: absent < null < bool < number < string; same
//! types compare naturally; arrays and objects tie. Client-side merges use
//! the same order so fan-out results line up with single-query results.

use std::cmp::Ordering;

use serde_json::Value;

/// Compares two optional field values under the reference order
pub fn compare_field_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let type_order = |v: &Value| -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    };

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            let (at, bt) = (type_order(a), type_order(b));
            if at != bt {
                return at.cmp(&bt);
            }
            match (a, b) {
                (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
                (Value::Number(x), Value::Number(y)) => {
                    let (xf, yf) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
                    xf.partial_cmp(&yf).unwrap_or(Ordering::Equal)
                }
                (Value::String(x), Value::String(y)) => x.cmp(y),
                _ => Ordering::Equal,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_sorts_first() {
        assert_eq!(compare_field_values(None, Some(&json!(0))), Ordering::Less);
        assert_eq!(compare_field_values(None, None), Ordering::Equal);
    }

    #[test]
    fn test_type_ranking() {
        assert_eq!(
            compare_field_values(Some(&json!(true)), Some(&json!(1))),
            Ordering::Less
        );
        assert_eq!(
            compare_field_values(Some(&json!(9)), Some(&json!("a"))),
            Ordering::Less
        );
    }

    #[test]
    fn test_natural_order_within_type() {
        assert_eq!(
            compare_field_values(Some(&json!(2)), Some(&json!(10))),
            Ordering::Less
        );
        assert_eq!(
            compare_field_values(Some(&json!("alice")), Some(&json!("bob"))),
            Ordering::Less
        );
    }
}
