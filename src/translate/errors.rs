//! Translator error types
//!
//! An [`UnsupportedExpression`] is a programmer error: callers composing
//! filters within the documented shapes never see one.

use thiserror::Error;

/// Result type for translation
pub type TranslateResult<T> = Result<T, UnsupportedExpression>;

/// Expression shapes the store contract cannot represent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnsupportedExpression {
    /// A condition carried an empty field name
    #[error("condition field must be a non-empty identifier")]
    EmptyField,

    /// Negation of anything but a single equality condition
    #[error("negation is only supported over a single equality condition")]
    Negation,

    /// Two different fields carry range predicates in one store query
    #[error("multiple-range-fields: '{first}' and '{second}' cannot both carry range predicates in one query")]
    MultipleRangeFields {
        /// First ranged field encountered
        first: String,
        /// Conflicting second ranged field
        second: String,
    },
}
