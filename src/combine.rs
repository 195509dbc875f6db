//! Aggregating many results into one
//!
//! [`combine`] merges any number of [`ValidationResult`]s:
//!
//! - the output is valid iff every input is valid (an empty input is valid);
//! - errors are the in-order concatenation of every input's errors, so no
//!   error is ever dropped;
//! - contexts are folded left to right, the last write per key winning.
//!
//! It is a pure function and never fails.
//!
//! # Examples
//!
//! ```
//! use tributary::{combine, ValidationError, ValidationResult};
//!
//! let result = combine(vec![
//!     ValidationResult::success().with_context("step", 0),
//!     ValidationResult::failure(ValidationError::required("name is required")),
//!     ValidationResult::failure(ValidationError::format("email is malformed")),
//! ]);
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.codes(), vec!["required", "format"]);
//! assert!(result.context().contains_key("step"));
//! ```
//!
//! The [`combine!`](crate::combine!) macro accepts results as separate
//! arguments:
//!
//! ```
//! use tributary::{combine, ValidationResult};
//!
//! let merged = combine!(ValidationResult::success(), ValidationResult::success());
//! assert!(merged.is_valid());
//! assert!(combine!().is_valid());
//! ```

use crate::monoid::fold_all;
use crate::result::ValidationResult;

/// Merge results in order into a single result.
#[inline]
pub fn combine<I>(results: I) -> ValidationResult
where
    I: IntoIterator<Item = ValidationResult>,
{
    fold_all(results)
}

/// Merge results given as separate arguments.
#[macro_export]
macro_rules! combine {
    () => {
        $crate::ValidationResult::success()
    };
    ($($result:expr),+ $(,)?) => {
        $crate::combine::combine([$($result),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::value::Value;

    fn invalid(code: &str) -> ValidationResult {
        ValidationResult::failure(ValidationError::new(code, format!("{} failed", code)))
    }

    #[test]
    fn test_empty_is_valid() {
        let result = combine(Vec::new());
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert!(result.context().is_empty());
    }

    #[test]
    fn test_all_valid() {
        let result = combine(vec![ValidationResult::success(); 3]);
        assert!(result.is_valid());
    }

    #[test]
    fn test_valid_then_invalid() {
        let e1 = ValidationError::custom("e1");
        let result = combine(vec![
            ValidationResult::success(),
            ValidationResult::failure(e1.clone()),
        ]);
        assert!(!result.is_valid());
        assert_eq!(result.errors(), &[e1]);
    }

    #[test]
    fn test_error_order_follows_input_order() {
        let forward = combine(vec![invalid("a"), invalid("b")]);
        assert_eq!(forward.codes(), vec!["a", "b"]);

        let backward = combine(vec![invalid("b"), invalid("a")]);
        assert_eq!(backward.codes(), vec!["b", "a"]);
    }

    #[test]
    fn test_multi_error_inputs_are_concatenated() {
        let result = combine(vec![
            ValidationResult::from_errors(vec![
                ValidationError::custom("a1"),
                ValidationError::custom("a2"),
            ]),
            invalid("b"),
        ]);
        assert_eq!(result.messages(), vec!["a1", "a2", "b failed"]);
    }

    #[test]
    fn test_context_last_write_wins() {
        let result = combine(vec![
            ValidationResult::success()
                .with_context("k", "first")
                .with_context("only_first", true),
            invalid("x").with_context("k", "second"),
        ]);
        assert_eq!(result.context().get_str("k"), Some("second"));
        assert_eq!(result.context().get("only_first"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_macro_forms() {
        assert!(combine!().is_valid());
        let r = combine!(invalid("a"), ValidationResult::success(), invalid("b"),);
        assert_eq!(r.codes(), vec!["a", "b"]);
    }
}
