//! Semigroup trait for associative merging
//!
//! Aggregating validation outcomes is an associative operation: merging
//! `a` with `b` and then `c` gives the same result as merging `a` with the
//! merge of `b` and `c`. This trait names that operation so that errors,
//! metadata and whole results all merge the same way.
//!
//! # Laws
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use tributary::{Semigroup, ValidationError, ValidationResult};
//!
//! let a = ValidationResult::failure(ValidationError::custom("a"));
//! let b = ValidationResult::success().with_context("k", 1);
//! let c = ValidationResult::failure(ValidationError::custom("c"));
//!
//! let merged = a.combine(b).combine(c);
//! assert_eq!(merged.messages(), vec!["a", "c"]);
//! assert!(merged.context().contains_key("k"));
//! ```

use crate::result::ValidationResult;
use crate::value::Metadata;

/// A type that supports an associative binary operation
///
/// The `combine` method takes `self` by value. Clone first if you need to
/// keep the originals.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

/// Right-biased union: keys in `other` win.
impl Semigroup for Metadata {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

/// Errors concatenate in order; contexts merge with `other` winning.
impl Semigroup for ValidationResult {
    fn combine(self, other: Self) -> Self {
        let (errors, context) = self.into_parts();
        let (other_errors, other_context) = other.into_parts();
        ValidationResult::from_errors(errors.combine(other_errors))
            .with_metadata(&context.combine(other_context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::value::Value;

    fn invalid(msg: &str) -> ValidationResult {
        ValidationResult::failure(ValidationError::custom(msg))
    }

    #[test]
    fn test_vec_semigroup() {
        let v1 = vec![1, 2, 3];
        let v2 = vec![4, 5, 6];
        assert_eq!(v1.combine(v2), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_metadata_right_bias() {
        let left = Metadata::new().with("a", 1i32).with("shared", "left");
        let right = Metadata::new().with("shared", "right");
        let merged = left.combine(right);

        assert_eq!(merged.get_str("shared"), Some("right"));
        assert_eq!(merged.get("a"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_result_errors_keep_order() {
        let merged = invalid("a").combine(invalid("b"));
        assert_eq!(merged.messages(), vec!["a", "b"]);

        let merged = invalid("b").combine(invalid("a"));
        assert_eq!(merged.messages(), vec!["b", "a"]);
    }

    #[test]
    fn test_result_valid_with_valid_stays_valid() {
        let merged = ValidationResult::success().combine(ValidationResult::success());
        assert!(merged.is_valid());
    }

    #[test]
    fn test_result_associativity() {
        let a = invalid("a").with_context("k", 1i32);
        let b = ValidationResult::success().with_context("k", 2i32);
        let c = invalid("c").with_context("j", 3i32);

        let left = a.clone().combine(b.clone()).combine(c.clone());
        let right = a.combine(b.combine(c));

        assert_eq!(left, right);
    }
}
