//! Monoid trait for types with an identity element
//!
//! A `Monoid` is a [`Semigroup`] with an empty value that changes nothing
//! when merged. For validation outcomes the identity is the valid result
//! with no context, which is what aggregating zero results must return.
//!
//! # Laws
//!
//! ```text
//! a.combine(M::empty()) == a           (right identity)
//! M::empty().combine(a) == a           (left identity)
//! ```
//!
//! # Examples
//!
//! ```
//! use tributary::monoid::fold_all;
//! use tributary::ValidationResult;
//!
//! let nothing: Vec<ValidationResult> = vec![];
//! assert_eq!(fold_all(nothing), ValidationResult::success());
//! ```

use crate::result::ValidationResult;
use crate::semigroup::Semigroup;
use crate::value::Metadata;

/// A `Semigroup` with an identity element.
pub trait Monoid: Semigroup {
    /// The identity element for this monoid.
    fn empty() -> Self;
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }
}

impl Monoid for Metadata {
    fn empty() -> Self {
        Metadata::new()
    }
}

impl Monoid for ValidationResult {
    fn empty() -> Self {
        ValidationResult::success()
    }
}

/// Fold every item into one, starting from the identity.
///
/// Returns `M::empty()` for an empty iterator.
pub fn fold_all<M, I>(iter: I) -> M
where
    M: Monoid,
    I: IntoIterator<Item = M>,
{
    iter.into_iter().fold(M::empty(), |acc, x| acc.combine(x))
}
