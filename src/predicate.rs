//! Predicates deciding whether a conditional gate runs its validator
//!
//! A [`Predicate`] is a yes/no question about the candidate value a gate
//! is about to validate. Closures of shape `Fn(&T) -> bool` are
//! predicates. Gates usually ask about one field of a larger record, so
//! [`field`] projects the candidate before asking, and [`equals`] covers
//! the common "is this field set to X" case. Questions combine with
//! [`and`](PredicateExt::and), [`or`](PredicateExt::or) and
//! [`not`](PredicateExt::not).
//!
//! # Example
//!
//! ```rust
//! use tributary::predicate::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Tier {
//!     Free,
//!     Business,
//! }
//!
//! struct Account {
//!     tier: Tier,
//!     seats: u32,
//! }
//!
//! let needs_billing_check =
//!     field(|a: &Account| a.tier, equals(Tier::Business)).or(|a: &Account| a.seats > 5);
//!
//! assert!(needs_billing_check.check(&Account { tier: Tier::Business, seats: 1 }));
//! assert!(needs_billing_check.check(&Account { tier: Tier::Free, seats: 10 }));
//! assert!(!needs_billing_check.check(&Account { tier: Tier::Free, seats: 2 }));
//! ```

use std::fmt;
use std::marker::PhantomData;

/// A yes/no question about a candidate value.
pub trait Predicate<T: ?Sized>: Send + Sync {
    /// Whether `value` satisfies the predicate.
    fn check(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, value: &T) -> bool {
        self(value)
    }
}

/// Boolean combinators for every predicate.
pub trait PredicateExt<T: ?Sized>: Predicate<T> + Sized {
    /// Holds when both predicates hold. `other` is skipped once `self` fails.
    fn and<P: Predicate<T>>(self, other: P) -> And<Self, P> {
        And {
            left: self,
            right: other,
        }
    }

    /// Holds when either predicate holds. `other` is skipped once `self` holds.
    fn or<P: Predicate<T>>(self, other: P) -> Or<Self, P> {
        Or {
            left: self,
            right: other,
        }
    }

    /// Holds when `self` does not.
    fn not(self) -> Not<Self> {
        Not { inner: self }
    }
}

impl<T: ?Sized, P: Predicate<T>> PredicateExt<T> for P {}

/// Conjunction, built by [`PredicateExt::and`].
#[derive(Debug, Clone, Copy)]
pub struct And<L, R> {
    left: L,
    right: R,
}

impl<T: ?Sized, L: Predicate<T>, R: Predicate<T>> Predicate<T> for And<L, R> {
    fn check(&self, value: &T) -> bool {
        self.left.check(value) && self.right.check(value)
    }
}

/// Disjunction, built by [`PredicateExt::or`].
#[derive(Debug, Clone, Copy)]
pub struct Or<L, R> {
    left: L,
    right: R,
}

impl<T: ?Sized, L: Predicate<T>, R: Predicate<T>> Predicate<T> for Or<L, R> {
    fn check(&self, value: &T) -> bool {
        self.left.check(value) || self.right.check(value)
    }
}

/// Negation, built by [`PredicateExt::not`].
#[derive(Debug, Clone, Copy)]
pub struct Not<P> {
    inner: P,
}

impl<T: ?Sized, P: Predicate<T>> Predicate<T> for Not<P> {
    fn check(&self, value: &T) -> bool {
        !self.inner.check(value)
    }
}

/// A predicate with a fixed answer, see [`always`] and [`never`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant(bool);

impl<T: ?Sized> Predicate<T> for Constant {
    fn check(&self, _value: &T) -> bool {
        self.0
    }
}

/// A gate built on this always runs its validator.
pub fn always() -> Constant {
    Constant(true)
}

/// A gate built on this never runs its validator.
pub fn never() -> Constant {
    Constant(false)
}

/// Ask a predicate about one part of the candidate, see [`field`].
pub struct Field<F, P, U> {
    project: F,
    predicate: P,
    _part: PhantomData<fn() -> U>,
}

impl<T, U, F, P> Predicate<T> for Field<F, P, U>
where
    T: ?Sized,
    F: Fn(&T) -> U + Send + Sync,
    P: Predicate<U>,
{
    fn check(&self, value: &T) -> bool {
        self.predicate.check(&(self.project)(value))
    }
}

impl<F, P: fmt::Debug, U> fmt::Debug for Field<F, P, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("predicate", &self.predicate)
            .finish_non_exhaustive()
    }
}

/// Project the candidate with `project`, then ask `predicate` about the
/// projected part.
///
/// The projection returns an owned part, so copy or clone small fields
/// out of the record.
pub fn field<T, U, F, P>(project: F, predicate: P) -> Field<F, P, U>
where
    T: ?Sized,
    F: Fn(&T) -> U + Send + Sync,
    P: Predicate<U>,
{
    Field {
        project,
        predicate,
        _part: PhantomData,
    }
}

/// Holds when the candidate equals a fixed value, see [`equals`].
#[derive(Debug, Clone, PartialEq)]
pub struct Equals<U>(U);

impl<U: PartialEq + Send + Sync> Predicate<U> for Equals<U> {
    fn check(&self, value: &U) -> bool {
        *value == self.0
    }
}

/// Holds when the candidate equals `expected`.
pub fn equals<U: PartialEq + Send + Sync>(expected: U) -> Equals<U> {
    Equals(expected)
}
