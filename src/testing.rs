//! Testing utilities for validators and composites
//!
//! Fixed-outcome validators, a call-counting spy, and assertion macros
//! for [`ValidationResult`]s.
//!
//! # Examples
//!
//! ## Spying on a branch
//!
//! ```rust
//! use tributary::prelude::*;
//! use tributary::testing::{always_invalid, always_valid, Counting};
//!
//! let last = Counting::new(always_valid());
//! let calls = last.counter();
//!
//! let chain = Chain::<i32>::builder()
//!     .add(always_invalid("E1"))
//!     .add(last)
//!     .stop_on_first_error(true)
//!     .build();
//!
//! chain.validate(&0);
//! assert_eq!(calls.get(), 0);
//! ```
//!
//! ## Assertion macros
//!
//! ```rust
//! use tributary::{assert_error_codes, assert_invalid, assert_valid};
//! use tributary::{ValidationError, ValidationResult};
//!
//! assert_valid!(ValidationResult::success());
//!
//! let bad = ValidationResult::failure(ValidationError::required("missing"));
//! assert_invalid!(bad.clone());
//! assert_error_codes!(bad, ["required"]);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::context::Context;
use crate::error::ValidationError;
use crate::result::ValidationResult;
use crate::validator::Validator;

/// A validator that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl<T: ?Sized> Validator<T> for AlwaysValid {
    fn validate_with(&self, _value: &T, _ctx: &Context) -> ValidationResult {
        ValidationResult::success()
    }
}

/// Create an [`AlwaysValid`] validator.
pub fn always_valid() -> AlwaysValid {
    AlwaysValid
}

/// A validator that rejects everything with one fixed error.
#[derive(Debug, Clone)]
pub struct AlwaysInvalid {
    error: ValidationError,
}

impl<T: ?Sized> Validator<T> for AlwaysInvalid {
    fn validate_with(&self, _value: &T, _ctx: &Context) -> ValidationResult {
        ValidationResult::failure(self.error.clone())
    }
}

/// Reject everything with an error carrying `code`.
pub fn always_invalid(code: impl Into<String>) -> AlwaysInvalid {
    let code = code.into();
    let message = format!("{} failed", code);
    AlwaysInvalid {
        error: ValidationError::new(code, message),
    }
}

/// Reject everything with `error`.
pub fn always_error(error: ValidationError) -> AlwaysInvalid {
    AlwaysInvalid { error }
}

/// Shared view of a [`Counting`] validator's call count.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    /// Calls observed so far.
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Wraps a validator and counts how many times it runs.
#[derive(Debug)]
pub struct Counting<V> {
    inner: V,
    calls: CallCounter,
}

impl<V> Counting<V> {
    /// Start counting calls to `inner`.
    pub fn new(inner: V) -> Self {
        Counting {
            inner,
            calls: CallCounter::default(),
        }
    }

    /// A handle that keeps reporting after the validator is moved into a
    /// composite.
    pub fn counter(&self) -> CallCounter {
        self.calls.clone()
    }
}

impl<T: ?Sized, V: Validator<T>> Validator<T> for Counting<V> {
    fn validate_with(&self, value: &T, ctx: &Context) -> ValidationResult {
        self.calls.0.fetch_add(1, Ordering::SeqCst);
        self.inner.validate_with(value, ctx)
    }
}

/// Assert that a result is valid.
///
/// Panics with the recorded errors otherwise.
#[macro_export]
macro_rules! assert_valid {
    ($result:expr) => {
        match $result {
            ref result if result.is_valid() => {}
            ref result => {
                panic!("Expected valid result, got errors: {:?}", result.errors());
            }
        }
    };
}

/// Assert that a result is invalid.
#[macro_export]
macro_rules! assert_invalid {
    ($result:expr) => {
        match $result {
            ref result if !result.is_valid() => {}
            ref result => {
                panic!(
                    "Expected invalid result, got valid with context: {:?}",
                    result.context()
                );
            }
        }
    };
}

/// Assert that a result carries exactly these codes, in this order.
///
/// ```rust
/// use tributary::assert_error_codes;
/// use tributary::{ValidationError, ValidationResult};
///
/// let r = ValidationResult::from_errors(vec![
///     ValidationError::required("a"),
///     ValidationError::range("b"),
/// ]);
/// assert_error_codes!(r, ["required", "range"]);
/// ```
#[macro_export]
macro_rules! assert_error_codes {
    ($result:expr, [$($code:expr),* $(,)?]) => {
        match $result {
            ref result => {
                let expected: ::std::vec::Vec<&str> = ::std::vec![$($code),*];
                assert_eq!(result.codes(), expected, "error codes differ");
            }
        }
    };
}

#[cfg(feature = "proptest")]
mod arbitrary {
    use proptest::prelude::*;

    use crate::error::{codes, ValidationError};
    use crate::result::ValidationResult;

    fn code() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            codes::REQUIRED,
            codes::FORMAT,
            codes::LENGTH,
            codes::RANGE,
            codes::TYPE,
            codes::PATTERN,
            codes::CUSTOM,
            codes::EMAIL,
        ])
    }

    impl Arbitrary for ValidationError {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            (code(), "[a-z ]{1,16}", proptest::option::of("[a-z_]{1,8}"))
                .prop_map(|(code, message, field)| {
                    let error = ValidationError::new(code, message);
                    match field {
                        Some(field) => error.with_field(field),
                        None => error,
                    }
                })
                .boxed()
        }
    }

    impl Arbitrary for ValidationResult {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            (
                prop::collection::vec(any::<ValidationError>(), 0..4),
                prop::collection::btree_map("[a-c]", any::<i32>(), 0..3),
            )
                .prop_map(|(errors, context)| {
                    context
                        .into_iter()
                        .fold(ValidationResult::from_errors(errors), |r, (k, v)| {
                            r.with_context(k, v)
                        })
                })
                .boxed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_valid_accepts_anything() {
        assert_valid!(Validator::<str>::validate(&always_valid(), "x"));
        assert_valid!(Validator::<i32>::validate(&always_valid(), &1));
    }

    #[test]
    fn always_invalid_uses_code() {
        let result = Validator::<i32>::validate(&always_invalid("E1"), &1);
        assert_error_codes!(result, ["E1"]);
        assert_eq!(result.messages(), vec!["E1 failed"]);
    }

    #[test]
    fn always_error_returns_given_error() {
        let error = ValidationError::range("too big").with_field("n");
        let result = Validator::<i32>::validate(&always_error(error.clone()), &1);
        assert_eq!(result.errors(), &[error]);
    }

    #[test]
    fn counting_counts_calls() {
        let spy = Counting::new(always_valid());
        let counter = spy.counter();
        assert_eq!(counter.get(), 0);

        Validator::<i32>::validate(&spy, &1);
        Validator::<i32>::validate(&spy, &2);
        assert_eq!(counter.get(), 2);
    }

    #[test]
    #[should_panic(expected = "Expected valid result")]
    fn assert_valid_panics_on_invalid() {
        assert_valid!(ValidationResult::failure(ValidationError::custom("x")));
    }

    #[test]
    #[should_panic(expected = "Expected invalid result")]
    fn assert_invalid_panics_on_valid() {
        assert_invalid!(ValidationResult::success());
    }

    #[test]
    #[should_panic(expected = "error codes differ")]
    fn assert_error_codes_panics_on_mismatch() {
        assert_error_codes!(
            ValidationResult::failure(ValidationError::custom("x")),
            ["required"]
        );
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arbitrary_results_respect_validity(result in any::<ValidationResult>()) {
                prop_assert_eq!(result.is_valid(), result.errors().is_empty());
            }
        }
    }
}
