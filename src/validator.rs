//! The capability every rule and composite implements
//!
//! A [`Validator`] checks a value and reports a
//! [`ValidationResult`]. It has a context-aware entry point,
//! [`validate_with`](Validator::validate_with), and a convenience entry
//! point, [`validate`](Validator::validate), that supplies an empty
//! [`Context`].
//!
//! Plain functions and closures of shape `Fn(&T) -> ValidationResult` are
//! validators too. When called through the context-aware entry point they
//! copy the well-known `requestId` and `userId` entries from the context
//! into their result; that is the only way a bare function sees the context.
//!
//! # Examples
//!
//! ```
//! use tributary::prelude::*;
//!
//! fn not_blank(s: &str) -> ValidationResult {
//!     if s.trim().is_empty() {
//!         ValidationResult::failure(ValidationError::required("value is blank"))
//!     } else {
//!         ValidationResult::success()
//!     }
//! }
//!
//! assert!(not_blank.validate("hello").is_valid());
//!
//! let ctx = Context::new().with_request_id("req-7");
//! let result = not_blank.validate_with("  ", &ctx);
//! assert!(!result.is_valid());
//! assert_eq!(result.context().get_str("requestId"), Some("req-7"));
//! ```
//!
//! ## Implementing the trait
//!
//! ```
//! use tributary::prelude::*;
//!
//! struct MaxLen(usize);
//!
//! impl Validator<str> for MaxLen {
//!     fn validate_with(&self, value: &str, _ctx: &Context) -> ValidationResult {
//!         if value.len() <= self.0 {
//!             ValidationResult::success()
//!         } else {
//!             ValidationResult::failure(
//!                 ValidationError::length(format!("longer than {}", self.0))
//!                     .with_value(value)
//!                     .with_expected(format!("at most {} bytes", self.0)),
//!             )
//!         }
//!     }
//! }
//!
//! assert!(MaxLen(3).validate("abc").is_valid());
//! assert!(!MaxLen(3).validate("abcd").is_valid());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::result::ValidationResult;

/// A rule or composite that checks values of type `T`.
///
/// Implementations must be shareable across threads so that composites
/// can be invoked concurrently and parallel groups can fan out.
pub trait Validator<T: ?Sized>: Send + Sync {
    /// Check `value`, with request-scoped metadata available in `ctx`.
    fn validate_with(&self, value: &T, ctx: &Context) -> ValidationResult;

    /// Check `value` with an empty context.
    #[inline]
    fn validate(&self, value: &T) -> ValidationResult {
        self.validate_with(value, &Context::new())
    }
}

/// Copy the propagated well-known keys from `ctx` into `result`.
fn propagate(mut result: ValidationResult, ctx: &Context) -> ValidationResult {
    for (key, value) in ctx.propagated() {
        result.insert_context(key, value);
    }
    result
}

// Blanket impl for closures and fn items
impl<T: ?Sized, F> Validator<T> for F
where
    F: Fn(&T) -> ValidationResult + Send + Sync,
{
    #[inline]
    fn validate_with(&self, value: &T, ctx: &Context) -> ValidationResult {
        propagate(self(value), ctx)
    }

    #[inline]
    fn validate(&self, value: &T) -> ValidationResult {
        self(value)
    }
}

/// A function adapted into a [`Validator`], created by [`from_fn`].
///
/// Behaves exactly like the closure blanket impl. It exists to pin the
/// argument type for closures whose parameter type would otherwise be
/// inferred ambiguously, and to give the function a `Debug` name.
pub struct FnValidator<F> {
    f: F,
    name: Option<String>,
}

impl<F> FnValidator<F> {
    /// Attach a display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The display name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl<F> fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized, F> Validator<T> for FnValidator<F>
where
    F: Fn(&T) -> ValidationResult + Send + Sync,
{
    #[inline]
    fn validate_with(&self, value: &T, ctx: &Context) -> ValidationResult {
        propagate((self.f)(value), ctx)
    }

    #[inline]
    fn validate(&self, value: &T) -> ValidationResult {
        (self.f)(value)
    }
}

/// Adapt a function into a [`Validator`].
///
/// # Examples
///
/// ```
/// use tributary::prelude::*;
///
/// let positive = from_fn(|n: &i64| {
///     if *n > 0 {
///         ValidationResult::success()
///     } else {
///         ValidationResult::failure(ValidationError::range("must be positive").with_value(*n))
///     }
/// })
/// .named("positive");
///
/// assert!(positive.validate(&3).is_valid());
/// assert_eq!(positive.name(), Some("positive"));
/// ```
pub fn from_fn<T: ?Sized, F>(f: F) -> FnValidator<F>
where
    F: Fn(&T) -> ValidationResult + Send + Sync,
{
    FnValidator { f, name: None }
}

/// A shared, type-erased validator.
///
/// Composites store their members this way; calls go through `Deref`.
pub type BoxedValidator<T> = Arc<dyn Validator<T>>;

/// Extension methods available on every validator.
pub trait ValidatorExt<T: ?Sized>: Validator<T> + Sized {
    /// Erase the concrete type behind an [`Arc`].
    fn boxed(self) -> BoxedValidator<T>
    where
        Self: 'static,
    {
        Arc::new(self)
    }
}

impl<T: ?Sized, V: Validator<T>> ValidatorExt<T> for V {}
