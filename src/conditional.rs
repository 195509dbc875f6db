//! Conditional gates
//!
//! A [`Conditional`] wraps one validator behind a [`Predicate`]. When the
//! predicate rejects the value the wrapped validator is never called and
//! the gate reports success; otherwise the wrapped validator's result is
//! passed through unchanged. Either way the result records the gate's name
//! under `conditionalValidator` and the decision under `conditionMet`.
//!
//! The gate never produces an error of its own.
//!
//! # Examples
//!
//! ```
//! use tributary::prelude::*;
//!
//! #[derive(Debug)]
//! struct Order {
//!     express: bool,
//!     phone: String,
//! }
//!
//! let phone_required = |o: &Order| {
//!     if o.phone.is_empty() {
//!         ValidationResult::failure(
//!             ValidationError::required("express orders need a phone").with_field("phone"),
//!         )
//!     } else {
//!         ValidationResult::success()
//!     }
//! };
//!
//! let gate = Conditional::builder(|o: &Order| o.express, phone_required)
//!     .name("express-phone")
//!     .build();
//!
//! let standard = Order { express: false, phone: String::new() };
//! let result = gate.validate(&standard);
//! assert!(result.is_valid());
//! assert_eq!(result.context().get("conditionMet"), Some(&Value::Bool(false)));
//!
//! let express = Order { express: true, phone: String::new() };
//! assert!(gate.validate(&express).has_code("required"));
//! ```

use std::fmt;

use crate::context::{keys, Context};
use crate::predicate::Predicate;
use crate::result::ValidationResult;
use crate::validator::Validator;

/// Name recorded for gates that were not given one.
pub const DEFAULT_NAME: &str = "conditional";

/// Configuration surface for a [`Conditional`].
pub struct ConditionalBuilder<P, V> {
    predicate: P,
    validator: V,
    name: Option<String>,
}

impl<P, V> ConditionalBuilder<P, V> {
    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Freeze the configuration.
    pub fn build(self) -> Conditional<P, V> {
        Conditional {
            predicate: self.predicate,
            validator: self.validator,
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
        }
    }
}

impl<P, V> fmt::Debug for ConditionalBuilder<P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalBuilder")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A validator that only runs when a predicate holds.
pub struct Conditional<P, V> {
    predicate: P,
    validator: V,
    name: String,
}

impl<P, V> Conditional<P, V> {
    /// Start configuring a gate around `validator`.
    pub fn builder(predicate: P, validator: V) -> ConditionalBuilder<P, V> {
        ConditionalBuilder {
            predicate,
            validator,
            name: None,
        }
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped validator.
    pub fn inner(&self) -> &V {
        &self.validator
    }
}

/// An unnamed gate: run `validator` only when `predicate` holds.
///
/// # Examples
///
/// ```
/// use tributary::prelude::*;
///
/// let non_negative = |n: &i32| {
///     if *n >= 0 {
///         ValidationResult::success()
///     } else {
///         ValidationResult::failure(ValidationError::range("negative"))
///     }
/// };
///
/// let gate = when(|n: &i32| *n != 0, non_negative);
/// assert!(gate.validate(&0).is_valid());
/// assert!(!gate.validate(&-1).is_valid());
/// assert_eq!(gate.name(), "conditional");
/// ```
pub fn when<P, V>(predicate: P, validator: V) -> Conditional<P, V> {
    Conditional::builder(predicate, validator).build()
}

impl<T, P, V> Validator<T> for Conditional<P, V>
where
    T: ?Sized,
    P: Predicate<T>,
    V: Validator<T>,
{
    fn validate_with(&self, value: &T, ctx: &Context) -> ValidationResult {
        let met = self.predicate.check(value);

        #[cfg(feature = "tracing")]
        tracing::debug!(gate = %self.name, condition_met = met, "conditional gate evaluated");

        let result = if met {
            self.validator.validate_with(value, ctx)
        } else {
            ValidationResult::success()
        };

        result
            .with_context(keys::CONDITIONAL_VALIDATOR, self.name.as_str())
            .with_context(keys::CONDITION_MET, met)
    }
}

impl<P, V> fmt::Debug for Conditional<P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conditional")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
