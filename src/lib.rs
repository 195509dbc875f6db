//! # Tributary
//!
//! > *Many small streams, one river.*
//!
//! A Rust library for orchestrating validation rules.
//!
//! Rules stay small and independent: each one implements [`Validator`] and
//! reports a structured [`ValidationResult`]. Tributary combines them into
//! composites with well-defined ordering, short-circuit and aggregation
//! behaviour:
//!
//! - [`Chain`] runs validators in declaration order, optionally stopping at
//!   the first failure;
//! - [`Conditional`] only runs its validator when a predicate holds;
//! - [`ParallelGroup`] fans out to every validator at once and joins on all
//!   of them.
//!
//! Every composite is itself a `Validator`, so they nest freely, and every
//! composite merges results with [`combine`]: errors are never dropped,
//! and context metadata is merged with the last write winning.
//!
//! ## Quick Example
//!
//! ```rust
//! use tributary::prelude::*;
//!
//! #[derive(Debug)]
//! struct Signup {
//!     email: String,
//!     age: u32,
//!     referral: Option<String>,
//! }
//!
//! let email = |s: &Signup| {
//!     if s.email.contains('@') {
//!         ValidationResult::success()
//!     } else {
//!         ValidationResult::failure(
//!             ValidationError::new("email", "email is malformed")
//!                 .with_field("email")
//!                 .with_value(s.email.as_str()),
//!         )
//!     }
//! };
//!
//! let adult = |s: &Signup| {
//!     if s.age >= 18 {
//!         ValidationResult::success()
//!     } else {
//!         ValidationResult::failure(
//!             ValidationError::range("must be 18 or older")
//!                 .with_field("age")
//!                 .with_value(s.age)
//!                 .with_expected(">= 18"),
//!         )
//!     }
//! };
//!
//! let referral_code = |s: &Signup| match &s.referral {
//!     Some(code) if code.len() == 6 => ValidationResult::success(),
//!     _ => ValidationResult::failure(
//!         ValidationError::length("referral codes have 6 characters").with_field("referral"),
//!     ),
//! };
//!
//! let signup = Chain::<Signup>::builder()
//!     .name("signup")
//!     .add(email)
//!     .add(adult)
//!     .add(when(|s: &Signup| s.referral.is_some(), referral_code))
//!     .build();
//!
//! let form = Signup { email: "nope".into(), age: 16, referral: None };
//! let ctx = Context::new().with_request_id("req-1");
//! let result = signup.validate_with(&form, &ctx);
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.codes(), vec!["email", "range"]);
//! assert_eq!(result.context().get_str("requestId"), Some("req-1"));
//!
//! let error = result.into_result().unwrap_err();
//! assert_eq!(error.count(), 2);
//! ```
//!
//! ## Feature flags
//!
//! - `tracing`: emit `tracing` spans and events from every composite.
//! - `async`: [`ParallelGroup::validate_async`] on the tokio blocking pool.
//! - `serde`: `Serialize`/`Deserialize` for results, errors and metadata.
//! - `proptest`: `Arbitrary` for results and errors.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod chain;
pub mod combine;
pub mod conditional;
pub mod context;
pub mod error;
pub mod failure;
pub mod monoid;
pub mod parallel;
pub mod predicate;
pub mod result;
pub mod semigroup;
pub mod testing;
pub mod validator;
pub mod value;

// Re-exports
pub use chain::{Chain, ChainBuilder};
pub use combine::combine;
pub use conditional::{when, Conditional, ConditionalBuilder};
pub use context::Context;
pub use error::ValidationError;
pub use failure::ValidationFailure;
pub use monoid::Monoid;
pub use parallel::{ParallelBuilder, ParallelGroup};
pub use result::ValidationResult;
pub use semigroup::Semigroup;
pub use validator::{from_fn, BoxedValidator, FnValidator, Validator, ValidatorExt};
pub use value::{Metadata, Value};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::chain::{Chain, ChainBuilder};
    pub use crate::combine::combine;
    pub use crate::conditional::{when, Conditional};
    pub use crate::context::{keys, Context};
    pub use crate::error::{codes, ValidationError};
    pub use crate::failure::ValidationFailure;
    pub use crate::parallel::ParallelGroup;
    pub use crate::predicate::{Predicate, PredicateExt};
    pub use crate::result::ValidationResult;
    pub use crate::validator::{from_fn, BoxedValidator, Validator, ValidatorExt};
    pub use crate::value::{Metadata, Value};
}
