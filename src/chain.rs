//! Sequential chains of validators
//!
//! A [`Chain`] runs its validators one after another, in the order they
//! were added, and merges their results with [`combine`]. Error order in
//! the final result therefore follows declaration order. With
//! [`stop_on_first_error`](ChainBuilder::stop_on_first_error) the chain
//! stops at the first invalid step and never runs the rest.
//!
//! Chains are configured through a [`ChainBuilder`]; the built chain is
//! immutable and can be shared and invoked concurrently.
//!
//! Every step sees the caller's context extended with the chain's own
//! extra entries and the chain name. Each step's result is tagged with the
//! chain name and its position, and the merged result records
//! `totalValidators` and `executedValidators`.
//!
//! A panic inside a step is not caught; it unwinds through the chain.
//!
//! # Examples
//!
//! ```
//! use tributary::prelude::*;
//!
//! fn required(s: &str) -> ValidationResult {
//!     if s.is_empty() {
//!         ValidationResult::failure(ValidationError::required("value is required"))
//!     } else {
//!         ValidationResult::success()
//!     }
//! }
//!
//! fn has_at(s: &str) -> ValidationResult {
//!     if s.contains('@') {
//!         ValidationResult::success()
//!     } else {
//!         ValidationResult::failure(ValidationError::new("email", "missing @"))
//!     }
//! }
//!
//! let email = Chain::<str>::builder()
//!     .name("email")
//!     .add(required)
//!     .add(has_at)
//!     .stop_on_first_error(true)
//!     .build();
//!
//! assert_eq!(email.name(), Some("email"));
//! assert_eq!(email.len(), 2);
//!
//! let result = email.validate("");
//! assert_eq!(result.codes(), vec!["required"]);
//! assert_eq!(result.context().get("executedValidators"), Some(&Value::UInt(1)));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::combine::combine;
use crate::context::{keys, Context};
use crate::result::ValidationResult;
use crate::validator::{BoxedValidator, Validator};
use crate::value::{Metadata, Value};

/// Configuration surface for a [`Chain`].
pub struct ChainBuilder<T: ?Sized> {
    name: Option<String>,
    validators: Vec<BoxedValidator<T>>,
    stop_on_first_error: bool,
    extra: Metadata,
}

impl<T: ?Sized> ChainBuilder<T> {
    /// An unnamed, empty builder that runs every step.
    pub fn new() -> Self {
        ChainBuilder {
            name: None,
            validators: Vec::new(),
            stop_on_first_error: false,
            extra: Metadata::new(),
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a validator.
    pub fn add<V>(mut self, validator: V) -> Self
    where
        V: Validator<T> + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Append an already type-erased validator.
    pub fn add_boxed(mut self, validator: BoxedValidator<T>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Stop at the first invalid step. Defaults to `false`.
    pub fn stop_on_first_error(mut self, stop: bool) -> Self {
        self.stop_on_first_error = stop;
        self
    }

    /// Add an entry to the context every step receives.
    pub fn context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, value);
        self
    }

    /// Number of validators added so far.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether no validators have been added.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Freeze the configuration.
    pub fn build(self) -> Chain<T> {
        Chain {
            name: self.name,
            validators: self.validators,
            stop_on_first_error: self.stop_on_first_error,
            extra: self.extra,
        }
    }
}

impl<T: ?Sized> Default for ChainBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ChainBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainBuilder")
            .field("name", &self.name)
            .field("validators", &self.validators.len())
            .field("stop_on_first_error", &self.stop_on_first_error)
            .field("extra", &self.extra)
            .finish()
    }
}

/// An immutable sequence of validators run in declaration order.
pub struct Chain<T: ?Sized> {
    name: Option<String>,
    validators: Vec<BoxedValidator<T>>,
    stop_on_first_error: bool,
    extra: Metadata,
}

impl<T: ?Sized> Chain<T> {
    /// Start configuring a chain.
    pub fn builder() -> ChainBuilder<T> {
        ChainBuilder::new()
    }

    /// The display name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of configured validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the chain has no validators.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Whether the chain stops at the first invalid step.
    pub fn stops_on_first_error(&self) -> bool {
        self.stop_on_first_error
    }

    /// Entries the chain adds to every step's context.
    pub fn extra_context(&self) -> &Metadata {
        &self.extra
    }

    fn step_context(&self, ctx: &Context) -> Context {
        let effective = ctx.clone().with_all(&self.extra);
        match &self.name {
            Some(name) => effective.with(keys::CHAIN_NAME, name.as_str()),
            None => effective,
        }
    }
}

impl<T: ?Sized> Validator<T> for Chain<T> {
    fn validate_with(&self, value: &T, ctx: &Context) -> ValidationResult {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "chain",
            chain = self.name.as_deref().unwrap_or_default(),
            validators = self.validators.len()
        )
        .entered();

        let effective = self.step_context(ctx);
        let mut steps = Vec::with_capacity(self.validators.len());

        for (index, validator) in self.validators.iter().enumerate() {
            let mut step = validator.validate_with(value, &effective);
            if let Some(name) = &self.name {
                step.insert_context(keys::CHAIN_NAME, name.as_str());
            }
            step.insert_context(keys::VALIDATOR_INDEX, index);

            let failed = !step.is_valid();
            #[cfg(feature = "tracing")]
            tracing::trace!(index, valid = !failed, "chain step finished");
            steps.push(step);

            if failed && self.stop_on_first_error {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    index,
                    skipped = self.validators.len() - index - 1,
                    "chain stopped at first error"
                );
                break;
            }
        }

        let executed = steps.len();
        let mut result = combine(steps);
        if let Some(name) = &self.name {
            result.insert_context(keys::CHAIN_NAME, name.as_str());
        }
        result.insert_context(keys::TOTAL_VALIDATORS, self.validators.len());
        result.insert_context(keys::EXECUTED_VALIDATORS, executed);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            executed,
            errors = result.errors().len(),
            valid = result.is_valid(),
            "chain finished"
        );

        result
    }
}

impl<T: ?Sized> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("name", &self.name)
            .field("validators", &self.validators.len())
            .field("stop_on_first_error", &self.stop_on_first_error)
            .field("extra", &self.extra)
            .finish()
    }
}
