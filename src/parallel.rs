//! Parallel groups of validators
//!
//! A [`ParallelGroup`] runs every member validator at the same time and
//! waits for all of them before merging their results. Each branch runs on
//! its own scoped thread and publishes its result to a completion channel
//! sized to the number of branches, so no branch ever blocks on the
//! collector. The group returns once it has received one result per
//! branch.
//!
//! Results are merged in arrival order. Validity and the set of errors do
//! not depend on scheduling, but **the order of errors coming from
//! different branches does**. Each branch result is tagged with its
//! `validatorIndex` and the merged result records `parallelExecution` and
//! `totalValidators`.
//!
//! If a branch panics, the remaining branches still run to completion and
//! the panic is then re-raised on the calling thread. There is no timeout
//! or cancellation.
//!
//! # Examples
//!
//! ```
//! use tributary::prelude::*;
//!
//! let not_empty = |s: &String| {
//!     if s.is_empty() {
//!         ValidationResult::failure(ValidationError::required("empty"))
//!     } else {
//!         ValidationResult::success()
//!     }
//! };
//! let short = |s: &String| {
//!     if s.len() <= 8 {
//!         ValidationResult::success()
//!     } else {
//!         ValidationResult::failure(ValidationError::length("too long"))
//!     }
//! };
//!
//! let group = ParallelGroup::<String>::builder()
//!     .name("username")
//!     .add(not_empty)
//!     .add(short)
//!     .build();
//!
//! let result = group.validate(&"a-very-long-name".to_string());
//! assert_eq!(result.codes(), vec!["length"]);
//! assert_eq!(result.context().get("parallelExecution"), Some(&Value::Bool(true)));
//! assert_eq!(result.context().get("totalValidators"), Some(&Value::UInt(2)));
//! ```

use std::fmt;
use std::panic;
use std::sync::{mpsc, Arc};
use std::thread;

use crate::combine::combine;
use crate::context::{keys, Context};
use crate::result::ValidationResult;
use crate::validator::{BoxedValidator, Validator};

/// Configuration surface for a [`ParallelGroup`].
pub struct ParallelBuilder<T: ?Sized> {
    name: Option<String>,
    validators: Vec<BoxedValidator<T>>,
}

impl<T: ?Sized> ParallelBuilder<T> {
    /// An unnamed, empty builder.
    pub fn new() -> Self {
        ParallelBuilder {
            name: None,
            validators: Vec::new(),
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a branch.
    pub fn add<V>(mut self, validator: V) -> Self
    where
        V: Validator<T> + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Add an already type-erased branch.
    pub fn add_boxed(mut self, validator: BoxedValidator<T>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Number of branches added so far.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether no branches have been added.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Freeze the configuration.
    pub fn build(self) -> ParallelGroup<T> {
        ParallelGroup {
            name: self.name,
            validators: self.validators,
        }
    }
}

impl<T: ?Sized> Default for ParallelBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ParallelBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelBuilder")
            .field("name", &self.name)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// An immutable set of validators run concurrently.
pub struct ParallelGroup<T: ?Sized> {
    name: Option<String>,
    validators: Vec<BoxedValidator<T>>,
}

impl<T: ?Sized> ParallelGroup<T> {
    /// Start configuring a group.
    pub fn builder() -> ParallelBuilder<T> {
        ParallelBuilder::new()
    }

    /// The display name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of branches.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the group has no branches.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    fn finish(&self, collected: Vec<ValidationResult>) -> ValidationResult {
        let mut result = combine(collected);
        if let Some(name) = &self.name {
            result.insert_context(keys::GROUP_NAME, name.as_str());
        }
        result.insert_context(keys::PARALLEL_EXECUTION, true);
        result.insert_context(keys::TOTAL_VALIDATORS, self.validators.len());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            branches = self.validators.len(),
            errors = result.errors().len(),
            valid = result.is_valid(),
            "parallel group finished"
        );

        result
    }
}

fn tag_branch(mut result: ValidationResult, name: Option<&str>, index: usize) -> ValidationResult {
    if let Some(name) = name {
        result.insert_context(keys::GROUP_NAME, name);
    }
    result.insert_context(keys::VALIDATOR_INDEX, index);
    result
}

impl<T: ?Sized + Sync> Validator<T> for ParallelGroup<T> {
    fn validate_with(&self, value: &T, ctx: &Context) -> ValidationResult {
        let total = self.validators.len();
        if total == 0 {
            return ValidationResult::success();
        }

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "parallel",
            group = self.name.as_deref().unwrap_or_default(),
            branches = total
        );
        #[cfg(feature = "tracing")]
        let _entered = span.enter();

        let (tx, rx) = mpsc::sync_channel(total);
        let name = self.name.as_deref();

        let collected = thread::scope(|scope| {
            let handles: Vec<_> = self
                .validators
                .iter()
                .enumerate()
                .map(|(index, validator)| {
                    let tx = tx.clone();
                    #[cfg(feature = "tracing")]
                    let span = span.clone();
                    scope.spawn(move || {
                        #[cfg(feature = "tracing")]
                        let _entered = span.enter();
                        let result = tag_branch(validator.validate_with(value, ctx), name, index);
                        #[cfg(feature = "tracing")]
                        tracing::trace!(index, valid = result.is_valid(), "branch finished");
                        // The receiver outlives every branch, so this cannot fail.
                        let _ = tx.send(result);
                    })
                })
                .collect();
            drop(tx);

            let mut collected = Vec::with_capacity(total);
            while collected.len() < total {
                match rx.recv() {
                    Ok(result) => collected.push(result),
                    // every sender is gone: a branch died before publishing
                    Err(_) => break,
                }
            }

            for handle in handles {
                if let Err(payload) = handle.join() {
                    panic::resume_unwind(payload);
                }
            }
            collected
        });

        self.finish(collected)
    }
}

#[cfg(feature = "async")]
impl<T: ?Sized + Send + Sync + 'static> ParallelGroup<T> {
    /// Fan out on the tokio blocking pool instead of scoped threads.
    ///
    /// Branches rendezvous on a bounded channel with one slot per branch;
    /// the handles are then joined and a panicking branch is re-raised in
    /// the awaiting task. Requires a tokio runtime.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use tributary::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let group = ParallelGroup::<i32>::builder()
    ///     .add(|n: &i32| {
    ///         if *n > 0 {
    ///             ValidationResult::success()
    ///         } else {
    ///             ValidationResult::failure(ValidationError::range("not positive"))
    ///         }
    ///     })
    ///     .build();
    ///
    /// let result = group.validate_async(Arc::new(-3), &Context::new()).await;
    /// assert!(result.has_code("range"));
    /// # });
    /// ```
    pub async fn validate_async(&self, value: Arc<T>, ctx: &Context) -> ValidationResult {
        if self.validators.is_empty() {
            return ValidationResult::success();
        }

        let fan_out = self.fan_out_async(value, ctx);
        #[cfg(feature = "tracing")]
        let fan_out = tracing::Instrument::instrument(
            fan_out,
            tracing::debug_span!(
                "parallel",
                group = self.name.as_deref().unwrap_or_default(),
                branches = self.validators.len()
            ),
        );
        fan_out.await
    }

    async fn fan_out_async(&self, value: Arc<T>, ctx: &Context) -> ValidationResult {
        let total = self.validators.len();
        let (tx, mut rx) = tokio::sync::mpsc::channel(total);

        let handles: Vec<_> = self
            .validators
            .iter()
            .enumerate()
            .map(|(index, validator)| {
                let validator = Arc::clone(validator);
                let value = Arc::clone(&value);
                let ctx = ctx.clone();
                let name = self.name.clone();
                let tx = tx.clone();
                #[cfg(feature = "tracing")]
                let span = tracing::Span::current();
                tokio::task::spawn_blocking(move || {
                    #[cfg(feature = "tracing")]
                    let _entered = span.enter();
                    let result =
                        tag_branch(validator.validate_with(&*value, &ctx), name.as_deref(), index);
                    #[cfg(feature = "tracing")]
                    tracing::trace!(index, valid = result.is_valid(), "branch finished");
                    let _ = tx.blocking_send(result);
                })
            })
            .collect();
        drop(tx);

        let mut collected = Vec::with_capacity(total);
        while collected.len() < total {
            match rx.recv().await {
                Some(result) => collected.push(result),
                None => break,
            }
        }

        for joined in futures::future::join_all(handles).await {
            if let Err(err) = joined {
                if err.is_panic() {
                    panic::resume_unwind(err.into_panic());
                }
            }
        }

        self.finish(collected)
    }
}

impl<T: ?Sized> fmt::Debug for ParallelGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelGroup")
            .field("name", &self.name)
            .field("validators", &self.validators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Chain;
    use crate::testing::{always_invalid, always_valid, Counting};
    use crate::value::Value;
    use std::collections::BTreeSet;
    use std::sync::Barrier;

    #[test]
    fn test_collects_every_branch() {
        let group = ParallelGroup::<i32>::builder()
            .name("g")
            .add(always_valid())
            .add(always_invalid("EY"))
            .add(always_valid())
            .build();

        let result = group.validate(&0);
        assert!(!result.is_valid());
        assert_eq!(result.codes().iter().filter(|c| **c == "EY").count(), 1);
        assert_eq!(
            result.context().get(keys::TOTAL_VALIDATORS),
            Some(&Value::UInt(3))
        );
        assert_eq!(
            result.context().get(keys::PARALLEL_EXECUTION),
            Some(&Value::Bool(true))
        );
        assert_eq!(result.context().get_str(keys::GROUP_NAME), Some("g"));
    }

    #[test]
    fn test_branch_results_carry_their_index() {
        let tagged = tag_branch(ValidationResult::success(), Some("g"), 2);
        assert_eq!(
            tagged.context().get(keys::VALIDATOR_INDEX),
            Some(&Value::UInt(2))
        );
        assert_eq!(tagged.context().get_str(keys::GROUP_NAME), Some("g"));

        let unnamed = tag_branch(ValidationResult::success(), None, 0);
        assert!(!unnamed.context().contains_key(keys::GROUP_NAME));
    }

    #[test]
    fn test_merged_index_belongs_to_some_branch() {
        let group = ParallelGroup::<i32>::builder()
            .add(always_valid())
            .add(always_invalid("E"))
            .add(always_valid())
            .build();

        for _ in 0..20 {
            let result = group.validate(&0);
            let index = result
                .context()
                .get(keys::VALIDATOR_INDEX)
                .and_then(Value::as_u64);
            assert!(matches!(index, Some(i) if i < 3));
        }

        let single = ParallelGroup::<i32>::builder().add(always_valid()).build();
        assert_eq!(
            single.validate(&0).context().get(keys::VALIDATOR_INDEX),
            Some(&Value::UInt(0))
        );
    }

    #[test]
    fn test_empty_group_is_immediately_valid() {
        let group = ParallelGroup::<i32>::builder().name("empty").build();
        let result = group.validate(&0);
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_every_failing_branch_is_reported() {
        let group = ParallelGroup::<i32>::builder()
            .add(always_invalid("A"))
            .add(always_invalid("B"))
            .add(always_invalid("C"))
            .build();

        let result = group.validate(&0);
        let codes: BTreeSet<_> = result.codes().into_iter().collect();
        assert_eq!(codes, BTreeSet::from(["A", "B", "C"]));
        assert_eq!(result.errors().len(), 3);
    }

    #[test]
    fn test_branches_run_concurrently() {
        // Every branch waits for all the others; this only finishes if
        // they are in flight at the same time.
        let barrier = Arc::new(Barrier::new(3));
        let mut builder = ParallelGroup::<i32>::builder();
        for _ in 0..3 {
            let barrier = Arc::clone(&barrier);
            builder = builder.add(move |_: &i32| {
                barrier.wait();
                ValidationResult::success()
            });
        }

        assert!(builder.build().validate(&0).is_valid());
    }

    #[test]
    fn test_each_branch_runs_exactly_once() {
        let branches: Vec<_> = (0..4).map(|_| Counting::new(always_valid())).collect();
        let counters: Vec<_> = branches.iter().map(Counting::counter).collect();
        let group = branches
            .into_iter()
            .fold(ParallelGroup::<i32>::builder(), |b, v| b.add(v))
            .build();

        group.validate(&0);
        assert!(counters.iter().all(|c| c.get() == 1));
    }

    #[test]
    fn test_branches_receive_caller_context() {
        let group = ParallelGroup::<i32>::builder()
            .add(always_valid())
            .add(|_: &i32| ValidationResult::success())
            .build();

        let ctx = Context::new().with_request_id("req-9");
        let result = group.validate_with(&0, &ctx);
        assert_eq!(result.context().get_str(keys::REQUEST_ID), Some("req-9"));
    }

    #[test]
    fn test_group_inside_chain() {
        let group = ParallelGroup::<i32>::builder()
            .add(always_invalid("P1"))
            .build();
        let chain = Chain::<i32>::builder()
            .add(group)
            .add(always_invalid("S2"))
            .build();

        let result = chain.validate(&0);
        assert_eq!(result.codes(), vec!["P1", "S2"]);
    }

    #[test]
    #[should_panic(expected = "branch exploded")]
    fn test_branch_panic_reaches_caller() {
        let group = ParallelGroup::<i32>::builder()
            .add(always_valid())
            .add(|_: &i32| -> ValidationResult { panic!("branch exploded") })
            .add(always_invalid("E"))
            .build();

        group.validate(&0);
    }
}
