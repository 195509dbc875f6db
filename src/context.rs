//! Request-scoped context threaded through validation calls
//!
//! A [`Context`] is a passive, read-only carrier of metadata such as a trace
//! id or the calling user. Validators can read it; nothing in this crate
//! gates execution on it. It holds two well-known fields plus an open bag
//! for anything else the caller or an enclosing composite wants to pass down.
//!
//! # Examples
//!
//! ```
//! use tributary::context::{keys, Context};
//!
//! let ctx = Context::new()
//!     .with_request_id("req-42")
//!     .with_user_id("alice")
//!     .with("tenant", "acme");
//!
//! assert_eq!(ctx.request_id(), Some("req-42"));
//! assert_eq!(ctx.get_str(keys::USER_ID), Some("alice"));
//! assert_eq!(ctx.get_str("tenant"), Some("acme"));
//! ```
//!
//! Note that the context carries no deadline or cancellation signal.

use crate::value::{Metadata, Value};

/// Context keys with reserved meaning.
///
/// Composites write these into result contexts; callers should not use
/// them for their own data.
pub mod keys {
    /// Trace/request identifier copied into results by function validators.
    pub const REQUEST_ID: &str = "requestId";
    /// Calling user copied into results by function validators.
    pub const USER_ID: &str = "userId";
    /// Name of the enclosing chain.
    pub const CHAIN_NAME: &str = "chainName";
    /// Name of the enclosing parallel group.
    pub const GROUP_NAME: &str = "groupName";
    /// Position of a step in a chain, or of a branch in a group.
    pub const VALIDATOR_INDEX: &str = "validatorIndex";
    /// Number of validators configured on a composite.
    pub const TOTAL_VALIDATORS: &str = "totalValidators";
    /// Number of chain steps actually run.
    pub const EXECUTED_VALIDATORS: &str = "executedValidators";
    /// Name of a conditional gate.
    pub const CONDITIONAL_VALIDATOR: &str = "conditionalValidator";
    /// Whether a conditional gate's predicate held.
    pub const CONDITION_MET: &str = "conditionMet";
    /// Marks results produced by a parallel group.
    pub const PARALLEL_EXECUTION: &str = "parallelExecution";

    /// Keys copied from a [`Context`](super::Context) into a function
    /// validator's result.
    pub const PROPAGATED: [&str; 2] = [REQUEST_ID, USER_ID];
}

/// Read-only metadata carrier for a single validation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    request_id: Option<String>,
    user_id: Option<String>,
    extra: Metadata,
}

impl Context {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request/trace id.
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Set the calling user.
    pub fn with_user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    /// Attach an extra entry.
    ///
    /// The well-known keys [`keys::REQUEST_ID`] and [`keys::USER_ID`] always
    /// land in their typed fields: text is stored as is, other values by
    /// their display form, and [`Value::Null`] clears the field.
    ///
    /// ```
    /// use tributary::context::{keys, Context};
    ///
    /// let ctx = Context::new().with(keys::REQUEST_ID, 42);
    /// assert_eq!(ctx.request_id(), Some("42"));
    /// assert!(ctx.extra().is_empty());
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key.into(), value.into());
        self
    }

    /// Attach every entry of `entries`, later entries winning.
    pub fn with_all(mut self, entries: &Metadata) -> Self {
        for (k, v) in entries.iter() {
            self.set(k.to_string(), v.clone());
        }
        self
    }

    fn set(&mut self, key: String, value: Value) {
        let slot = match key.as_str() {
            keys::REQUEST_ID => Some(&mut self.request_id),
            keys::USER_ID => Some(&mut self.user_id),
            _ => None,
        };
        match slot {
            Some(slot) => {
                *slot = match value {
                    Value::Null => None,
                    Value::Str(s) => Some(s),
                    other => Some(other.to_string()),
                };
            }
            None => {
                self.extra.insert(key, value);
            }
        }
    }

    /// The request/trace id, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// The calling user, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// The extensible bag.
    pub fn extra(&self) -> &Metadata {
        &self.extra
    }

    /// Look up any key, including the well-known ones.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            keys::REQUEST_ID => self.request_id.clone().map(Value::Str),
            keys::USER_ID => self.user_id.clone().map(Value::Str),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Look up a text entry by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match key {
            keys::REQUEST_ID => self.request_id(),
            keys::USER_ID => self.user_id(),
            _ => self.extra.get_str(key),
        }
    }

    /// Whether the context carries nothing at all.
    pub fn is_empty(&self) -> bool {
        self.request_id.is_none() && self.user_id.is_none() && self.extra.is_empty()
    }

    /// The well-known entries that function validators propagate into
    /// their results.
    pub(crate) fn propagated(&self) -> impl Iterator<Item = (&'static str, &str)> {
        keys::PROPAGATED
            .into_iter()
            .filter_map(move |k| self.get_str(k).map(|v| (k, v)))
    }
}
