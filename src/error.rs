//! Structured validation errors
//!
//! A [`ValidationError`] is one reason a value was rejected. Errors are
//! data, not faults: a rule returns them inside a
//! [`ValidationResult`](crate::ValidationResult) and composites carry them
//! through untouched.
//!
//! # Examples
//!
//! ```
//! use tributary::error::{codes, ValidationError};
//!
//! let err = ValidationError::range("age must be between 18 and 120")
//!     .with_field("age")
//!     .with_value(12)
//!     .with_expected("18..=120");
//!
//! assert_eq!(err.code(), codes::RANGE);
//! assert_eq!(err.field(), Some("age"));
//! assert_eq!(err.expected(), Some("18..=120"));
//! ```

use std::fmt;

use crate::value::{Metadata, Value};

/// The error-code vocabulary.
///
/// Codes are plain strings so rule authors can layer domain-specific codes
/// (such as [`EMAIL`]) on top of the generic ones.
pub mod codes {
    /// A required value is missing.
    pub const REQUIRED: &str = "required";
    /// The value is malformed.
    pub const FORMAT: &str = "format";
    /// The value is too short or too long.
    pub const LENGTH: &str = "length";
    /// The value is outside the accepted range.
    pub const RANGE: &str = "range";
    /// The value has the wrong type.
    pub const TYPE: &str = "type";
    /// The value does not match a pattern.
    pub const PATTERN: &str = "pattern";
    /// A custom rule rejected the value.
    pub const CUSTOM: &str = "custom";
    /// The value is not a valid email address.
    pub const EMAIL: &str = "email";
}

/// One structured failure reason.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationError {
    code: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    field: Option<String>,
    message: String,
    #[cfg_attr(feature = "serde", serde(default))]
    value: Value,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    expected: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    context: Option<Metadata>,
}

impl ValidationError {
    /// Create an error with a code and a message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            code: code.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    /// A [`codes::REQUIRED`] error.
    pub fn required(message: impl Into<String>) -> Self {
        Self::new(codes::REQUIRED, message)
    }

    /// A [`codes::FORMAT`] error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::new(codes::FORMAT, message)
    }

    /// A [`codes::LENGTH`] error.
    pub fn length(message: impl Into<String>) -> Self {
        Self::new(codes::LENGTH, message)
    }

    /// A [`codes::RANGE`] error.
    pub fn range(message: impl Into<String>) -> Self {
        Self::new(codes::RANGE, message)
    }

    /// A [`codes::TYPE`] error.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(codes::TYPE, message)
    }

    /// A [`codes::PATTERN`] error.
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::new(codes::PATTERN, message)
    }

    /// A [`codes::CUSTOM`] error.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(codes::CUSTOM, message)
    }

    /// Name the field in error.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Record the offending value.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Describe what was expected.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Attach a context entry to this error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context
            .get_or_insert_with(Metadata::new)
            .insert(key, value);
        self
    }

    /// The error code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The field in error, if named.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The offending value; [`Value::Null`] when not recorded.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The expected value or shape, if described.
    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    /// Per-error context, if any was attached.
    pub fn context(&self) -> Option<&Metadata> {
        self.context.as_ref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {} [{}]", field, self.message, self.code),
            None => write!(f, "{} [{}]", self.message, self.code),
        }
    }
}

impl std::error::Error for ValidationError {}
