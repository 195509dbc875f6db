//! The outcome of a validation call
//!
//! A [`ValidationResult`] records every error a validator produced and a
//! metadata bag describing how it was produced. Validity is never stored
//! on its own: a result is valid exactly when it holds no errors.
//!
//! # Examples
//!
//! ```
//! use tributary::{ValidationError, ValidationResult};
//!
//! let ok = ValidationResult::success();
//! assert!(ok.is_valid());
//!
//! let bad = ValidationResult::failure(
//!     ValidationError::required("name is required").with_field("name"),
//! )
//! .with_context("form", "signup");
//!
//! assert!(!bad.is_valid());
//! assert!(bad.has_code("required"));
//! assert_eq!(bad.messages(), vec!["name is required"]);
//! assert_eq!(bad.context().get_str("form"), Some("signup"));
//! ```
//!
//! ## Collapsing into a single error
//!
//! ```
//! use tributary::{ValidationError, ValidationResult};
//!
//! let result = ValidationResult::from_errors(vec![
//!     ValidationError::required("name is required"),
//!     ValidationError::format("email is malformed"),
//! ]);
//!
//! let failure = result.into_result().unwrap_err();
//! assert_eq!(failure.primary().message(), "name is required");
//! assert_eq!(failure.count(), 2);
//! ```

use crate::error::ValidationError;
use crate::failure::ValidationFailure;
use crate::value::{Metadata, Value};

/// Structured outcome of one validation call.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    #[cfg_attr(feature = "serde", serde(default))]
    context: Metadata,
}

impl ValidationResult {
    /// A valid result with no errors and an empty context.
    ///
    /// # Examples
    ///
    /// ```
    /// use tributary::ValidationResult;
    ///
    /// let r = ValidationResult::success();
    /// assert!(r.is_valid());
    /// assert!(r.context().is_empty());
    /// ```
    #[inline]
    pub fn success() -> Self {
        Self::default()
    }

    /// An invalid result holding a single error.
    #[inline]
    pub fn failure(error: ValidationError) -> Self {
        ValidationResult {
            errors: vec![error],
            context: Metadata::new(),
        }
    }

    /// A result holding `errors`; valid when the list is empty.
    #[inline]
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        ValidationResult {
            errors,
            context: Metadata::new(),
        }
    }

    /// Attach a context entry, replacing any previous value under `key`.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key, value);
        self
    }

    /// Attach every entry of `entries`, which win over existing keys.
    pub fn with_metadata(mut self, entries: &Metadata) -> Self {
        self.context.merge(entries);
        self
    }

    /// Record another error. The result becomes invalid.
    pub fn push_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Set a context entry in place.
    pub fn insert_context(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.context.insert(key, value);
    }

    /// Whether no errors were recorded.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors in the order they were recorded.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// The result's metadata.
    pub fn context(&self) -> &Metadata {
        &self.context
    }

    /// Split into errors and metadata.
    pub fn into_parts(self) -> (Vec<ValidationError>, Metadata) {
        (self.errors, self.context)
    }

    /// The first recorded error.
    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Every error message, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(ValidationError::message).collect()
    }

    /// Every error code, in order. Codes repeat when several errors share one.
    pub fn codes(&self) -> Vec<&str> {
        self.errors.iter().map(ValidationError::code).collect()
    }

    /// Whether any error carries `code`.
    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code() == code)
    }

    /// Errors reported against `field`.
    pub fn errors_for_field<'a>(
        &'a self,
        field: &'a str,
    ) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors.iter().filter(move |e| e.field() == Some(field))
    }

    /// Collapse into a single error, or `None` when valid.
    pub fn into_error(self) -> Option<ValidationFailure> {
        ValidationFailure::from_errors(self.errors)
    }

    /// `Ok` with the metadata when valid, otherwise the collapsed error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tributary::{ValidationError, ValidationResult};
    ///
    /// let ok = ValidationResult::success().with_context("k", 1);
    /// assert!(ok.into_result().is_ok());
    ///
    /// let err = ValidationResult::failure(ValidationError::custom("no"));
    /// assert_eq!(err.into_result().unwrap_err().to_string(), "no [custom]");
    /// ```
    pub fn into_result(self) -> Result<Metadata, ValidationFailure> {
        let (errors, context) = self.into_parts();
        match ValidationFailure::from_errors(errors) {
            None => Ok(context),
            Some(failure) => Err(failure),
        }
    }
}

impl From<ValidationError> for ValidationResult {
    fn from(error: ValidationError) -> Self {
        ValidationResult::failure(error)
    }
}

impl From<Vec<ValidationError>> for ValidationResult {
    fn from(errors: Vec<ValidationError>) -> Self {
        ValidationResult::from_errors(errors)
    }
}

impl From<Result<(), ValidationError>> for ValidationResult {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => ValidationResult::success(),
            Err(e) => ValidationResult::failure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;

    fn err(code: &str, field: &str) -> ValidationError {
        ValidationError::new(code, format!("{} failed", field)).with_field(field)
    }

    #[test]
    fn test_success_is_valid() {
        let r = ValidationResult::success();
        assert!(r.is_valid());
        assert!(r.errors().is_empty());
        assert!(r.first_error().is_none());
    }

    #[test]
    fn test_failure_is_invalid() {
        let r = ValidationResult::failure(err(codes::FORMAT, "email"));
        assert!(!r.is_valid());
        assert_eq!(r.errors().len(), 1);
    }

    #[test]
    fn test_from_empty_errors_is_valid() {
        assert!(ValidationResult::from_errors(vec![]).is_valid());
    }

    #[test]
    fn test_push_error_flips_validity() {
        let mut r = ValidationResult::success();
        r.push_error(err(codes::REQUIRED, "name"));
        assert!(!r.is_valid());
    }

    #[test]
    fn test_accessors() {
        let r = ValidationResult::from_errors(vec![
            err(codes::REQUIRED, "name"),
            err(codes::FORMAT, "email"),
            err(codes::FORMAT, "phone"),
        ]);

        assert_eq!(r.first_error().map(|e| e.code()), Some(codes::REQUIRED));
        assert_eq!(r.codes(), vec!["required", "format", "format"]);
        assert_eq!(
            r.messages(),
            vec!["name failed", "email failed", "phone failed"]
        );
        assert!(r.has_code(codes::FORMAT));
        assert!(!r.has_code(codes::RANGE));
        assert_eq!(r.errors_for_field("email").count(), 1);
    }

    #[test]
    fn test_context_last_write_wins() {
        let r = ValidationResult::success()
            .with_context("k", 1i32)
            .with_context("k", 2i32);
        assert_eq!(r.context().get("k"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_into_error_valid_is_none() {
        assert!(ValidationResult::success().into_error().is_none());
    }

    #[test]
    fn test_into_result_invalid() {
        let r = ValidationResult::from_errors(vec![
            err(codes::REQUIRED, "name"),
            err(codes::FORMAT, "email"),
        ]);
        let failure = r.into_result().unwrap_err();
        assert_eq!(failure.primary().code(), codes::REQUIRED);
        assert_eq!(failure.count(), 2);
        assert_eq!(failure.messages(), &["name failed", "email failed"]);
    }

    #[test]
    fn test_from_result() {
        let ok: ValidationResult = Ok::<(), ValidationError>(()).into();
        assert!(ok.is_valid());
        let bad: ValidationResult = Err(ValidationError::custom("x")).into();
        assert!(!bad.is_valid());
    }
}
