//! A whole validation outcome collapsed into one error value
//!
//! Call sites that only need "did it pass, and if not why" can turn an
//! invalid [`ValidationResult`](crate::ValidationResult) into a
//! [`ValidationFailure`]. The first error becomes the primary error; the
//! total count and every message ride along as detail.
//!
//! # Examples
//!
//! ```
//! use tributary::{ValidationError, ValidationResult};
//!
//! fn register(name: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let result = if name.is_empty() {
//!         ValidationResult::failure(ValidationError::required("name is required"))
//!     } else {
//!         ValidationResult::success()
//!     };
//!     result.into_result()?;
//!     Ok(())
//! }
//!
//! assert!(register("ada").is_ok());
//! assert!(register("").is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;

use crate::error::ValidationError;

/// The first error of an invalid result plus a summary of the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    primary: ValidationError,
    count: usize,
    messages: Vec<String>,
}

impl ValidationFailure {
    /// Build from a list of errors; `None` when the list is empty.
    pub fn from_errors(errors: Vec<ValidationError>) -> Option<Self> {
        let count = errors.len();
        let messages = errors.iter().map(|e| e.message().to_string()).collect();
        errors.into_iter().next().map(|primary| ValidationFailure {
            primary,
            count,
            messages,
        })
    }

    /// The first error.
    pub fn primary(&self) -> &ValidationError {
        &self.primary
    }

    /// Consume and return the first error.
    pub fn into_primary(self) -> ValidationError {
        self.primary
    }

    /// How many errors the result held.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Every error message, primary first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;

        if self.count > 1 {
            write!(f, " (and {} more)", self.count - 1)?;
            for msg in self.messages.iter().skip(1) {
                write!(f, "\n  - {}", msg)?;
            }
        }

        Ok(())
    }
}

impl StdError for ValidationFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.primary)
    }
}
