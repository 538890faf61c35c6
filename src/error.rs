//! Error and warning types for the parse pipeline.
//!
//! Two severities exist. [`ParseWarning`] covers non-fatal conditions raised
//! during normalization, extraction, and post-processing: the affected field
//! degrades to "absent" and parsing continues. [`ValidationErrors`] is the
//! only fatal failure, produced by the final schema validation step, and
//! aggregates every violated constraint so a caller can surface all field
//! errors at once.

use thiserror::Error;

/// A single constraint violated by one output field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    /// A required field is absent or empty after trimming.
    #[error("required field is missing or empty")]
    MissingRequiredField,

    /// A bounded string field exceeds its maximum length in characters.
    #[error("value is {actual} characters long, maximum is {max}")]
    TooLong {
        /// Maximum allowed length in characters.
        max: usize,
        /// Actual length of the offending value.
        actual: usize,
    },

    /// A numeric field is not a number greater than zero, or exceeds its
    /// declared upper bound.
    #[error("value {value:?} must be a number greater than 0 and at most {max}")]
    OutOfRange {
        /// The offending value, rendered as text.
        value: String,
        /// Inclusive upper bound for the field.
        max: u64,
    },

    /// The publication year lies after the current calendar year.
    #[error("publication year {year} is after the current year {current}")]
    FutureYear {
        /// The rejected year.
        year: i64,
        /// The current calendar year at validation time.
        current: i32,
    },
}

/// A violation attached to the output field it was found on.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {violation}")]
pub struct FieldError {
    /// Output schema name of the field (e.g. `"title"`, `"pageCount"`).
    pub field: &'static str,
    /// The constraint that was violated.
    pub violation: Violation,
}

/// Collected validation failure for a whole record.
///
/// Validation checks every field and reports all violations together rather
/// than stopping at the first, so callers can present errors inline per
/// field. An empty error list is never constructed: validation either fully
/// succeeds or returns at least one [`FieldError`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    /// All field-level violations, in schema order.
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Returns `true` if any violation was recorded for the given field.
    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Returns the first violation recorded for the given field, if any.
    #[must_use]
    pub fn field_violation(&self, field: &str) -> Option<&Violation> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.violation)
    }

    /// Number of violated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if no violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record validation failed: ")?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Non-fatal condition encountered while parsing a record.
///
/// Warnings never abort the pipeline. The affected field is treated as
/// absent and every other field is still extracted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A continuation line appeared before any tagged line and could not be
    /// attached to a field.
    #[error("continuation line before any tagged line: {line:?}")]
    OrphanContinuation {
        /// The orphaned line text.
        line: String,
    },

    /// A value transform could not coerce the raw text into a usable value.
    #[error("could not interpret {value:?} for field {field}")]
    UnusableValue {
        /// Output schema name of the field.
        field: &'static str,
        /// The raw subfield text that failed coercion.
        value: String,
    },

    /// An extracted ISBN does not have a plausible 10- or 13-digit shape.
    /// The value is kept verbatim; the check is a loose shape check, not a
    /// checksum validation.
    #[error("{value:?} does not look like an ISBN; keeping it as-is")]
    ImplausibleIsbn {
        /// The trimmed ISBN text that failed the shape check.
        value: String,
    },

    /// The author name and contribution sequences had diverging lengths and
    /// were paired best-effort by position.
    #[error("{authors} author name(s) but {contributions} contribution(s); paired by position")]
    ContributionMismatch {
        /// Number of accumulated author names.
        authors: usize,
        /// Number of accumulated contribution roles.
        contributions: usize,
    },
}

/// Convenience type alias for [`std::result::Result`] with [`ValidationErrors`].
pub type Result<T> = std::result::Result<T, ValidationErrors>;
