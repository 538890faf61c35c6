//! Schema validation and coercion of the post-processed record.
//!
//! This is the parser's only fatal boundary: every field is checked against
//! the fixed output schema and all violations are collected into one
//! [`ValidationErrors`] rather than aborting at the first. On success every
//! optional empty value has been normalized to absent, never to an empty
//! string.

use chrono::Datelike;

use crate::error::{FieldError, Result, ValidationErrors, Violation};
use crate::extract::{ExtractedRecord, FieldValue};
use crate::record::EditionRecord;
use crate::template::fields;

/// Maximum length in characters for the title and most bounded strings.
const MAX_SHORT_TEXT: usize = 255;
/// Maximum length for the summary.
const MAX_SUMMARY: usize = 700;
/// Maximum length for the combined topical terms and additional authors.
const MAX_LONG_LIST: usize = 500;
/// Maximum length for the responsibility statement.
const MAX_RESPONSIBILITY: usize = 155;
/// Maximum length for the note and physical-details fields.
const MAX_NOTE: usize = 100;
/// Maximum length for dimensions and accompanying material.
const MAX_TINY_TEXT: usize = 50;
/// Upper bound for integer counts (2^31 − 1).
const MAX_COUNT: u64 = 2_147_483_647;
/// Upper bound for the estimated price.
const MAX_PRICE: u64 = 9_999_999_999;

/// Validator for the fixed edition schema.
///
/// Carries the current calendar year so the publication-year bound is
/// deterministic under test.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    current_year: i32,
}

impl Default for Validator {
    fn default() -> Self {
        Validator::new()
    }
}

impl Validator {
    /// Create a validator bound to the current calendar year.
    #[must_use]
    pub fn new() -> Self {
        Validator {
            current_year: chrono::Utc::now().year(),
        }
    }

    /// Create a validator with a fixed "current" year.
    #[must_use]
    pub fn with_year(current_year: i32) -> Self {
        Validator { current_year }
    }

    /// The year used as the publication-year upper bound.
    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Coerce and validate the post-processed record.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationErrors`] carrying one [`FieldError`] per
    /// violated field; all fields are checked before returning.
    pub fn validate(&self, record: &ExtractedRecord) -> Result<EditionRecord> {
        let mut errors = Vec::new();

        let title = required_text(record, fields::TITLE, MAX_SHORT_TEXT, &mut errors);
        let sub_title = bounded_text(record, fields::SUB_TITLE, MAX_SHORT_TEXT, &mut errors);
        let responsibility =
            bounded_text(record, fields::RESPONSIBILITY, MAX_RESPONSIBILITY, &mut errors);
        let edition = bounded_text(record, fields::EDITION, MAX_SHORT_TEXT, &mut errors);
        let edition_number = positive_count(record, fields::EDITION_NUMBER, &mut errors);
        let language = bounded_text(record, fields::LANGUAGE, MAX_SHORT_TEXT, &mut errors);
        let origin_language =
            bounded_text(record, fields::ORIGIN_LANGUAGE, MAX_SHORT_TEXT, &mut errors);
        let summary = bounded_text(record, fields::SUMMARY, MAX_SUMMARY, &mut errors);
        let publication_year = self.publication_year(record, &mut errors);
        let publisher = free_text(record, fields::PUBLISHER);
        let publication_place = free_text(record, fields::PUBLICATION_PLACE);
        let classification_number = free_text(record, fields::CLASSIFICATION_NUMBER);
        let cutter_number = free_text(record, fields::CUTTER_NUMBER);
        let isbn = free_text(record, fields::ISBN);
        let ean = free_text(record, fields::EAN);
        let estimated_price = positive_price(record, &mut errors);
        let page_count = positive_count(record, fields::PAGE_COUNT, &mut errors);
        let physical_details =
            bounded_text(record, fields::PHYSICAL_DETAILS, MAX_NOTE, &mut errors);
        let dimensions = bounded_text(record, fields::DIMENSIONS, MAX_TINY_TEXT, &mut errors);
        let accompanying_material = bounded_text(
            record,
            fields::ACCOMPANYING_MATERIAL,
            MAX_TINY_TEXT,
            &mut errors,
        );
        let genres = bounded_text(record, fields::GENRES, MAX_SHORT_TEXT, &mut errors);
        let general_note = bounded_text(record, fields::GENERAL_NOTE, MAX_NOTE, &mut errors);
        let bibliographical_note =
            bounded_text(record, fields::BIBLIOGRAPHICAL_NOTE, MAX_NOTE, &mut errors);
        let topical_terms =
            bounded_text(record, fields::TOPICAL_TERMS, MAX_LONG_LIST, &mut errors);
        let additional_authors =
            bounded_text(record, fields::ADDITIONAL_AUTHORS, MAX_LONG_LIST, &mut errors);
        let author = free_text(record, fields::AUTHOR);

        if !errors.is_empty() {
            return Err(ValidationErrors { errors });
        }

        Ok(EditionRecord {
            title: title.unwrap_or_default(),
            sub_title,
            responsibility,
            edition,
            edition_number,
            language,
            origin_language,
            summary,
            publication_year,
            publisher,
            publication_place,
            classification_number,
            cutter_number,
            isbn,
            ean,
            estimated_price,
            page_count,
            physical_details,
            dimensions,
            accompanying_material,
            genres,
            general_note,
            bibliographical_note,
            topical_terms,
            additional_authors,
            author,
        })
    }

    fn publication_year(
        &self,
        record: &ExtractedRecord,
        errors: &mut Vec<FieldError>,
    ) -> Option<i32> {
        let value = record.value(fields::PUBLICATION_YEAR)?;
        let Some(year) = integral(value) else {
            errors.push(FieldError {
                field: fields::PUBLICATION_YEAR,
                violation: Violation::OutOfRange {
                    value: value.render(),
                    max: year_bound(self.current_year),
                },
            });
            return None;
        };
        if year <= 0 {
            errors.push(FieldError {
                field: fields::PUBLICATION_YEAR,
                violation: Violation::OutOfRange {
                    value: value.render(),
                    max: year_bound(self.current_year),
                },
            });
            return None;
        }
        if year > i64::from(self.current_year) {
            errors.push(FieldError {
                field: fields::PUBLICATION_YEAR,
                violation: Violation::FutureYear {
                    year,
                    current: self.current_year,
                },
            });
            return None;
        }
        i32::try_from(year).ok()
    }
}

fn year_bound(current_year: i32) -> u64 {
    u64::try_from(current_year).unwrap_or(0)
}

/// The trimmed text of a field, whatever value shape it carries.
fn rendered(record: &ExtractedRecord, field: &str) -> Option<String> {
    let text = record.value(field)?.render();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Required bounded string: absent/empty is a violation, as is exceeding
/// the maximum length.
fn required_text(
    record: &ExtractedRecord,
    field: &'static str,
    max: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match rendered(record, field) {
        Some(text) => check_length(text, field, max, errors),
        None => {
            errors.push(FieldError {
                field,
                violation: Violation::MissingRequiredField,
            });
            None
        }
    }
}

/// Optional bounded string: absent/empty becomes `None` without error.
fn bounded_text(
    record: &ExtractedRecord,
    field: &'static str,
    max: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    rendered(record, field).and_then(|text| check_length(text, field, max, errors))
}

/// Optional unbounded string.
fn free_text(record: &ExtractedRecord, field: &str) -> Option<String> {
    rendered(record, field)
}

fn check_length(
    text: String,
    field: &'static str,
    max: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let actual = text.chars().count();
    if actual > max {
        errors.push(FieldError {
            field,
            violation: Violation::TooLong { max, actual },
        });
        None
    } else {
        Some(text)
    }
}

/// The numeric content of a value, coercing text if necessary.
fn coerce_number(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => Some(*n),
        FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
    }
}

/// The integral content of a value, rejecting fractional numbers.
#[allow(clippy::cast_possible_truncation)]
fn integral(value: &FieldValue) -> Option<i64> {
    let n = coerce_number(value)?;
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.2e18 {
        Some(n as i64)
    } else {
        None
    }
}

/// Optional positive integer with the 2^31 − 1 upper bound.
fn positive_count(
    record: &ExtractedRecord,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<u32> {
    let value = record.value(field)?;
    match integral(value) {
        Some(n) if n > 0 && u64::try_from(n).is_ok_and(|n| n <= MAX_COUNT) => {
            u32::try_from(n).ok()
        }
        _ => {
            errors.push(FieldError {
                field,
                violation: Violation::OutOfRange {
                    value: value.render(),
                    max: MAX_COUNT,
                },
            });
            None
        }
    }
}

/// Optional positive price with its declared upper bound.
#[allow(clippy::cast_precision_loss)]
fn positive_price(record: &ExtractedRecord, errors: &mut Vec<FieldError>) -> Option<f64> {
    let value = record.value(fields::ESTIMATED_PRICE)?;
    match coerce_number(value) {
        Some(n) if n > 0.0 && n <= MAX_PRICE as f64 => Some(n),
        _ => {
            errors.push(FieldError {
                field: fields::ESTIMATED_PRICE,
                violation: Violation::OutOfRange {
                    value: value.render(),
                    max: MAX_PRICE,
                },
            });
            None
        }
    }
}
