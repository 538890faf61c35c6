//! The parse pipeline façade.
//!
//! A single pass with no retained state: normalize lines, extract against
//! the template table, post-process, validate. Safe to call concurrently;
//! each invocation owns all of its intermediates.

use crate::error::{ParseWarning, Result};
use crate::extract::{extract, ExtractedRecord};
use crate::isbn;
use crate::line::normalize;
use crate::postprocess::postprocess;
use crate::record::EditionRecord;
use crate::template::fields;
use crate::validate::Validator;

/// Outcome of a parse with the non-fatal warnings surfaced.
#[derive(Debug, Clone)]
pub struct ParseReport {
    /// The validated record, or the collected validation failure.
    pub record: Result<EditionRecord>,
    /// Non-fatal conditions encountered along the way, in pipeline order.
    pub warnings: Vec<ParseWarning>,
}

/// Parse a raw MARC21 textual export into a validated edition record.
///
/// Tokenization, extraction, and post-processing never fail: malformed
/// per-field data degrades to "field absent". Only the final schema
/// validation can fail, and it reports all field violations together.
///
/// # Examples
///
/// ```
/// let raw = "245\t1\t0\t$a The Odyssey$b an epic poem";
/// let record = marcline::parse(raw).unwrap();
/// assert_eq!(record.title, "The Odyssey");
/// assert_eq!(record.sub_title.as_deref(), Some("an epic poem"));
/// ```
///
/// # Errors
///
/// Returns [`crate::ValidationErrors`] when the extracted record violates
/// the output schema (missing title, over-long strings, out-of-range
/// numbers, a future publication year).
pub fn parse(raw: &str) -> Result<EditionRecord> {
    parse_verbose(raw).record
}

/// Parse as [`parse`] does, additionally surfacing every non-fatal
/// [`ParseWarning`] raised during normalization, extraction, and
/// post-processing.
#[must_use]
pub fn parse_verbose(raw: &str) -> ParseReport {
    let (lines, mut warnings) = normalize(raw);
    let (extracted, extraction_warnings) = extract(&lines);
    warnings.extend(extraction_warnings);
    let processed = postprocess(extracted, &mut warnings);
    check_isbn_shape(&processed, &mut warnings);
    let record = Validator::new().validate(&processed);
    ParseReport { record, warnings }
}

/// Apply the loose ISBN shape check. An implausible shape is kept verbatim
/// and reported as a warning, never dropped or rejected.
fn check_isbn_shape(record: &ExtractedRecord, warnings: &mut Vec<ParseWarning>) {
    if let Some(value) = record.text(fields::ISBN) {
        if !isbn::is_well_formed(value) {
            warnings.push(ParseWarning::ImplausibleIsbn {
                value: value.to_string(),
            });
        }
    }
}
