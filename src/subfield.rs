//! Splitting field content into subfields.
//!
//! MARC21 textual exports mark subfields inline with a `$` followed by a
//! single alphanumeric code, e.g. `$a The Odyssey$b an epic poem`. This
//! module turns one field's content string into an ordered list of
//! [`Subfield`] values.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

lazy_static! {
    /// A `$` immediately followed by a one-character subfield code.
    ///
    /// The code character is required, so a literal `$` inside a value
    /// (e.g. a price) does not start a new subfield unless an alphanumeric
    /// character follows it.
    static ref DELIMITER: Regex = Regex::new(r"\$[0-9a-zA-Z]").expect("valid delimiter pattern");
}

/// A subfield within a field: a one-character code and its trimmed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character).
    pub code: char,
    /// Subfield value, trimmed.
    pub value: String,
}

/// Subfield storage. Typical fields carry four or fewer subfields, so a
/// `SmallVec` avoids heap allocation for the common case.
pub type Subfields = SmallVec<[Subfield; 4]>;

/// Split one field's content into its subfields, in order of appearance.
///
/// Each value runs from its code marker up to the next marker or the end of
/// the content, and is trimmed. Text before the first marker is ignored.
///
/// # Examples
///
/// ```
/// use marcline::subfield::split_subfields;
///
/// let subfields = split_subfields("$a The Odyssey$b an epic poem");
/// assert_eq!(subfields[0].code, 'a');
/// assert_eq!(subfields[0].value, "The Odyssey");
/// assert_eq!(subfields[1].code, 'b');
/// assert_eq!(subfields[1].value, "an epic poem");
/// ```
#[must_use]
pub fn split_subfields(content: &str) -> Subfields {
    let mut subfields = Subfields::new();
    let marks: Vec<usize> = DELIMITER.find_iter(content).map(|m| m.start()).collect();

    for (i, &start) in marks.iter().enumerate() {
        // The marker is '$' plus one ASCII code character.
        let code = content[start + 1..]
            .chars()
            .next()
            .unwrap_or_default();
        let value_start = start + 2;
        let value_end = marks.get(i + 1).copied().unwrap_or(content.len());
        let value = content[value_start..value_end].trim().to_string();
        subfields.push(Subfield { code, value });
    }

    subfields
}

/// Return the first non-empty value for a subfield code, if any.
#[must_use]
pub fn first_value(subfields: &[Subfield], code: char) -> Option<&str> {
    subfields
        .iter()
        .find(|s| s.code == code && !s.value.is_empty())
        .map(|s| s.value.as_str())
}

/// Iterate over every non-empty value for a subfield code, in order of
/// appearance.
pub fn values_of<'a>(subfields: &'a [Subfield], code: char) -> impl Iterator<Item = &'a str> {
    subfields
        .iter()
        .filter(move |s| s.code == code && !s.value.is_empty())
        .map(|s| s.value.as_str())
}

/// Returns `true` if the content carries a non-empty value for the code.
#[must_use]
pub fn has_code(content: &str, code: char) -> bool {
    let subfields = split_subfields(content);
    first_value(&subfields, code).is_some()
}
