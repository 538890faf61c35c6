//! Template-driven field extraction.
//!
//! Applies every entry of [`crate::template::TEMPLATES`] against every
//! normalized line whose tag matches, building up an [`ExtractedRecord`]:
//! an insertion-ordered map from output field name to either a scalar value
//! or an accumulated sequence.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ParseWarning;
use crate::line::SourceLine;
use crate::subfield::{first_value, split_subfields, values_of};
use crate::template::{FieldTemplate, TEMPLATES};

/// A scalar value extracted for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Trimmed text, used when the template has no transform.
    Text(String),
    /// Numeric value produced by a template transform.
    Number(f64),
}

impl FieldValue {
    /// The text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }

    /// The numeric content, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    /// Render the value as text. Whole numbers render without a decimal
    /// point.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{n:.0}")
                } else {
                    format!("{n}")
                }
            }
        }
    }
}

/// Either a scalar value or an accumulated sequence for one output field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Slot {
    /// Value of a non-repeatable template; later occurrences overwrite.
    Single(FieldValue),
    /// Values of a repeatable template, in encounter order.
    Many(Vec<FieldValue>),
}

/// Intermediate record: output field name to extracted value(s), in
/// first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedRecord {
    fields: IndexMap<&'static str, Slot>,
}

impl ExtractedRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        ExtractedRecord {
            fields: IndexMap::new(),
        }
    }

    /// The slot for a field, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Slot> {
        self.fields.get(field)
    }

    /// The scalar value for a field, if present.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        match self.fields.get(field) {
            Some(Slot::Single(value)) => Some(value),
            _ => None,
        }
    }

    /// The scalar text for a field, if present and textual.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.value(field).and_then(FieldValue::as_text)
    }

    /// The accumulated sequence for a field, if present.
    #[must_use]
    pub fn many(&self, field: &str) -> Option<&[FieldValue]> {
        match self.fields.get(field) {
            Some(Slot::Many(values)) => Some(values),
            _ => None,
        }
    }

    /// Set (or overwrite) a field's scalar value.
    pub fn set(&mut self, field: &'static str, value: FieldValue) {
        self.fields.insert(field, Slot::Single(value));
    }

    /// Append to a field's sequence, creating it on first occurrence.
    pub fn push(&mut self, field: &'static str, value: FieldValue) {
        match self.fields.entry(field) {
            Entry::Occupied(mut entry) => match entry.get_mut() {
                Slot::Many(values) => values.push(value),
                other => *other = Slot::Single(value),
            },
            Entry::Vacant(entry) => {
                entry.insert(Slot::Many(vec![value]));
            }
        }
    }

    /// Remove a field, returning its slot.
    pub fn remove(&mut self, field: &str) -> Option<Slot> {
        self.fields.shift_remove(field)
    }

    /// Remove a field and return its values rendered as text.
    ///
    /// A scalar becomes a one-element sequence; an absent field an empty one.
    pub fn take_rendered(&mut self, field: &str) -> Vec<String> {
        match self.remove(field) {
            Some(Slot::Many(values)) => values.iter().map(FieldValue::render).collect(),
            Some(Slot::Single(value)) => vec![value.render()],
            None => Vec::new(),
        }
    }

    /// Number of populated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over populated fields in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Slot)> {
        self.fields.iter().map(|(field, slot)| (*field, slot))
    }
}

/// Apply the field-mapping table to the normalized line sequence.
///
/// For each line, the content is split into subfields once; every template
/// whose tag matches then looks up its code. A `multiple` template consumes
/// every non-empty occurrence of its code in the line, so repeats that
/// continuation merging folded into one content string still accumulate. A
/// scalar template takes the first occurrence per line, with a later line
/// overwriting an earlier one. Transform failures degrade to "field absent"
/// and are reported as [`ParseWarning::UnusableValue`].
#[must_use]
pub fn extract(lines: &[SourceLine]) -> (ExtractedRecord, Vec<ParseWarning>) {
    let mut record = ExtractedRecord::new();
    let mut warnings = Vec::new();

    for line in lines {
        let subfields = split_subfields(&line.content);
        if subfields.is_empty() {
            continue;
        }
        for template in TEMPLATES.iter().filter(|t| t.tag == line.tag) {
            if template.multiple {
                for raw in values_of(&subfields, template.code) {
                    if let Some(value) = coerce(template, raw, &mut warnings) {
                        record.push(template.field, value);
                    }
                }
            } else if let Some(raw) = first_value(&subfields, template.code) {
                if let Some(value) = coerce(template, raw, &mut warnings) {
                    record.set(template.field, value);
                }
            }
        }
    }

    (record, warnings)
}

/// Apply a template's transform, if any, to one raw occurrence.
fn coerce(
    template: &FieldTemplate,
    raw: &str,
    warnings: &mut Vec<ParseWarning>,
) -> Option<FieldValue> {
    match template.transform {
        Some(transform) => {
            let value = transform(raw);
            if value.is_none() {
                warnings.push(ParseWarning::UnusableValue {
                    field: template.field,
                    value: raw.to_string(),
                });
            }
            value
        }
        None => Some(FieldValue::Text(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::normalize;
    use crate::template::fields;

    fn extract_raw(raw: &str) -> (ExtractedRecord, Vec<ParseWarning>) {
        let (lines, _) = normalize(raw);
        extract(&lines)
    }

    #[test]
    fn test_scalar_extraction() {
        let (record, warnings) = extract_raw("020\t\t\t$a ISBN123");
        assert!(warnings.is_empty());
        assert_eq!(record.text(fields::ISBN), Some("ISBN123"));
    }

    #[test]
    fn test_same_tag_feeds_multiple_templates() {
        let (record, _) = extract_raw("245\t1\t0\t$a The Odyssey$b an epic poem$c Homer");
        assert_eq!(record.text(fields::TITLE), Some("The Odyssey"));
        assert_eq!(record.text(fields::SUB_TITLE), Some("an epic poem"));
        assert_eq!(
            record.many(fields::RESPONSIBILITY),
            Some(&[FieldValue::Text("Homer".to_string())][..])
        );
    }

    #[test]
    fn test_multiple_accumulates_in_encounter_order() {
        let raw = "650\t\t\t$a A\n650\t\t\t$a B\n650\t\t\t$a C";
        let (record, _) = extract_raw(raw);
        let terms: Vec<String> = record
            .many(fields::TOPICAL_TERMS)
            .unwrap()
            .iter()
            .map(FieldValue::render)
            .collect();
        assert_eq!(terms, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_repeated_code_in_one_line_accumulates_all() {
        let (record, _) = extract_raw("650\t\t\t$a A$a B");
        let terms: Vec<String> = record
            .many(fields::TOPICAL_TERMS)
            .unwrap()
            .iter()
            .map(FieldValue::render)
            .collect();
        assert_eq!(terms, vec!["A", "B"]);
    }

    #[test]
    fn test_continuation_carrying_fresh_occurrence_accumulates() {
        // The continuation line's `$a` is merged into the 650 field's
        // content; both occurrences must survive extraction.
        let (record, _) = extract_raw("650\t\t\t$a A\n$a B");
        let terms: Vec<String> = record
            .many(fields::TOPICAL_TERMS)
            .unwrap()
            .iter()
            .map(FieldValue::render)
            .collect();
        assert_eq!(terms, vec!["A", "B"]);
    }

    #[test]
    fn test_scalar_last_occurrence_wins() {
        let raw = "250\t\t\t$a First edition\n250\t\t\t$a Second edition";
        let (record, _) = extract_raw(raw);
        assert_eq!(record.text(fields::EDITION), Some("Second edition"));
    }

    #[test]
    fn test_transform_applied() {
        let (record, _) = extract_raw("020\t\t\t$a 9780140449136$c 120000");
        assert_eq!(
            record.value(fields::ESTIMATED_PRICE),
            Some(&FieldValue::Number(120_000.0))
        );
    }

    #[test]
    fn test_transform_failure_warns_and_leaves_field_absent() {
        let (record, warnings) = extract_raw("020\t\t\t$a ISBN123$c free");
        assert_eq!(record.value(fields::ESTIMATED_PRICE), None);
        assert_eq!(
            warnings,
            vec![ParseWarning::UnusableValue {
                field: fields::ESTIMATED_PRICE,
                value: "free".to_string(),
            }]
        );
        // Extraction continues for other fields on the same line.
        assert_eq!(record.text(fields::ISBN), Some("ISBN123"));
    }

    #[test]
    fn test_empty_subfield_is_skipped() {
        let (record, _) = extract_raw("245\t1\t0\t$a $b real subtitle");
        assert_eq!(record.text(fields::TITLE), None);
        assert_eq!(record.text(fields::SUB_TITLE), Some("real subtitle"));
    }

    #[test]
    fn test_unknown_tag_matches_nothing() {
        let (record, warnings) = extract_raw("999\t\t\t$a ignored");
        assert!(record.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_render_whole_number_has_no_decimal_point() {
        assert_eq!(FieldValue::Number(2003.0).render(), "2003");
        assert_eq!(FieldValue::Number(150.5).render(), "150.5");
        assert_eq!(FieldValue::Text("x".into()).render(), "x");
    }

    #[test]
    fn test_take_rendered() {
        let (mut record, _) = extract_raw("653\t\t\t$a one\n653\t\t\t$a two");
        assert_eq!(record.take_rendered(fields::KEYWORDS), vec!["one", "two"]);
        assert!(record.take_rendered(fields::KEYWORDS).is_empty());
    }
}
