//! Field recombination rules applied between extraction and validation.
//!
//! A fixed set of rules rewrites the extracted record in place:
//!
//! - `responsibility` and `genres`: the accumulated sequence is joined with
//!   `,` into a single scalar;
//! - `additionalAuthors`: each author name is paired positionally with the
//!   contribution at the same index; the [`NOT_MENTIONED`] sentinel keeps
//!   the bare name, any other role yields `name - role`; the result is
//!   joined with `,` and the contributions sequence is consumed;
//! - `topicalTerms`: the `keywords` sequence is prepended to the topical
//!   terms and the whole joined with `,`;
//! - every other field passes through unchanged, absent fields stay absent.

use crate::error::ParseWarning;
use crate::extract::{ExtractedRecord, FieldValue};
use crate::line::NOT_MENTIONED;
use crate::template::fields;

/// Apply all recombination rules. Pure except for appending to `warnings`
/// when the author/contribution sequences have diverged in length.
#[must_use]
pub fn postprocess(
    mut record: ExtractedRecord,
    warnings: &mut Vec<ParseWarning>,
) -> ExtractedRecord {
    join_sequence(&mut record, fields::RESPONSIBILITY);
    join_sequence(&mut record, fields::GENRES);
    pair_additional_authors(&mut record, warnings);
    merge_topical_terms(&mut record);
    record
}

/// Collapse a field's sequence into one comma-joined scalar. An absent
/// field stays absent.
fn join_sequence(record: &mut ExtractedRecord, field: &'static str) {
    if record.get(field).is_none() {
        return;
    }
    let values = record.take_rendered(field);
    if !values.is_empty() {
        record.set(field, FieldValue::Text(values.join(",")));
    }
}

/// Pair author names with contribution roles by index and join the result.
///
/// The synthetic-role insertion during normalization guarantees one
/// contribution per author; if the lengths still diverge, pairing proceeds
/// best-effort by index and a [`ParseWarning::ContributionMismatch`] is
/// raised rather than silently truncating.
fn pair_additional_authors(record: &mut ExtractedRecord, warnings: &mut Vec<ParseWarning>) {
    let names = record.take_rendered(fields::ADDITIONAL_AUTHORS);
    let roles = record.take_rendered(fields::ADDITIONAL_AUTHOR_CONTRIBUTIONS);

    if names.len() != roles.len() && !(names.is_empty() && roles.is_empty()) {
        warnings.push(ParseWarning::ContributionMismatch {
            authors: names.len(),
            contributions: roles.len(),
        });
    }
    if names.is_empty() {
        return;
    }

    let joined = names
        .iter()
        .enumerate()
        .map(|(i, name)| match roles.get(i) {
            Some(role) if role != NOT_MENTIONED => format!("{name} - {role}"),
            _ => name.clone(),
        })
        .collect::<Vec<_>>()
        .join(",");
    record.set(fields::ADDITIONAL_AUTHORS, FieldValue::Text(joined));
}

/// Concatenate keywords and topical terms, keywords first, into one
/// comma-joined scalar under `topicalTerms`.
fn merge_topical_terms(record: &mut ExtractedRecord) {
    let mut terms = record.take_rendered(fields::KEYWORDS);
    terms.extend(record.take_rendered(fields::TOPICAL_TERMS));
    if !terms.is_empty() {
        record.set(fields::TOPICAL_TERMS, FieldValue::Text(terms.join(",")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::line::normalize;

    fn process(raw: &str) -> (ExtractedRecord, Vec<ParseWarning>) {
        let (lines, mut warnings) = normalize(raw);
        let (record, extract_warnings) = extract(&lines);
        warnings.extend(extract_warnings);
        let record = postprocess(record, &mut warnings);
        (record, warnings)
    }

    #[test]
    fn test_genres_joined_with_comma() {
        let (record, _) = process("655\t\t\t$a Poetry\n655\t\t\t$a Epic");
        assert_eq!(record.text(fields::GENRES), Some("Poetry,Epic"));
    }

    #[test]
    fn test_responsibility_joined() {
        let (record, _) = process("245\t1\t0\t$a T$c Homer$c trans. Fagles");
        assert_eq!(
            record.text(fields::RESPONSIBILITY),
            Some("Homer,trans. Fagles")
        );
    }

    #[test]
    fn test_author_with_explicit_role() {
        let (record, warnings) = process("700\t1\t#\t$a Smith\n700\t1\t#\t$e editor");
        assert!(warnings.is_empty());
        assert_eq!(
            record.text(fields::ADDITIONAL_AUTHORS),
            Some("Smith - editor")
        );
        assert!(record
            .get(fields::ADDITIONAL_AUTHOR_CONTRIBUTIONS)
            .is_none());
    }

    #[test]
    fn test_author_with_synthetic_role_keeps_bare_name() {
        let (record, warnings) = process("700\t1\t#\t$a\tSmith");
        assert!(warnings.is_empty());
        assert_eq!(record.text(fields::ADDITIONAL_AUTHORS), Some("Smith"));
    }

    #[test]
    fn test_mixed_authors_pair_by_position() {
        let raw = "700\t1\t#\t$a Smith\n700\t1\t#\t$e editor\n700\t1\t#\t$a Jones";
        let (record, warnings) = process(raw);
        assert!(warnings.is_empty());
        assert_eq!(
            record.text(fields::ADDITIONAL_AUTHORS),
            Some("Smith - editor,Jones")
        );
    }

    #[test]
    fn test_keywords_prepended_to_topical_terms() {
        let raw = "653\t\t\t$a kw1\n650\t\t\t$a term1\n650\t\t\t$a term2\n653\t\t\t$a kw2";
        let (record, _) = process(raw);
        assert_eq!(
            record.text(fields::TOPICAL_TERMS),
            Some("kw1,kw2,term1,term2")
        );
        assert!(record.get(fields::KEYWORDS).is_none());
    }

    #[test]
    fn test_keywords_alone_become_topical_terms() {
        let (record, _) = process("653\t\t\t$a only keyword");
        assert_eq!(record.text(fields::TOPICAL_TERMS), Some("only keyword"));
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let (record, _) = process("245\t1\t0\t$a Title only");
        assert!(record.get(fields::GENRES).is_none());
        assert!(record.get(fields::TOPICAL_TERMS).is_none());
        assert!(record.get(fields::ADDITIONAL_AUTHORS).is_none());
    }

    #[test]
    fn test_length_mismatch_warns_and_pairs_best_effort() {
        // A bare role line with no preceding $a: one role, zero names.
        let (record, warnings) = process("700\t1\t#\t$e editor");
        assert_eq!(
            warnings,
            vec![ParseWarning::ContributionMismatch {
                authors: 0,
                contributions: 1,
            }]
        );
        assert!(record.get(fields::ADDITIONAL_AUTHORS).is_none());
    }
}
