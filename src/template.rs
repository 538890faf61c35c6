//! Declarative mapping from MARC21 tags and subfields to output fields.
//!
//! The whole extraction step is driven by [`TEMPLATES`], an immutable
//! module-level table. Each entry names an output field, the tag and
//! subfield code it is read from, whether occurrences accumulate into a
//! sequence, and an optional value transform. Several entries may reference
//! the same tag; each pulls a different subfield code out of the same
//! physical line.

use crate::extract::FieldValue;

/// Output schema field names.
///
/// These match the downstream edition-form schema exactly; the serialized
/// record uses them verbatim.
pub mod fields {
    /// Title statement, 245 `$a`.
    pub const TITLE: &str = "title";
    /// Remainder of title, 245 `$b`.
    pub const SUB_TITLE: &str = "subTitle";
    /// Statement of responsibility, 245 `$c`.
    pub const RESPONSIBILITY: &str = "responsibility";
    /// Edition statement, 250 `$a`.
    pub const EDITION: &str = "edition";
    /// Numeric edition designation, 250 `$b`.
    pub const EDITION_NUMBER: &str = "editionNumber";
    /// Language code, 041 `$a`.
    pub const LANGUAGE: &str = "language";
    /// Language of the original, 041 `$h`.
    pub const ORIGIN_LANGUAGE: &str = "originLanguage";
    /// Summary note, 520 `$a`.
    pub const SUMMARY: &str = "summary";
    /// Publication year, 260 `$c`.
    pub const PUBLICATION_YEAR: &str = "publicationYear";
    /// Publisher name, 260 `$b`.
    pub const PUBLISHER: &str = "publisher";
    /// Place of publication, 260 `$a`.
    pub const PUBLICATION_PLACE: &str = "publicationPlace";
    /// Classification number, 082 `$a`.
    pub const CLASSIFICATION_NUMBER: &str = "classificationNumber";
    /// Cutter/item number, 082 `$b`.
    pub const CUTTER_NUMBER: &str = "cutterNumber";
    /// ISBN, 020 `$a`.
    pub const ISBN: &str = "isbn";
    /// EAN/other standard identifier, 024 `$a`.
    pub const EAN: &str = "ean";
    /// Estimated price, 020 `$c`.
    pub const ESTIMATED_PRICE: &str = "estimatedPrice";
    /// Page count, 300 `$a`.
    pub const PAGE_COUNT: &str = "pageCount";
    /// Other physical details, 300 `$b`.
    pub const PHYSICAL_DETAILS: &str = "physicalDetails";
    /// Dimensions, 300 `$c`.
    pub const DIMENSIONS: &str = "dimensions";
    /// Accompanying material, 300 `$e`.
    pub const ACCOMPANYING_MATERIAL: &str = "accompanyingMaterial";
    /// Genre/form terms, 655 `$a`, repeatable.
    pub const GENRES: &str = "genres";
    /// General note, 500 `$a`.
    pub const GENERAL_NOTE: &str = "generalNote";
    /// Bibliography note, 504 `$a`.
    pub const BIBLIOGRAPHICAL_NOTE: &str = "bibliographicalNote";
    /// Topical subject terms, 650 `$a`, repeatable.
    pub const TOPICAL_TERMS: &str = "topicalTerms";
    /// Uncontrolled index terms, 653 `$a`, repeatable; merged into
    /// [`TOPICAL_TERMS`] by post-processing.
    pub const KEYWORDS: &str = "keywords";
    /// Added author names, 700 `$a`, repeatable.
    pub const ADDITIONAL_AUTHORS: &str = "additionalAuthors";
    /// Added author relator roles, 700 `$e`, repeatable; consumed by
    /// post-processing when pairing with [`ADDITIONAL_AUTHORS`].
    pub const ADDITIONAL_AUTHOR_CONTRIBUTIONS: &str = "additionalAuthorContributions";
    /// Main author, 100 `$a`.
    pub const AUTHOR: &str = "author";
}

/// A value transform applied to the raw trimmed subfield text.
///
/// Transforms are pure functions; an input they cannot coerce yields `None`
/// ("absent"), never a panic and never a false zero.
pub type Transform = fn(&str) -> Option<FieldValue>;

/// One entry of the field-mapping table.
#[derive(Debug, Clone, Copy)]
pub struct FieldTemplate {
    /// Output schema field name.
    pub field: &'static str,
    /// MARC tag the value is read from.
    pub tag: &'static str,
    /// Subfield code within the tag's content.
    pub code: char,
    /// Whether every occurrence accumulates into an ordered sequence.
    /// When `false`, a later occurrence overwrites an earlier one.
    pub multiple: bool,
    /// Optional coercion applied to the raw value.
    pub transform: Option<Transform>,
}

const fn scalar(field: &'static str, tag: &'static str, code: char) -> FieldTemplate {
    FieldTemplate {
        field,
        tag,
        code,
        multiple: false,
        transform: None,
    }
}

const fn repeated(field: &'static str, tag: &'static str, code: char) -> FieldTemplate {
    FieldTemplate {
        field,
        tag,
        code,
        multiple: true,
        transform: None,
    }
}

const fn coerced(
    field: &'static str,
    tag: &'static str,
    code: char,
    transform: Transform,
) -> FieldTemplate {
    FieldTemplate {
        field,
        tag,
        code,
        multiple: false,
        transform: Some(transform),
    }
}

/// The complete field-mapping table.
///
/// Plain configuration data: immutable, applied against every normalized
/// line whose tag matches.
pub const TEMPLATES: &[FieldTemplate] = &[
    scalar(fields::TITLE, "245", 'a'),
    scalar(fields::SUB_TITLE, "245", 'b'),
    repeated(fields::RESPONSIBILITY, "245", 'c'),
    scalar(fields::EDITION, "250", 'a'),
    coerced(fields::EDITION_NUMBER, "250", 'b', transforms::integer),
    scalar(fields::LANGUAGE, "041", 'a'),
    scalar(fields::ORIGIN_LANGUAGE, "041", 'h'),
    scalar(fields::SUMMARY, "520", 'a'),
    scalar(fields::PUBLICATION_PLACE, "260", 'a'),
    scalar(fields::PUBLISHER, "260", 'b'),
    coerced(fields::PUBLICATION_YEAR, "260", 'c', transforms::year),
    scalar(fields::CLASSIFICATION_NUMBER, "082", 'a'),
    scalar(fields::CUTTER_NUMBER, "082", 'b'),
    scalar(fields::ISBN, "020", 'a'),
    coerced(fields::ESTIMATED_PRICE, "020", 'c', transforms::price),
    scalar(fields::EAN, "024", 'a'),
    coerced(fields::PAGE_COUNT, "300", 'a', transforms::page_count),
    scalar(fields::PHYSICAL_DETAILS, "300", 'b'),
    scalar(fields::DIMENSIONS, "300", 'c'),
    scalar(fields::ACCOMPANYING_MATERIAL, "300", 'e'),
    scalar(fields::GENERAL_NOTE, "500", 'a'),
    scalar(fields::BIBLIOGRAPHICAL_NOTE, "504", 'a'),
    repeated(fields::TOPICAL_TERMS, "650", 'a'),
    repeated(fields::KEYWORDS, "653", 'a'),
    repeated(fields::GENRES, "655", 'a'),
    repeated(fields::ADDITIONAL_AUTHORS, "700", 'a'),
    repeated(fields::ADDITIONAL_AUTHOR_CONTRIBUTIONS, "700", 'e'),
    scalar(fields::AUTHOR, "100", 'a'),
];

/// Value transforms referenced by [`TEMPLATES`].
pub mod transforms {
    use crate::extract::FieldValue;

    /// Parse a price: strip a trailing `đ` currency marker, convert a comma
    /// decimal separator to a dot, then parse as a floating value.
    ///
    /// `"150,000đ"` becomes `150.0`; `"120000"` becomes `120000.0`.
    #[must_use]
    pub fn price(raw: &str) -> Option<FieldValue> {
        let cleaned = raw.trim().trim_end_matches('đ').trim().replace(',', ".");
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(FieldValue::Number)
    }

    /// Parse a page count: strip a trailing `tr.` / `tr` unit abbreviation,
    /// then parse as an integer.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn page_count(raw: &str) -> Option<FieldValue> {
        let cleaned = raw
            .trim()
            .trim_end_matches("tr.")
            .trim_end_matches("tr")
            .trim();
        cleaned
            .parse::<u64>()
            .ok()
            .map(|n| FieldValue::Number(n as f64))
    }

    /// Parse a publication year: the first run of four consecutive digits,
    /// so `"c2003."` and `"2003"` both yield `2003`.
    #[must_use]
    pub fn year(raw: &str) -> Option<FieldValue> {
        let mut digits = String::new();
        for ch in raw.chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                if digits.len() == 4 {
                    return digits.parse::<u16>().ok().map(|y| FieldValue::Number(f64::from(y)));
                }
            } else {
                digits.clear();
            }
        }
        None
    }

    /// Parse an integer from the leading digit run, so `"2nd"` yields `2`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn integer(raw: &str) -> Option<FieldValue> {
        let digits: String = raw
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            return None;
        }
        digits
            .parse::<u64>()
            .ok()
            .map(|n| FieldValue::Number(n as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_field_is_unique() {
        for (i, a) in TEMPLATES.iter().enumerate() {
            for b in &TEMPLATES[i + 1..] {
                assert_ne!(a.field, b.field, "duplicate template for {}", a.field);
            }
        }
    }

    #[test]
    fn test_shared_tags_extract_distinct_codes() {
        let tag_245: Vec<_> = TEMPLATES.iter().filter(|t| t.tag == "245").collect();
        assert_eq!(tag_245.len(), 3);
        let codes: Vec<char> = tag_245.iter().map(|t| t.code).collect();
        assert!(codes.contains(&'a') && codes.contains(&'b') && codes.contains(&'c'));
    }

    #[test]
    fn test_price_strips_currency_and_comma() {
        assert_eq!(
            transforms::price("150,000đ"),
            Some(FieldValue::Number(150.0))
        );
        assert_eq!(
            transforms::price("120000"),
            Some(FieldValue::Number(120_000.0))
        );
        assert_eq!(transforms::price("12000 đ"), Some(FieldValue::Number(12_000.0)));
    }

    #[test]
    fn test_price_unusable_is_absent() {
        assert_eq!(transforms::price("free"), None);
        assert_eq!(transforms::price(""), None);
    }

    #[test]
    fn test_page_count_strips_unit() {
        assert_eq!(
            transforms::page_count("235 tr."),
            Some(FieldValue::Number(235.0))
        );
        assert_eq!(
            transforms::page_count("340tr"),
            Some(FieldValue::Number(340.0))
        );
        assert_eq!(
            transforms::page_count("412"),
            Some(FieldValue::Number(412.0))
        );
    }

    #[test]
    fn test_page_count_unusable_is_absent() {
        assert_eq!(transforms::page_count("xii, 340 tr."), None);
        assert_eq!(transforms::page_count("tr."), None);
    }

    #[test]
    fn test_year_finds_first_four_digit_run() {
        assert_eq!(transforms::year("2003"), Some(FieldValue::Number(2003.0)));
        assert_eq!(transforms::year("c2003."), Some(FieldValue::Number(2003.0)));
        assert_eq!(
            transforms::year("[s.l.], 1999"),
            Some(FieldValue::Number(1999.0))
        );
        assert_eq!(transforms::year("n.d."), None);
        assert_eq!(transforms::year("99"), None);
    }

    #[test]
    fn test_integer_takes_leading_digits() {
        assert_eq!(transforms::integer("2nd"), Some(FieldValue::Number(2.0)));
        assert_eq!(transforms::integer("15"), Some(FieldValue::Number(15.0)));
        assert_eq!(transforms::integer("second"), None);
    }
}
