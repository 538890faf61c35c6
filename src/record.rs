//! The validated edition record produced by a successful parse.
//!
//! Field names serialize in camelCase to match the downstream
//! edition-creation form schema exactly (`title`, `subTitle`,
//! `publicationYear`, …). Optional fields that were absent or empty in the
//! source are `None` and are omitted from serialized output, never rendered
//! as empty strings.

use serde::{Deserialize, Serialize};

/// A validated, flat book-edition record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionRecord {
    /// Title statement. The only required field.
    pub title: String,
    /// Remainder of title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    /// Statement(s) of responsibility, comma-joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsibility: Option<String>,
    /// Edition statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    /// Numeric edition designation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition_number: Option<u32>,
    /// Language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Language of the original work.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_language: Option<String>,
    /// Summary note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Publication year; never later than the current calendar year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    /// Publisher name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Place of publication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_place: Option<String>,
    /// Classification number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_number: Option<String>,
    /// Cutter/item number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutter_number: Option<String>,
    /// ISBN, trimmed; format-checked only loosely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// EAN or other standard identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ean: Option<String>,
    /// Estimated price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<f64>,
    /// Page count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    /// Other physical details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_details: Option<String>,
    /// Dimensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    /// Accompanying material.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accompanying_material: Option<String>,
    /// Genre/form terms, comma-joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<String>,
    /// General note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_note: Option<String>,
    /// Bibliography note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bibliographical_note: Option<String>,
    /// Topical subject terms (keywords first), comma-joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topical_terms: Option<String>,
    /// Added authors with their roles, comma-joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_authors: Option<String>,
    /// Main author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl EditionRecord {
    /// Serialize the record to a JSON value with the downstream schema's
    /// field names.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_names_match_downstream_schema() {
        let record = EditionRecord {
            title: "The Odyssey".to_string(),
            sub_title: Some("an epic poem".to_string()),
            publication_year: Some(2003),
            origin_language: Some("grc".to_string()),
            ..EditionRecord::default()
        };
        let json = record.to_json();
        assert_eq!(json["title"], "The Odyssey");
        assert_eq!(json["subTitle"], "an epic poem");
        assert_eq!(json["publicationYear"], 2003);
        assert_eq!(json["originLanguage"], "grc");
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let record = EditionRecord {
            title: "Bare".to_string(),
            ..EditionRecord::default()
        };
        let json = record.to_json();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("title"));
        assert!(!object.contains_key("isbn"));
    }

    #[test]
    fn test_roundtrip_through_json() {
        let record = EditionRecord {
            title: "Truyện Kiều".to_string(),
            page_count: Some(235),
            estimated_price: Some(150_000.0),
            ..EditionRecord::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: EditionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
