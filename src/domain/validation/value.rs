//! Submitted field values.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A value submitted for one element.
///
/// JSON strings, booleans and numbers map onto the three variants. JSON
/// `null` is treated as "no value" by [`deserialize_submission_data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Number(f64),
}

impl FieldValue {
    /// Returns true if the value counts as "not filled in".
    ///
    /// Blank strings and `false` are empty. Numbers never are.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Bool(b) => !b,
            FieldValue::Number(_) => false,
        }
    }

    /// Returns the string if this is a non-empty text value.
    pub fn as_non_empty_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// Submitted values keyed by element id. A missing key means no value.
pub type SubmissionData = BTreeMap<String, FieldValue>;

/// Deserializes a submission data object, dropping `null` entries.
pub fn deserialize_submission_data<'de, D>(deserializer: D) -> Result<SubmissionData, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Option<FieldValue>> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "deserialize_submission_data")]
        data: SubmissionData,
    }

    #[test]
    fn blank_text_and_false_are_empty() {
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::from("   \t").is_empty());
        assert!(FieldValue::from(false).is_empty());
    }

    #[test]
    fn numbers_and_true_are_not_empty() {
        assert!(!FieldValue::from(0.0).is_empty());
        assert!(!FieldValue::from(true).is_empty());
        assert!(!FieldValue::from("x").is_empty());
    }

    #[test]
    fn whitespace_text_is_still_non_empty_for_constraints() {
        assert_eq!(FieldValue::from(" ").as_non_empty_text(), Some(" "));
        assert_eq!(FieldValue::from("").as_non_empty_text(), None);
        assert_eq!(FieldValue::from(true).as_non_empty_text(), None);
    }

    #[test]
    fn deserializes_mixed_values_and_drops_nulls() {
        let json = r#"{"data": {"name": "Ada", "agree": true, "age": 36, "note": null}}"#;
        let wrapper: Wrapper = serde_json::from_str(json).unwrap();

        assert_eq!(wrapper.data.len(), 3);
        assert_eq!(wrapper.data["name"], FieldValue::Text("Ada".to_string()));
        assert_eq!(wrapper.data["agree"], FieldValue::Bool(true));
        assert_eq!(wrapper.data["age"], FieldValue::Number(36.0));
        assert!(!wrapper.data.contains_key("note"));
    }

    #[test]
    fn rejects_nested_objects() {
        let json = r#"{"data": {"name": {"first": "Ada"}}}"#;
        assert!(serde_json::from_str::<Wrapper>(json).is_err());
    }
}
