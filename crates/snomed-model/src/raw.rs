//! Raw record shape as it appears in the baseline file and the overlay blob.
//!
//! Both sources are JSON arrays of loosely typed objects. Every field may be
//! missing, `null`, or carry a non-string value, so the raw shape keeps the
//! untouched [`serde_json::Value`] and leaves coercion to [`crate::normalize`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON key of the patient registration number.
pub const KEY_REGISTRATION_ID: &str = "No_Registrasi";
/// JSON key of the record category.
pub const KEY_CATEGORY: &str = "Kategori";
/// JSON key of the free-text excerpt.
pub const KEY_ORIGINAL_TEXT: &str = "Teks_Asli_Resume";
/// JSON key of the SNOMED CT code.
pub const KEY_CODE: &str = "Kode_SNOMED";
/// JSON key of the fully specified name of the code.
pub const KEY_DISPLAY_NAME: &str = "FSN_SNOMED";

/// A record before normalization.
///
/// Also the payload of overlay mutations: it carries the five user-facing
/// fields and none of the derived lowercase shadows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(
        rename = "No_Registrasi",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_id: Option<Value>,

    #[serde(rename = "Kategori", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,

    #[serde(
        rename = "Teks_Asli_Resume",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_text: Option<Value>,

    #[serde(
        rename = "Kode_SNOMED",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Option<Value>,

    #[serde(rename = "FSN_SNOMED", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<Value>,
}

impl RawRecord {
    /// Build a raw record from plain text fields, as entered by a user.
    pub fn new(
        registration_id: impl Into<String>,
        category: impl Into<String>,
        original_text: impl Into<String>,
        code: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            registration_id: Some(Value::String(registration_id.into())),
            category: Some(Value::String(category.into())),
            original_text: Some(Value::String(original_text.into())),
            code: Some(Value::String(code.into())),
            display_name: Some(Value::String(display_name.into())),
        }
    }

    /// Interpret an arbitrary JSON array element as a raw record.
    ///
    /// Objects keep the recognized keys and drop the rest. Anything that is
    /// not an object has none of the keys and yields an all-empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// Parse a JSON array body into raw records.
///
/// Returns `None` when the top level is not an array.
pub fn raw_records_from_value(value: Value) -> Option<Vec<RawRecord>> {
    match value {
        Value::Array(items) => Some(items.into_iter().map(RawRecord::from_value).collect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_keeps_known_keys() {
        let raw = RawRecord::from_value(json!({
            "No_Registrasi": 42,
            "Kategori": "person",
            "Unrelated": true,
        }));
        assert_eq!(raw.registration_id, Some(json!(42)));
        assert_eq!(raw.category, Some(json!("person")));
        assert!(raw.code.is_none());
    }

    #[test]
    fn from_value_non_object_is_empty() {
        assert_eq!(RawRecord::from_value(json!(17)), RawRecord::default());
        assert_eq!(RawRecord::from_value(json!("x")), RawRecord::default());
    }

    #[test]
    fn non_array_is_rejected() {
        assert!(raw_records_from_value(json!({"a": 1})).is_none());
        assert_eq!(raw_records_from_value(json!([])), Some(vec![]));
    }

    #[test]
    fn serializes_with_source_keys() {
        let raw = RawRecord::new("9", "person", "laki-laki", "339947000", "Male (finding)");
        let text = serde_json::to_string(&raw).expect("serialize");
        assert_eq!(
            text,
            r#"{"No_Registrasi":"9","Kategori":"person","Teks_Asli_Resume":"laki-laki","Kode_SNOMED":"339947000","FSN_SNOMED":"Male (finding)"}"#
        );
    }
}
