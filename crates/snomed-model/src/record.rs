use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::{Number, Value};

use crate::raw::{
    KEY_CATEGORY, KEY_CODE, KEY_DISPLAY_NAME, KEY_ORIGINAL_TEXT, KEY_REGISTRATION_ID, RawRecord,
};

/// Marker written for a missing registration id or category.
pub const MISSING_MARKER: &str = "N/A";

/// A normalized clinical coding record.
///
/// Immutable once built. The lowercase shadows of the display name and the
/// original text are computed at construction and used for matching only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "No_Registrasi")]
    registration_id: String,
    #[serde(rename = "Kategori")]
    category: String,
    #[serde(rename = "Teks_Asli_Resume")]
    original_text: String,
    #[serde(rename = "Kode_SNOMED")]
    code: String,
    #[serde(rename = "FSN_SNOMED")]
    display_name: String,
    #[serde(skip)]
    display_name_lower: String,
    #[serde(skip)]
    original_text_lower: String,
}

impl Record {
    /// Build a record from already-coerced text fields.
    pub fn new(
        registration_id: impl Into<String>,
        category: impl Into<String>,
        original_text: impl Into<String>,
        code: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        let original_text = original_text.into();
        let display_name = display_name.into();
        Self {
            registration_id: registration_id.into(),
            category: category.into(),
            display_name_lower: display_name.to_lowercase(),
            original_text_lower: original_text.to_lowercase(),
            original_text,
            code: code.into(),
            display_name,
        }
    }

    pub fn registration_id(&self) -> &str {
        &self.registration_id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn display_name_lower(&self) -> &str {
        &self.display_name_lower
    }

    pub fn original_text_lower(&self) -> &str {
        &self.original_text_lower
    }

    /// Value of a single user-facing field.
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::RegistrationId => &self.registration_id,
            RecordField::Category => &self.category,
            RecordField::OriginalText => &self.original_text,
            RecordField::Code => &self.code,
            RecordField::DisplayName => &self.display_name,
        }
    }

    /// Lowercase value of a field, reusing the precomputed shadows.
    pub fn field_lower(&self, field: RecordField) -> Cow<'_, str> {
        match field {
            RecordField::DisplayName => Cow::Borrowed(&self.display_name_lower),
            RecordField::OriginalText => Cow::Borrowed(&self.original_text_lower),
            other => Cow::Owned(self.field(other).to_lowercase()),
        }
    }

    /// True when the display name or the original text contains `needle`.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.display_name_lower.contains(needle) || self.original_text_lower.contains(needle)
    }

    /// True when any user-facing field contains `needle`.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_any_field(&self, needle: &str) -> bool {
        RecordField::ALL
            .iter()
            .any(|field| self.field_lower(*field).contains(needle))
    }
}

/// Normalize a raw record.
///
/// Total over any input. Falsy values (missing, `null`, `""`, `false`, zero)
/// become `"N/A"` for the registration id and the category and an empty
/// string for the other fields.
pub fn normalize(raw: &RawRecord) -> Record {
    Record::new(
        coerce_text(raw.registration_id.as_ref(), MISSING_MARKER),
        coerce_text(raw.category.as_ref(), MISSING_MARKER),
        coerce_text(raw.original_text.as_ref(), ""),
        coerce_text(raw.code.as_ref(), ""),
        coerce_text(raw.display_name.as_ref(), ""),
    )
}

fn coerce_text(value: Option<&Value>, fallback: &str) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => fallback.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::Number(number)) => {
            if number.as_f64() == Some(0.0) {
                fallback.to_string()
            } else {
                number_text(number)
            }
        }
        Some(Value::String(text)) if text.is_empty() => fallback.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Number text as a JavaScript engine prints it: integral floats without a
/// fraction, exponent notation from `1e21` up and below `1e-6`.
fn number_text(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    let Some(value) = number.as_f64() else {
        return number.to_string();
    };
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{value:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        }
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// User-facing record fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    RegistrationId,
    Category,
    OriginalText,
    Code,
    DisplayName,
}

impl RecordField {
    pub const ALL: [RecordField; 5] = [
        RecordField::RegistrationId,
        RecordField::Category,
        RecordField::OriginalText,
        RecordField::Code,
        RecordField::DisplayName,
    ];

    /// JSON key used in the data files.
    pub const fn key(self) -> &'static str {
        match self {
            Self::RegistrationId => KEY_REGISTRATION_ID,
            Self::Category => KEY_CATEGORY,
            Self::OriginalText => KEY_ORIGINAL_TEXT,
            Self::Code => KEY_CODE,
            Self::DisplayName => KEY_DISPLAY_NAME,
        }
    }

    /// Column label for tables.
    pub const fn label(self) -> &'static str {
        match self {
            Self::RegistrationId => "Registration",
            Self::Category => "Category",
            Self::OriginalText => "Original text",
            Self::Code => "SNOMED CT code",
            Self::DisplayName => "FSN",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadows_follow_fields() {
        let record = Record::new("1", "finding", "Nyeri DADA", "29857009", "Chest Pain");
        assert_eq!(record.display_name_lower(), "chest pain");
        assert_eq!(record.original_text_lower(), "nyeri dada");
        assert!(record.matches_text("dada"));
        assert!(!record.matches_text("DADA"));
    }
}
