//! Editable mirror of a pack record.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::records::ResourceRecord;

/// Interpret a loosely typed flag (`"1"`, `"on"`, `true`, `0`, ...).
pub fn parse_boolish(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn boolish_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_f64().map(|n| n != 0.0),
        Value::String(text) => parse_boolish(text),
        _ => None,
    }
}

/// Benefits arrive either as a JSON array or as a JSON-encoded string of one.
pub fn benefits_from_value(value: Option<&Value>) -> Vec<String> {
    let items = match value {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(encoded)) if !encoded.trim().is_empty() => {
            match serde_json::from_str::<Vec<Value>>(encoded) {
                Ok(items) => items,
                Err(err) => {
                    debug!(error = %err, "benefits string is not a JSON list");
                    Vec::new()
                }
            }
        }
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .collect()
}

/// Local draft of the pack-edit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackDraft {
    pub category: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub duration_days: String,
    pub benefits: Vec<String>,
    pub is_active: bool,
    pub is_popular: bool,
}

impl Default for PackDraft {
    fn default() -> Self {
        Self {
            category: String::new(),
            name: String::new(),
            description: String::new(),
            price: String::new(),
            duration_days: String::new(),
            benefits: Vec::new(),
            is_active: true,
            is_popular: false,
        }
    }
}

impl PackDraft {
    /// Build the draft from a server record. Every field not present, null
    /// or of an unexpected type takes the [`Default`] value.
    pub fn from_record(record: &ResourceRecord) -> Self {
        let defaults = Self::default();
        let text = |key: &str| record.text(key).unwrap_or_default();
        let flag = |key: &str, fallback: bool| {
            record
                .field(key)
                .and_then(boolish_value)
                .unwrap_or(fallback)
        };

        Self {
            category: text("category"),
            name: text("name"),
            description: text("description"),
            price: text("price"),
            duration_days: text("duration_days"),
            benefits: benefits_from_value(record.field("benefits")),
            is_active: flag("is_active", defaults.is_active),
            is_popular: flag("is_popular", defaults.is_popular),
        }
    }

    pub fn add_benefit(&mut self, text: impl Into<String>) {
        self.benefits.push(text.into());
    }

    pub fn remove_benefit(&mut self, index: usize) -> Option<String> {
        (index < self.benefits.len()).then(|| self.benefits.remove(index))
    }

    pub fn set_benefit(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.benefits.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> ResourceRecord {
        ResourceRecord::from_value(value).expect("record")
    }

    #[test]
    fn benefits_accept_encoded_string_and_native_list() {
        let encoded = record(json!({"id": 1, "benefits": "[\"Priority support\",\"API access\"]"}));
        let native = record(json!({"id": 1, "benefits": ["Priority support", "API access"]}));
        assert_eq!(
            PackDraft::from_record(&encoded).benefits,
            PackDraft::from_record(&native).benefits
        );
    }

    #[test]
    fn missing_fields_take_explicit_defaults() {
        let draft = PackDraft::from_record(&record(json!({"id": 7, "price": null})));
        assert_eq!(draft, PackDraft::default());
        assert!(draft.is_active);
        assert!(!draft.is_popular);
    }

    #[test]
    fn boolish_fields_are_coerced() {
        let draft = PackDraft::from_record(&record(json!({
            "id": 1,
            "price": 19.5,
            "is_active": "0",
            "is_popular": 1
        })));
        assert_eq!(draft.price, "19.5");
        assert!(!draft.is_active);
        assert!(draft.is_popular);
    }

    #[test]
    fn malformed_benefits_string_yields_empty_list() {
        let draft = PackDraft::from_record(&record(json!({"id": 1, "benefits": "not json"})));
        assert!(draft.benefits.is_empty());
    }

    #[test]
    fn benefit_rows_can_be_edited_in_place() {
        let mut draft = PackDraft::default();
        draft.add_benefit("one");
        draft.add_benefit("two");
        assert!(draft.set_benefit(1, "deux"));
        assert_eq!(draft.remove_benefit(0).as_deref(), Some("one"));
        assert_eq!(draft.remove_benefit(5), None);
        assert_eq!(draft.benefits, vec!["deux".to_string()]);
    }
}
