//! Response shapes of the admin REST API.
//!
//! Every type here is deliberately loose: fields the backend may omit carry
//! serde defaults, and record bodies stay as raw JSON so the consumer decides
//! how to interpret them.

#![deny(clippy::all, clippy::pedantic)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `GET <collection>?page=..`.
///
/// The page itself lives under a key named after the collection
/// (`{"success": true, "testimonials": {...}}`), so it is captured through
/// the flattened remainder and pulled out with [`ListEnvelope::take_page`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl ListEnvelope {
    /// Remove and decode the page stored under `key`.
    pub fn take_page(&mut self, key: &str) -> Option<Result<CollectionPage, serde_json::Error>> {
        self.rest.remove(key).map(serde_json::from_value)
    }
}

/// Paginator payload embedded in a [`ListEnvelope`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionPage {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub per_page: u32,
}

/// Body of `GET <collection>/<id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    /// Absent when the server refuses with `success: false`.
    #[serde(default)]
    pub data: Option<Value>,
}

/// Body returned by every write endpoint (update, moderation actions, delete).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Map<String, Value>>,
}

impl MutationResponse {
    /// First message of the first field listed under `errors`, in server order.
    ///
    /// Each field usually maps to a list of messages; a bare string is
    /// accepted as a one-element list.
    pub fn first_field_error(&self) -> Option<(String, String)> {
        let errors = self.errors.as_ref()?;
        errors.iter().find_map(|(field, messages)| {
            let message = match messages {
                Value::Array(items) => items.iter().find_map(Value::as_str)?.to_string(),
                Value::String(text) => text.clone(),
                _ => return None,
            };
            Some((field.clone(), message))
        })
    }
}

/// Body of `GET user/permissions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionsResponse {
    #[serde(default)]
    pub permissions: Vec<PermissionEntry>,
    #[serde(default)]
    pub is_super_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionEntry {
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_extracts_named_page() {
        let mut envelope: ListEnvelope = serde_json::from_str(
            r#"{"success":true,"testimonials":{"data":[{"id":1}],"total":31,"per_page":15}}"#,
        )
        .expect("envelope");

        let page = envelope
            .take_page("testimonials")
            .expect("page present")
            .expect("page decodes");
        assert_eq!(page.total, 31);
        assert_eq!(page.per_page, 15);
        assert_eq!(page.data.len(), 1);
        assert!(envelope.take_page("testimonials").is_none());
    }

    #[test]
    fn first_field_error_follows_server_order() {
        let response: MutationResponse = serde_json::from_str(
            r#"{"success":false,"errors":{"price":["The price must be positive."],"name":["Required."]}}"#,
        )
        .expect("response");

        assert_eq!(
            response.first_field_error(),
            Some((
                "price".to_string(),
                "The price must be positive.".to_string()
            ))
        );
    }

    #[test]
    fn missing_permissions_field_is_empty() {
        let response: PermissionsResponse = serde_json::from_str("{}").expect("response");
        assert!(response.permissions.is_empty());
        assert!(!response.is_super_admin);
    }
}
