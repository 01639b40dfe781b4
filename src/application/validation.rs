//! Ordered draft validation and normalization into the submit payload.

use serde::Serialize;

use crate::application::error::ValidationError;
use crate::domain::draft::PackDraft;

/// One field predicate. Rules are evaluated in the order they are listed.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required {
        field: &'static str,
        message: &'static str,
    },
    Positive {
        field: &'static str,
        message: &'static str,
    },
    NonEmptyList {
        field: &'static str,
        message: &'static str,
    },
    OneOf {
        field: &'static str,
        allowed: Vec<String>,
        message: &'static str,
    },
}

impl Rule {
    pub fn field(&self) -> &'static str {
        match self {
            Rule::Required { field, .. }
            | Rule::Positive { field, .. }
            | Rule::NonEmptyList { field, .. }
            | Rule::OneOf { field, .. } => *field,
        }
    }

    fn check<D: Draft + ?Sized>(&self, draft: &D) -> Result<(), ValidationError> {
        let passed = match self {
            Rule::Required { field, .. } => draft
                .text(field)
                .is_some_and(|value| !value.trim().is_empty()),
            Rule::Positive { field, .. } => draft
                .text(field)
                .and_then(|value| value.trim().parse::<f64>().ok())
                .is_some_and(|number| number.is_finite() && number > 0.0),
            Rule::NonEmptyList { field, .. } => draft
                .list(field)
                .is_some_and(|items| !non_blank(items).is_empty()),
            Rule::OneOf { field, allowed, .. } => draft.text(field).is_some_and(|value| {
                let value = value.trim();
                allowed.iter().any(|candidate| candidate == value)
            }),
        };

        if passed {
            Ok(())
        } else {
            let message = match self {
                Rule::Required { message, .. }
                | Rule::Positive { message, .. }
                | Rule::NonEmptyList { message, .. }
                | Rule::OneOf { message, .. } => *message,
            };
            Err(ValidationError::new(self.field(), message))
        }
    }
}

/// Form state that can be validated field by field and normalized.
pub trait Draft {
    fn text(&self, field: &str) -> Option<&str>;
    fn list(&self, field: &str) -> Option<&[String]>;
    fn normalize(&self) -> NormalizedPayload;
}

/// Ordered wire fields of a submit request, exactly as they will be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedPayload {
    fields: Vec<(&'static str, String)>,
}

impl NormalizedPayload {
    pub fn push(&mut self, field: &'static str, value: impl Into<String>) {
        self.fields.push((field, value.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }
}

/// Trimmed entries of `items`, blanks dropped, order kept.
pub fn non_blank(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Wire encoding of a list field: a JSON array of strings.
pub fn encode_list(items: &[String]) -> String {
    serde_json::Value::from(items.to_vec()).to_string()
}

/// Canonical wire value of a flag.
pub fn encode_flag(flag: bool) -> &'static str {
    if flag { "1" } else { "0" }
}

/// Run `rules` in order and stop at the first failure; on success return the
/// normalized payload.
pub fn validate_draft<D: Draft + ?Sized>(
    draft: &D,
    rules: &[Rule],
) -> Result<NormalizedPayload, ValidationError> {
    for rule in rules {
        rule.check(draft)?;
    }
    Ok(draft.normalize())
}

/// Rules of the pack form, in the order the form reports them.
pub fn pack_rules(categories: &[String]) -> Vec<Rule> {
    vec![
        Rule::OneOf {
            field: "category",
            allowed: categories.to_vec(),
            message: "Please select a category",
        },
        Rule::Required {
            field: "name",
            message: "Please enter a pack name",
        },
        Rule::Positive {
            field: "price",
            message: "Price must be greater than 0",
        },
        Rule::Positive {
            field: "duration_days",
            message: "Duration must be greater than 0",
        },
        Rule::NonEmptyList {
            field: "benefits",
            message: "Please add at least one benefit",
        },
    ]
}

impl Draft for PackDraft {
    fn text(&self, field: &str) -> Option<&str> {
        match field {
            "category" => Some(&self.category),
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            "price" => Some(&self.price),
            "duration_days" => Some(&self.duration_days),
            _ => None,
        }
    }

    fn list(&self, field: &str) -> Option<&[String]> {
        (field == "benefits").then_some(self.benefits.as_slice())
    }

    fn normalize(&self) -> NormalizedPayload {
        let mut payload = NormalizedPayload::default();
        payload.push("category", self.category.trim());
        payload.push("name", self.name.trim());
        payload.push("description", self.description.trim());
        payload.push("price", self.price.trim());
        payload.push("duration_days", self.duration_days.trim());
        payload.push("benefits", encode_list(&non_blank(&self.benefits)));
        payload.push("is_active", encode_flag(self.is_active));
        payload.push("is_popular", encode_flag(self.is_popular));
        payload
    }
}
