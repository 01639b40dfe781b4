//! Filter constraints applied to collection fetches.

use std::collections::BTreeMap;

/// Query key reserved for the page number.
pub const PAGE_PARAM: &str = "page";

/// Active filter selections of a screen, keyed by query parameter name.
///
/// Unset and blank values are retained so the UI can round-trip them, but they
/// never reach the outgoing query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    values: BTreeMap<String, Option<String>>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FilterSet::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        self.set(key, value);
        self
    }

    /// Store `value` under `key`. Returns `true` when the stored value changed.
    pub fn set(&mut self, key: impl Into<String>, value: Option<&str>) -> bool {
        let value = value.map(str::to_string);
        let key = key.into();
        if self.values.get(&key) == Some(&value) {
            return false;
        }
        self.values.insert(key, value);
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|value| value.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Filters that constrain the query, in key order, with trimmed values.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().filter_map(|(key, value)| {
            let value = value.as_deref()?.trim();
            (!value.is_empty() && key != PAGE_PARAM).then_some((key.as_str(), value))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

/// Query of a single collection fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new(filters: &FilterSet, page: u32) -> Self {
        Self {
            page,
            filters: filters
                .active()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Query pairs in wire order: `page` first, then each active filter.
    pub fn pairs(&self) -> Vec<(&str, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 1);
        pairs.push((PAGE_PARAM, self.page.to_string()));
        pairs.extend(
            self.filters
                .iter()
                .map(|(key, value)| (key.as_str(), value.clone())),
        );
        pairs
    }
}
