//! Search queries and recent-search history entries.

use serde::{Deserialize, Serialize};

/// What the user typed into the search form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub ingredient: String,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, ingredient: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ingredient: ingredient.into(),
        }
    }

    /// Copy with both fields trimmed.
    pub fn trimmed(&self) -> Self {
        Self::new(self.text.trim(), self.ingredient.trim())
    }

    /// At least one field must be non-blank to be submitted.
    pub fn is_submittable(&self) -> bool {
        !self.text.trim().is_empty() || !self.ingredient.trim().is_empty()
    }

    /// Lower-cased, trimmed `"text|ingredient"`, used to dedupe history.
    pub fn canonical_key(&self) -> String {
        format!(
            "{}|{}",
            self.text.trim().to_lowercase(),
            self.ingredient.trim().to_lowercase()
        )
    }

    /// Non-empty fields joined with `" + "`, or `"(empty)"`.
    pub fn label(&self) -> String {
        let parts: Vec<&str> = [self.text.trim(), self.ingredient.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            "(empty)".to_string()
        } else {
            parts.join(" + ")
        }
    }
}

/// One row of the recent-search history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSearch {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub ingredient: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub canonical_key: String,
}

impl RecentSearch {
    pub fn new(query: &SearchQuery, timestamp: u64) -> Self {
        Self {
            text: query.text.clone(),
            ingredient: query.ingredient.clone(),
            timestamp,
            canonical_key: query.canonical_key(),
        }
    }

    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.text.clone(), self.ingredient.clone())
    }

    pub fn label(&self) -> String {
        self.query().label()
    }
}
