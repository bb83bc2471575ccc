use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Identifier assigned by the store when a todo is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i32);

impl TodoId {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo entry as returned by the list operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
}

impl Todo {
    pub fn new(id: TodoId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// A title that passed the create-time checks.
///
/// The only way to obtain one is through [`TodoTitle::parse`] or
/// [`TodoTitle::from_payload`], so stores never see an unchecked title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Accepts any non-empty string. Whitespace is preserved as submitted.
    pub fn parse(value: impl Into<String>) -> Result<Self, TitleError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TitleError::Empty);
        }
        Ok(Self(value))
    }

    /// Extracts the `title` field from a decoded create request body.
    ///
    /// Bodies that are not JSON objects are treated as having no title.
    pub fn from_payload(payload: &Value) -> Result<Self, TitleError> {
        match payload.get("title") {
            None | Some(Value::Null) => Err(TitleError::Missing),
            Some(Value::String(title)) => Self::parse(title.as_str()),
            Some(_) => Err(TitleError::NotAString),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a create request is rejected before reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("title is missing")]
    Missing,
    #[error("title must be a string")]
    NotAString,
    #[error("title must not be empty")]
    Empty,
}

impl TitleError {
    /// Short label used for metrics and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::NotAString => "not_a_string",
            Self::Empty => "empty",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn todo_serializes_as_flat_object() {
        let todo = Todo::new(TodoId::new(2), "Walk dog");
        let value = serde_json::to_value(&todo).expect("serialize");
        assert_eq!(value, json!({ "id": 2, "title": "Walk dog" }));
    }

    #[test]
    fn payload_with_string_title_is_accepted() {
        let title = TodoTitle::from_payload(&json!({ "title": "Buy milk" })).expect("valid");
        assert_eq!(title.as_str(), "Buy milk");
    }

    #[test]
    fn whitespace_title_is_kept_verbatim() {
        let title = TodoTitle::parse("  spaced  ").expect("non-empty");
        assert_eq!(title.into_inner(), "  spaced  ");
    }

    #[test]
    fn rejects_missing_null_and_non_object_payloads() {
        assert_eq!(
            TodoTitle::from_payload(&json!({})),
            Err(TitleError::Missing)
        );
        assert_eq!(
            TodoTitle::from_payload(&json!({ "title": null })),
            Err(TitleError::Missing)
        );
        assert_eq!(
            TodoTitle::from_payload(&json!(["title"])),
            Err(TitleError::Missing)
        );
    }

    #[test]
    fn rejects_non_string_and_empty_titles() {
        assert_eq!(
            TodoTitle::from_payload(&json!({ "title": 42 })),
            Err(TitleError::NotAString)
        );
        assert_eq!(
            TodoTitle::from_payload(&json!({ "title": true })),
            Err(TitleError::NotAString)
        );
        assert_eq!(
            TodoTitle::from_payload(&json!({ "title": "" })),
            Err(TitleError::Empty)
        );
    }
}
