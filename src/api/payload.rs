//! Request bodies for write operations.
//!
//! Every body wraps its attributes under a single root key naming the
//! resource, e.g. `{"page": {"content": "..."}}`. Unset attributes are
//! omitted so a PUT only touches what the caller supplied.

use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};

/// An attribute set that can be sent as a request body.
pub trait ResourcePayload: Serialize {
    /// Root key of the JSON body.
    const ROOT: &'static str;

    /// True when no attribute is set.
    fn is_empty(&self) -> bool;

    /// Wrap the attributes under [`Self::ROOT`].
    fn to_body(&self) -> Result<Value> {
        let mut body = Map::new();
        body.insert(Self::ROOT.to_string(), serde_json::to_value(self)?);
        Ok(Value::Object(body))
    }
}

/// Keep a string only if it carries content.
fn supplied(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BookAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_level: Option<String>,
}

impl BookAttributes {
    /// Keep only the supplied, non-empty fields.
    pub fn changes(
        title: Option<&str>,
        learning_outcome: Option<&str>,
        reading_level: Option<&str>,
    ) -> Self {
        Self {
            title: supplied(title),
            learning_outcome: supplied(learning_outcome),
            reading_level: supplied(reading_level),
        }
    }
}

impl ResourcePayload for BookAttributes {
    const ROOT: &'static str = "book";

    fn is_empty(&self) -> bool {
        self.title.is_none() && self.learning_outcome.is_none() && self.reading_level.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ChapterAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ChapterAttributes {
    pub fn changes(title: Option<&str>, description: Option<&str>) -> Self {
        Self {
            title: supplied(title),
            description: supplied(description),
        }
    }
}

impl ResourcePayload for ChapterAttributes {
    const ROOT: &'static str = "chapter";

    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PageAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PageAttributes {
    pub fn changes(content: Option<&str>) -> Self {
        Self {
            content: supplied(content),
        }
    }
}

impl ResourcePayload for PageAttributes {
    const ROOT: &'static str = "page";

    fn is_empty(&self) -> bool {
        self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changes_drop_empty_strings() {
        let attrs = BookAttributes::changes(Some(""), Some("Learn fractions"), None);
        assert_eq!(attrs.title, None);
        assert!(!attrs.is_empty());
        assert_eq!(
            attrs.to_body().unwrap(),
            json!({"book": {"learning_outcome": "Learn fractions"}})
        );
    }

    #[test]
    fn test_empty_changes() {
        assert!(ChapterAttributes::changes(None, Some("")).is_empty());
        assert!(PageAttributes::changes(None).is_empty());
    }

    #[test]
    fn test_page_body() {
        let body = PageAttributes::changes(Some("Hello")).to_body().unwrap();
        assert_eq!(body, json!({"page": {"content": "Hello"}}));
    }
}
