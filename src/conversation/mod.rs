pub mod date;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use date::format_date;

/// Opaque conversation identifier. The backend may send it as a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawConversationId")]
pub struct ConversationId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawConversationId {
    Text(String),
    Number(i64),
}

impl From<RawConversationId> for ConversationId {
    fn from(raw: RawConversationId) -> Self {
        match raw {
            RawConversationId::Text(s) => ConversationId(s),
            RawConversationId::Number(n) => ConversationId(n.to_string()),
        }
    }
}

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        ConversationId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        ConversationId(s.to_string())
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A conversation as listed in the sidebar. Owned by the backend; never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Conversation {
    /// Timestamp shown under the title: creation time, falling back to last update.
    pub fn timestamp(&self) -> Option<&str> {
        non_blank(self.created_at.as_deref()).or_else(|| non_blank(self.updated_at.as_deref()))
    }

    pub fn date_label(&self) -> String {
        format_date(self.timestamp())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_string_and_number() {
        let a: Conversation = serde_json::from_str(r#"{"id": "abc", "title": "A"}"#).unwrap();
        let b: Conversation = serde_json::from_str(r#"{"id": 42, "title": "B"}"#).unwrap();
        assert_eq!(a.id.as_str(), "abc");
        assert_eq!(b.id.as_str(), "42");
        assert_eq!(b.id.to_string(), "42");
    }

    #[test]
    fn test_missing_fields_default() {
        let conv: Conversation = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(conv.title, "");
        assert!(conv.created_at.is_none());
        assert!(conv.updated_at.is_none());
        assert_eq!(conv.date_label(), "Unknown date");
    }

    #[test]
    fn test_timestamp_falls_back_to_updated_at() {
        let conv = Conversation {
            id: "1".into(),
            title: "t".to_string(),
            created_at: Some(String::new()),
            updated_at: Some("2024-03-09T08:05:00".to_string()),
        };
        assert_eq!(conv.timestamp(), Some("2024-03-09T08:05:00"));
        assert_eq!(conv.date_label(), "Mar 09 2024, 8:05 AM");
    }

    #[test]
    fn test_timestamp_prefers_created_at() {
        let conv = Conversation {
            id: "1".into(),
            title: "t".to_string(),
            created_at: Some("2023-12-31T23:59:00".to_string()),
            updated_at: Some("2024-03-09T08:05:00".to_string()),
        };
        assert_eq!(conv.timestamp(), Some("2023-12-31T23:59:00"));
    }
}
