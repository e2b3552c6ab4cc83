pub mod controller;
pub mod highlight;
pub mod render;

use serde::{Deserialize, Serialize};

use crate::conversation::Conversation;

/// Where the keyword was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Title,
    Message,
}

/// A single search hit. Created per query and discarded when the query changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub conversation: Conversation,
    pub match_type: MatchType,
    #[serde(default)]
    pub snippet: Option<String>,
    /// Message excerpts, index-aligned with `match_indexes`.
    #[serde(default)]
    pub matches: Option<Vec<String>>,
    #[serde(default, rename = "matchIndexes")]
    pub match_indexes: Option<Vec<i64>>,
}

impl SearchResult {
    pub fn matches(&self) -> &[String] {
        self.matches.as_deref().unwrap_or_default()
    }

    /// Message position correlated with the match at `i`, if the backend sent one.
    pub fn match_index(&self, i: usize) -> Option<i64> {
        self.match_indexes.as_ref().and_then(|idx| idx.get(i).copied())
    }
}

/// Body of `GET /conversations/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<serde_json::Value>>,
}

impl SearchResponse {
    /// Decode each record on its own; a malformed record is dropped, not the whole page.
    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
            .unwrap_or_default()
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<SearchResult>(value) {
                Ok(result) => Some(result),
                Err(e) => {
                    log::warn!("Skipping malformed search result: {}", e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_message_result() {
        let json = r#"{
            "id": 3,
            "title": "Trip planning",
            "created_at": "2024-03-09T08:05:00",
            "match_type": "message",
            "snippet": "book the train",
            "matches": ["book the train", "train times"],
            "matchIndexes": [4, 9]
        }"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.conversation.id.as_str(), "3");
        assert_eq!(result.conversation.title, "Trip planning");
        assert_eq!(result.match_type, MatchType::Message);
        assert_eq!(result.matches().len(), 2);
        assert_eq!(result.match_index(1), Some(9));
        assert_eq!(result.match_index(2), None);
    }

    #[test]
    fn test_decode_title_result_without_optionals() {
        let json = r#"{"id": "a1", "title": "Cats", "match_type": "title"}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.match_type, MatchType::Title);
        assert!(result.snippet.is_none());
        assert!(result.matches().is_empty());
    }

    #[test]
    fn test_response_missing_results_is_empty() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_results().is_empty());

        let response: SearchResponse = serde_json::from_str(r#"{"results": null}"#).unwrap();
        assert!(response.into_results().is_empty());
    }

    #[test]
    fn test_response_skips_malformed_records() {
        let json = r#"{"results": [
            {"id": 1, "title": "ok", "match_type": "title"},
            {"id": 2, "title": "bad", "match_type": "attachment"},
            {"title": "no id", "match_type": "title"}
        ]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let results = response.into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].conversation.title, "ok");
    }
}
