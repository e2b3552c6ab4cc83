pub mod client;

use async_trait::async_trait;

use crate::conversation::ConversationId;
use crate::search::SearchResult;

pub use client::ApiClient;

/// Conversation search capability.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(
        &self,
        query: &str,
        token: Option<&str>,
    ) -> Result<Vec<SearchResult>, ApiError>;
}

/// Rename and delete capabilities used by the sidebar.
#[async_trait]
pub trait ConversationActions: Send + Sync {
    async fn rename(&self, id: &ConversationId, title: &str) -> Result<(), ApiError>;
    async fn delete(&self, id: &ConversationId) -> Result<(), ApiError>;
}

#[derive(Debug)]
pub enum ApiError {
    Http(reqwest::Error),
    /// The backend answered with a failure; `message` is meant for the user.
    Rejected { status: u16, message: String },
    Decode(serde_json::Error),
    InvalidUrl(String),
}

impl ApiError {
    /// Message shown in the error modal.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "request failed: {}", e),
            ApiError::Rejected { status, message } => write!(f, "HTTP {}: {}", status, message),
            ApiError::Decode(e) => write!(f, "unexpected response body: {}", e),
            ApiError::InvalidUrl(url) => write!(f, "invalid API base URL: {}", url),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Http(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_user_message_is_verbatim() {
        let err = ApiError::Rejected {
            status: 400,
            message: "title too long".to_string(),
        };
        assert_eq!(err.user_message(), "title too long");
        assert_eq!(err.to_string(), "HTTP 400: title too long");
    }

    #[test]
    fn test_decode_user_message() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.user_message().starts_with("unexpected response body"));
    }
}
