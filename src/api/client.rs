use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, ConversationActions, SearchBackend};
use crate::config::ClientConfig;
use crate::conversation::{Conversation, ConversationId};
use crate::search::{SearchResponse, SearchResult};
use crate::session::TokenSource;

/// REST client for the chat backend.
pub struct ApiClient {
    http: Client,
    base_url: Url,
    tokens: Arc<dyn TokenSource>,
}

#[derive(Serialize)]
struct RenameBody<'a> {
    title: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConversationList {
    Bare(Vec<Conversation>),
    Wrapped {
        #[serde(default)]
        conversations: Vec<Conversation>,
    },
}

#[derive(Deserialize)]
struct FailureBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenSource>) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.api_base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.api_base_url.clone()));
        }

        let http = Client::builder().timeout(config.request_timeout()).build()?;

        log::info!("API client ready: base_url={}", base_url);

        Ok(ApiClient {
            http,
            base_url,
            tokens,
        })
    }

    /// Append path segments (percent-encoded) to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetch the plain conversation list shown while no search is active.
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        let token = self.tokens.token();
        let request = authorize(self.http.get(self.endpoint(&["conversations"])), token.as_deref());
        let response = expect_success(request.send().await?).await?;
        let body = response.text().await?;
        let list: ConversationList = serde_json::from_str(&body)?;
        Ok(match list {
            ConversationList::Bare(conversations) => conversations,
            ConversationList::Wrapped { conversations } => conversations,
        })
    }
}

#[async_trait]
impl SearchBackend for ApiClient {
    async fn search(
        &self,
        query: &str,
        token: Option<&str>,
    ) -> Result<Vec<SearchResult>, ApiError> {
        let request = self
            .http
            .get(self.endpoint(&["conversations", "search"]))
            .query(&[("q", query)]);
        let response = expect_success(authorize(request, token).send().await?).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_results())
    }
}

#[async_trait]
impl ConversationActions for ApiClient {
    async fn rename(&self, id: &ConversationId, title: &str) -> Result<(), ApiError> {
        let token = self.tokens.token();
        let request = self
            .http
            .put(self.endpoint(&["conversations", id.as_str()]))
            .json(&RenameBody { title });
        let response = expect_success(authorize(request, token.as_deref()).send().await?).await?;

        // Some deployments answer 200 with an `error` field instead of a failure status.
        let status = response.status();
        let body = response.text().await?;
        if let Some(message) = reported_error(&body) {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        log::info!("Renamed conversation {}", id);
        Ok(())
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), ApiError> {
        let token = self.tokens.token();
        let request = self.http.delete(self.endpoint(&["conversations", id.as_str()]));
        expect_success(authorize(request, token.as_deref()).send().await?).await?;
        log::info!("Deleted conversation {}", id);
        Ok(())
    }
}

fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

async fn expect_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message: failure_message(status, &body),
    })
}

// Prefer `error`, then `detail`, then the status line.
fn failure_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<FailureBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.detail))
        .map(describe)
        .unwrap_or_else(|| status.to_string())
}

fn reported_error(body: &str) -> Option<String> {
    serde_json::from_str::<FailureBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(describe)
}

fn describe(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}
