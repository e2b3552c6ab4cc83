//! Debounced search-as-you-type.
//!
//! Every query change bumps a generation counter. The lookup scheduled for a
//! change carries that generation and only applies its outcome while it is
//! still current, so a slow response for an old query never replaces newer
//! state. At most one lookup task is alive per controller.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::SearchResult;
use crate::api::{ApiError, SearchBackend};
use crate::session::TokenSource;

/// Observable search state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Raw input, as typed.
    pub query: String,
    pub results: Vec<SearchResult>,
    pub is_searching: bool,
    /// Incremented on every query change.
    pub generation: u64,
}

impl SearchState {
    /// Whether search results replace the plain conversation list.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

pub struct SearchController {
    backend: Arc<dyn SearchBackend>,
    tokens: Arc<dyn TokenSource>,
    debounce: Duration,
    state: Arc<watch::Sender<SearchState>>,
    pending: Option<JoinHandle<()>>,
}

impl SearchController {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        tokens: Arc<dyn TokenSource>,
        debounce: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        SearchController {
            backend,
            tokens,
            debounce,
            state: Arc::new(state),
            pending: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Handle a change of the search input. Must be called inside a tokio runtime.
    ///
    /// A blank query clears the results synchronously. Anything else marks the
    /// controller as searching and schedules a lookup after the debounce window,
    /// replacing any lookup scheduled earlier.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }

        let trimmed = query.trim().to_string();
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            generation = s.generation;
            s.query = query;
            if trimmed.is_empty() {
                s.results.clear();
                s.is_searching = false;
            } else {
                s.is_searching = true;
            }
        });

        if trimmed.is_empty() {
            log::debug!("Search cleared (generation {})", generation);
            return;
        }

        let backend = Arc::clone(&self.backend);
        let tokens = Arc::clone(&self.tokens);
        let state = Arc::clone(&self.state);
        let debounce = self.debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let token = tokens.token();
            log::debug!("Searching {:?} (generation {})", trimmed, generation);
            let outcome = backend.search(&trimmed, token.as_deref()).await;

            if !apply_outcome(&state, generation, outcome) {
                log::debug!(
                    "Discarded stale results for {:?} (generation {})",
                    trimmed,
                    generation
                );
            }
        }));
    }

    /// Same as clearing the search box.
    pub fn clear(&mut self) {
        self.set_query(String::new());
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

/// Apply a lookup outcome if `generation` is still current. Failures degrade to no results.
fn apply_outcome(
    state: &watch::Sender<SearchState>,
    generation: u64,
    outcome: Result<Vec<SearchResult>, ApiError>,
) -> bool {
    state.send_if_modified(|s| {
        if s.generation != generation {
            return false;
        }
        match outcome {
            Ok(results) => {
                log::debug!("Search returned {} results", results.len());
                s.results = results;
            }
            Err(e) => {
                log::warn!("Search failed, showing no results: {}", e);
                s.results.clear();
            }
        }
        s.is_searching = false;
        true
    })
}
