use serde::Serialize;

use super::highlight::{highlight, Segment};
use super::{MatchType, SearchResult};
use crate::conversation::ConversationId;
use crate::route::Route;

/// Matches rendered per result (the snippet plus this many minus one extra entries).
pub const MAX_RENDERED_MATCHES: usize = 4;

/// An additional message match, selectable on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEntry {
    pub segments: Vec<Segment>,
    pub route: Route,
}

/// A search result ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedResult {
    pub id: ConversationId,
    pub title: Vec<Segment>,
    pub snippet: Option<Vec<Segment>>,
    pub extra_matches: Vec<MatchEntry>,
    /// Matches beyond the rendered ones, summarized by count.
    pub more_matches: usize,
    pub route: Route,
    pub date_label: String,
}

impl RenderedResult {
    pub fn more_matches_label(&self) -> Option<String> {
        if self.more_matches > 0 {
            Some(format!("+{} more matches", self.more_matches))
        } else {
            None
        }
    }
}

pub fn render_results(results: &[SearchResult], keyword: &str) -> Vec<RenderedResult> {
    results.iter().map(|r| render_result(r, keyword)).collect()
}

pub fn render_result(result: &SearchResult, keyword: &str) -> RenderedResult {
    let conv = &result.conversation;
    let matches = result.matches();

    let (title, snippet) = match result.match_type {
        MatchType::Title => (highlight(&conv.title, keyword), None),
        MatchType::Message => (
            vec![Segment::Plain(conv.title.clone())],
            result.snippet.as_deref().map(|s| highlight(s, keyword)),
        ),
    };

    let route = if result.match_type == MatchType::Message && !matches.is_empty() {
        Route::message(conv.id.clone(), result.match_index(0).unwrap_or(0))
    } else {
        Route::conversation(conv.id.clone())
    };

    let mut extra_matches = Vec::new();
    let mut more_matches = 0;
    if result.match_type == MatchType::Message && matches.len() > 1 {
        extra_matches = matches
            .iter()
            .enumerate()
            .skip(1)
            .take(MAX_RENDERED_MATCHES - 1)
            .map(|(i, text)| MatchEntry {
                segments: highlight(text, keyword),
                route: match result.match_index(i) {
                    Some(index) => Route::message(conv.id.clone(), index),
                    None => Route::conversation(conv.id.clone()),
                },
            })
            .collect();
        more_matches = matches.len().saturating_sub(MAX_RENDERED_MATCHES);
    }

    RenderedResult {
        id: conv.id.clone(),
        title,
        snippet,
        extra_matches,
        more_matches,
        route,
        date_label: conv.date_label(),
    }
}
