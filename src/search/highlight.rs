use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// A highlight range representing a match in the text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HighlightRange {
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset of the match end (exclusive).
    pub end: usize,
}

/// A run of text, either passed through verbatim or tagged for emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment {
    Plain(String),
    Mark(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(s) | Segment::Mark(s) => s,
        }
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, Segment::Mark(_))
    }
}

/// Find every occurrence of the keyword in the text (case-insensitive).
/// The keyword is matched literally. Returns non-overlapping ranges sorted by start position.
pub fn find_highlights(text: &str, keyword: &str) -> Vec<HighlightRange> {
    if keyword.is_empty() || text.is_empty() {
        return Vec::new();
    }

    let pattern = match RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
    {
        Ok(p) => p,
        Err(e) => {
            log::warn!("Cannot build highlight pattern for {:?}: {}", keyword, e);
            return Vec::new();
        }
    };

    pattern
        .find_iter(text)
        .map(|m| HighlightRange {
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Split `text` into plain and marked segments around keyword occurrences.
/// With an empty keyword, or no occurrence, the text comes back as a single plain segment.
pub fn highlight(text: &str, keyword: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for range in find_highlights(text, keyword) {
        if range.start > cursor {
            segments.push(Segment::Plain(text[cursor..range.start].to_string()));
        }
        segments.push(Segment::Mark(text[range.start..range.end].to_string()));
        cursor = range.end;
    }

    if cursor < text.len() {
        segments.push(Segment::Plain(text[cursor..].to_string()));
    }

    segments
}

/// Concatenate segment text, dropping the emphasis tags.
pub fn plain_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}
