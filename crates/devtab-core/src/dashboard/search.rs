//! Search bar: direct navigation for URL-like input, engine search otherwise.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    #[default]
    Google,
    Claude,
    #[serde(rename = "chatgpt")]
    ChatGpt,
    #[serde(rename = "stackoverflow")]
    StackOverflow,
}

impl SearchEngine {
    pub const ALL: [SearchEngine; 4] = [
        SearchEngine::Google,
        SearchEngine::Claude,
        SearchEngine::ChatGpt,
        SearchEngine::StackOverflow,
    ];

    /// Prefix the encoded query is appended to.
    pub fn query_prefix(self) -> &'static str {
        match self {
            SearchEngine::Google => "https://www.google.com/search?q=",
            SearchEngine::Claude => "https://claude.ai/new?q=",
            SearchEngine::ChatGpt => "https://chatgpt.com/?q=",
            SearchEngine::StackOverflow => "https://stackoverflow.com/search?q=",
        }
    }

    pub fn search_url(self, query: &str) -> String {
        format!("{}{}", self.query_prefix(), urlencoding::encode(query))
    }
}

impl std::str::FromStr for SearchEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(SearchEngine::Google),
            "claude" => Ok(SearchEngine::Claude),
            "chatgpt" => Ok(SearchEngine::ChatGpt),
            "stackoverflow" => Ok(SearchEngine::StackOverflow),
            other => Err(format!("unknown search engine: {other}")),
        }
    }
}

/// Where submitting `query` should navigate, or `None` for blank input.
pub fn navigate(query: &str, engine: SearchEngine) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if looks_like_url(query) {
        if has_http_scheme(query) {
            return Some(query.to_string());
        }
        return Some(format!("https://{query}"));
    }
    Some(engine.search_url(query))
}

/// True for `http(s)://…`, `www.…`, or input that begins with a host name
/// such as `docs.rs/serde`.
pub fn looks_like_url(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    has_http_scheme(&lower) || lower.starts_with("www.") || starts_with_host(&lower)
}

fn has_http_scheme(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Matches a leading `label(.tld)+` where the label is alphanumeric with
/// inner hyphens and each tld is at least two ASCII letters.
fn starts_with_host(input: &str) -> bool {
    let bytes = input.as_bytes();
    let label_end = bytes
        .iter()
        .position(|b| !(b.is_ascii_alphanumeric() || *b == b'-'))
        .unwrap_or(bytes.len());
    let label = &input[..label_end];
    if label.is_empty() || label.starts_with('-') {
        return false;
    }
    // A trailing hyphen can be dropped; the label still matches up to it.
    let label = label.trim_end_matches('-');
    if label.is_empty() {
        return false;
    }
    if label.len() != label_end {
        // Backtracked over hyphens; the next char is '-', not a dot.
        return false;
    }

    let rest = &input[label_end..];
    let Some(after_dot) = rest.strip_prefix('.') else {
        return false;
    };
    let tld_len = after_dot
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    tld_len >= 2
}
