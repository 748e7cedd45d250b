//! GitHub contribution graph.
//!
//! The graph is an image served by ghchart; this module only builds the URLs
//! and validates the username before it is stored.

use chrono::NaiveDate;

use super::theme::Theme;
use crate::error::ValidationError;

/// Graph theme that renders GitHub's own green palette.
pub const DEFAULT_GRAPH_THEME: &str = "github";

const CHART_BASE: &str = "https://ghchart.rshah.org";
const MAX_USERNAME_LEN: usize = 39;

/// Check a GitHub username: 1–39 ASCII alphanumerics, hyphens allowed only
/// between two alphanumerics.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let invalid = |message: &str| ValidationError::InvalidValue {
        field: "github_username".to_string(),
        message: message.to_string(),
    };

    if username.is_empty() {
        return Err(ValidationError::Required("github_username".to_string()));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(invalid("must be at most 39 characters"));
    }
    if !username.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(invalid("may only contain letters, digits and hyphens"));
    }
    if username.starts_with('-') || username.ends_with('-') || username.contains("--") {
        return Err(invalid("hyphens must sit between letters or digits"));
    }
    Ok(())
}

pub fn profile_url(username: &str) -> String {
    format!("https://github.com/{username}")
}

/// Contribution chart image URL.
///
/// `on` is the local date used as a once-per-day cache buster. The theme
/// path segment is omitted for the default GitHub palette.
pub fn chart_url(username: &str, graph_theme: &str, on: NaiveDate) -> String {
    let scheme = graph_theme.trim();
    let prefix = if scheme.is_empty() || scheme == DEFAULT_GRAPH_THEME {
        String::new()
    } else {
        format!("{}/", urlencoding::encode(scheme))
    };
    format!("{CHART_BASE}/{prefix}{username}?{}", on.format("%Y-%m-%d"))
}

/// Whether the chart image should be colour-inverted to sit on a dark page.
///
/// Only the default palette is inverted; custom colours are drawn as-is.
pub fn invert_for_dark(effective: Theme, graph_theme: &str) -> bool {
    effective == Theme::Dark && graph_theme.trim() == DEFAULT_GRAPH_THEME
}
