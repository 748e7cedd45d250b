//! Quick-link icon resolution.
//!
//! [`resolve`] turns a link's declared icon and target URL into the ordered
//! list of sources the presentation layer should try. Nothing here touches
//! the network.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ValidationError;

/// Size requested from the favicon service.
pub const FAVICON_SIZE: u32 = 128;

/// Domains whose own `/favicon.ico` is more reliable than a third-party
/// icon service. A host matches if it equals an entry or ends with `.entry`.
const SELF_HOSTED_FAVICON_DOMAINS: &[&str] = &["google.com", "gmail.com", "youtube.com"];

const DEFAULT_ICON_SVG: &str = concat!(
    r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="#58a6ff" stroke-width="2">"##,
    r#"<path d="M10 13a5 5 0 0 0 7.54.54l3-3a5 5 0 0 0-7.07-7.07l-1.72 1.71"/>"#,
    r#"<path d="M14 11a5 5 0 0 0-7.54-.54l-3 3a5 5 0 0 0 7.07 7.07l1.71-1.71"/>"#,
    "</svg>"
);

/// Input to [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSpec {
    /// Absolute or rooted image URL, a literal glyph, or empty.
    #[serde(default)]
    pub declared_icon: Option<String>,
    pub target_url: String,
}

impl IconSpec {
    pub fn new(declared_icon: impl Into<String>, target_url: impl Into<String>) -> Self {
        let declared = declared_icon.into();
        Self {
            declared_icon: if declared.is_empty() { None } else { Some(declared) },
            target_url: target_url.into(),
        }
    }
}

/// One render source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum IconCandidate {
    /// Image reference to load; may fail.
    Image(String),
    /// Literal text rendered as-is; never fails.
    Glyph(String),
    /// The built-in link icon; never fails.
    Default,
}

impl IconCandidate {
    pub fn is_image(&self) -> bool {
        matches!(self, IconCandidate::Image(_))
    }

    /// Whether a load error on this candidate should advance to the next one.
    pub fn can_fail(&self) -> bool {
        self.is_image()
    }

    /// The `src` (or text) to render.
    pub fn source(&self) -> &str {
        match self {
            IconCandidate::Image(src) | IconCandidate::Glyph(src) => src,
            IconCandidate::Default => default_icon_uri(),
        }
    }
}

/// Ordered candidates, primary first. Never empty.
///
/// Serializes as a plain list; deserializing an empty list is an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<IconCandidate>", into = "Vec<IconCandidate>")]
pub struct IconResolution {
    candidates: Vec<IconCandidate>,
}

impl TryFrom<Vec<IconCandidate>> for IconResolution {
    type Error = ValidationError;

    fn try_from(candidates: Vec<IconCandidate>) -> Result<Self, Self::Error> {
        if candidates.is_empty() {
            return Err(ValidationError::Required("icon candidates".to_string()));
        }
        Ok(Self { candidates })
    }
}

impl From<IconResolution> for Vec<IconCandidate> {
    fn from(resolution: IconResolution) -> Self {
        resolution.candidates
    }
}

impl IconResolution {
    pub fn primary(&self) -> &IconCandidate {
        &self.candidates[0]
    }

    pub fn fallbacks(&self) -> &[IconCandidate] {
        &self.candidates[1..]
    }

    pub fn candidates(&self) -> &[IconCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IconCandidate> {
        self.candidates.iter()
    }
}

impl<'a> IntoIterator for &'a IconResolution {
    type Item = &'a IconCandidate;
    type IntoIter = std::slice::Iter<'a, IconCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// Resolve the render sources for a quick link.
///
/// Rules, first match wins:
/// 1. declared icon starting with `http` or `/`: that image, then the
///    favicon service;
/// 2. any other non-empty declared icon: the glyph alone;
/// 3. nothing declared: the favicon service.
///
/// Image primaries are followed by the backup favicon source and the default
/// icon. A step that cannot extract a domain from `target_url` yields the
/// default icon and ends the chain.
pub fn resolve(spec: &IconSpec) -> IconResolution {
    let declared = spec
        .declared_icon
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut chain = Chain::default();
    match declared {
        Some(icon) if icon.starts_with("http") || icon.starts_with('/') => {
            chain.push(Some(icon.to_string()));
            chain.push(favicon_url(&spec.target_url));
        }
        Some(glyph) => {
            return IconResolution {
                candidates: vec![IconCandidate::Glyph(glyph.to_string())],
            };
        }
        None => chain.push(favicon_url(&spec.target_url)),
    }
    chain.push(backup_favicon_url(&spec.target_url));
    chain.finish()
}

/// Favicon-service URL for the host of `target_url`.
pub fn favicon_url(target_url: &str) -> Option<String> {
    let domain = domain_of(target_url)?;
    Some(format!(
        "https://www.google.com/s2/favicons?domain={domain}&sz={FAVICON_SIZE}"
    ))
}

/// Second favicon source for the host of `target_url`.
pub fn backup_favicon_url(target_url: &str) -> Option<String> {
    let domain = domain_of(target_url)?;
    if serves_own_favicon(&domain) {
        Some(format!("https://{domain}/favicon.ico"))
    } else {
        Some(format!("https://icons.duckduckgo.com/ip3/{domain}.ico"))
    }
}

/// Hostname of `target_url`, if it parses and has one.
pub fn domain_of(target_url: &str) -> Option<String> {
    let parsed = Url::parse(target_url.trim()).ok()?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Some(host.to_string()),
        _ => None,
    }
}

/// `data:` URI of the built-in link icon.
pub fn default_icon_uri() -> &'static str {
    static URI: OnceLock<String> = OnceLock::new();
    URI.get_or_init(|| {
        format!(
            "data:image/svg+xml,{}",
            urlencoding::encode(DEFAULT_ICON_SVG)
        )
    })
}

fn serves_own_favicon(domain: &str) -> bool {
    SELF_HOSTED_FAVICON_DOMAINS.iter().any(|known| {
        domain == *known
            || domain
                .strip_suffix(known)
                .is_some_and(|rest| rest.ends_with('.'))
    })
}

/// Accumulates image candidates until the first default icon.
#[derive(Default)]
struct Chain {
    candidates: Vec<IconCandidate>,
    closed: bool,
}

impl Chain {
    fn push(&mut self, src: Option<String>) {
        if self.closed {
            return;
        }
        match src {
            Some(src) => self.candidates.push(IconCandidate::Image(src)),
            None => {
                self.candidates.push(IconCandidate::Default);
                self.closed = true;
            }
        }
    }

    fn finish(mut self) -> IconResolution {
        if !self.closed {
            self.candidates.push(IconCandidate::Default);
        }
        IconResolution {
            candidates: self.candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_candidate_list_is_rejected() {
        let err = serde_json::from_str::<IconResolution>("[]").unwrap_err();
        assert!(err.to_string().contains("icon candidates"), "{err}");
    }

    #[test]
    fn deserialized_list_keeps_order() {
        let r: IconResolution =
            serde_json::from_str(r#"[{"kind":"glyph","value":"★"},{"kind":"default"}]"#).unwrap();
        assert_eq!(r.primary(), &IconCandidate::Glyph("★".into()));
        assert_eq!(r.fallbacks(), &[IconCandidate::Default]);
        assert!(!r.is_empty());
    }

    fn image(s: &str) -> IconCandidate {
        IconCandidate::Image(s.to_string())
    }

    #[test]
    fn empty_icon_uses_favicon_chain() {
        let r = resolve(&IconSpec::new("", "https://github.com"));
        assert_eq!(
            r.candidates(),
            &[
                image("https://www.google.com/s2/favicons?domain=github.com&sz=128"),
                image("https://icons.duckduckgo.com/ip3/github.com.ico"),
                IconCandidate::Default,
            ]
        );
        assert_eq!(r.fallbacks().len(), 2);
    }

    #[test]
    fn glyph_is_the_only_candidate() {
        let r = resolve(&IconSpec::new("🚀", "https://github.com"));
        assert_eq!(r.candidates(), &[IconCandidate::Glyph("🚀".into())]);
        assert!(!r.primary().can_fail());
    }

    #[test]
    fn unparseable_url_short_circuits_to_default() {
        let r = resolve(&IconSpec::new("", "not a url"));
        assert_eq!(r.candidates(), &[IconCandidate::Default]);
    }

    #[test]
    fn url_without_scheme_does_not_parse() {
        assert_eq!(domain_of("github.com"), None);
        let r = resolve(&IconSpec::new("", "github.com"));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn url_without_host_is_treated_as_unparseable() {
        assert_eq!(domain_of("mailto:someone@example.com"), None);
    }

    #[test]
    fn custom_icon_falls_back_through_favicon_services() {
        let r = resolve(&IconSpec::new(
            "https://cdn.example.com/logo.png",
            "https://mail.google.com/mail/u/0",
        ));
        assert_eq!(
            r.candidates(),
            &[
                image("https://cdn.example.com/logo.png"),
                image("https://www.google.com/s2/favicons?domain=mail.google.com&sz=128"),
                image("https://mail.google.com/favicon.ico"),
                IconCandidate::Default,
            ]
        );
    }

    #[test]
    fn rooted_custom_icon_with_bad_url_keeps_icon_then_default() {
        let r = resolve(&IconSpec::new("/icons/home.svg", "::::"));
        assert_eq!(
            r.candidates(),
            &[image("/icons/home.svg"), IconCandidate::Default]
        );
    }

    #[test]
    fn declared_icon_is_trimmed() {
        let r = resolve(&IconSpec::new("   ", "https://dev.to"));
        assert_eq!(r.len(), 3);
        let r = resolve(&IconSpec::new(" ⭐ ", "https://dev.to"));
        assert_eq!(r.primary(), &IconCandidate::Glyph("⭐".into()));
    }

    #[test]
    fn self_hosted_favicon_matches_suffix_only() {
        assert!(serves_own_favicon("youtube.com"));
        assert!(serves_own_favicon("www.youtube.com"));
        assert!(!serves_own_favicon("notyoutube.com"));
        assert!(!serves_own_favicon("youtube.com.evil.net"));
    }

    #[test]
    fn default_icon_is_an_encoded_svg_data_uri() {
        let uri = default_icon_uri();
        assert!(uri.starts_with("data:image/svg+xml,%3Csvg"));
        assert!(uri.contains("%2358a6ff"));
        assert!(!uri.contains('<'));
        assert_eq!(IconCandidate::Default.source(), uri);
    }
}
