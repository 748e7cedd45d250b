//! User-editable quick links.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::icon::{resolve, IconResolution, IconSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickLink {
    pub name: String,
    pub url: String,
    /// Image URL, glyph, or empty to auto-fetch the site's favicon.
    #[serde(default)]
    pub icon: String,
}

impl QuickLink {
    /// Build a link from form input. Name and URL are required.
    pub fn new(
        name: impl AsRef<str>,
        url: impl AsRef<str>,
        icon: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        let url = url.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::Required("name".to_string()));
        }
        if url.is_empty() {
            return Err(ValidationError::Required("url".to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            url: url.to_string(),
            icon: icon.as_ref().trim().to_string(),
        })
    }

    pub fn icon_spec(&self) -> IconSpec {
        IconSpec::new(self.icon.clone(), self.url.clone())
    }

    pub fn resolve_icon(&self) -> IconResolution {
        resolve(&self.icon_spec())
    }
}

/// Links shown on a fresh install.
pub fn default_links() -> Vec<QuickLink> {
    [
        ("GitHub", "https://github.com"),
        ("Stack Overflow", "https://stackoverflow.com"),
        ("Reddit", "https://reddit.com/r/programming"),
        ("Hacker News", "https://news.ycombinator.com"),
        ("Dev.to", "https://dev.to"),
    ]
    .into_iter()
    .map(|(name, url)| QuickLink {
        name: name.to_string(),
        url: url.to_string(),
        icon: String::new(),
    })
    .collect()
}

fn check_index(links: &[QuickLink], index: usize) -> Result<(), ValidationError> {
    if index < links.len() {
        Ok(())
    } else {
        Err(ValidationError::OutOfBounds {
            collection: "quick_links".to_string(),
            index,
            len: links.len(),
        })
    }
}

pub fn add_link(links: &mut Vec<QuickLink>, link: QuickLink) {
    links.push(link);
}

/// Replace the link at `index`.
pub fn edit_link(
    links: &mut [QuickLink],
    index: usize,
    link: QuickLink,
) -> Result<(), ValidationError> {
    check_index(links, index)?;
    links[index] = link;
    Ok(())
}

/// Remove and return the link at `index`.
pub fn remove_link(links: &mut Vec<QuickLink>, index: usize) -> Result<QuickLink, ValidationError> {
    check_index(links, index)?;
    Ok(links.remove(index))
}
