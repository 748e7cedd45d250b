use serde::{Deserialize, Serialize};

/// Page colour scheme. `System` follows the host preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    System,
}

impl Theme {
    /// Resolve `System` against the host preference. Never returns `System`.
    pub fn effective(self, prefers_dark: bool) -> Theme {
        match self {
            Theme::System if prefers_dark => Theme::Dark,
            Theme::System => Theme::Light,
            other => other,
        }
    }

    /// Value for the page's `theme-color` meta tag.
    pub fn theme_color(self, prefers_dark: bool) -> &'static str {
        match self.effective(prefers_dark) {
            Theme::Light => "#ffffff",
            _ => "#0d1117",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}
