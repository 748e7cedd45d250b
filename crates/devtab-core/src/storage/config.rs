//! TOML-based dashboard settings.
//!
//! One flat record holds everything the settings panel edits:
//! - GitHub username and graph theme
//! - Clock, font, background and theme
//! - Pomodoro durations, sounds and notifications
//! - Search engine and quick links
//!
//! Settings are stored at `~/.config/devtab/config.toml`. Keys also accept
//! the camelCase names used by the browser extension's synced storage, so an
//! exported record can be imported as-is.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::dashboard::github::{self, DEFAULT_GRAPH_THEME};
use crate::dashboard::{default_links, ClockFormat, QuickLink, SearchEngine, Theme};
use crate::error::{ConfigError, ValidationError};
use crate::timer::TimerSettings;

const DEFAULT_BRAND: &str = "DevTab";
const MAX_BG_BLUR: u32 = 50;
const MAX_BG_BRIGHTNESS: u32 = 100;

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(alias = "githubUsername")]
    pub github_username: String,
    #[serde(alias = "graphTheme")]
    pub graph_theme: String,
    #[serde(alias = "fontFamily")]
    pub font_family: String,
    #[serde(alias = "clockFormat")]
    pub clock_format: ClockFormat,
    #[serde(alias = "showSeconds")]
    pub show_seconds: bool,
    #[serde(alias = "bgUrl")]
    pub bg_url: String,
    /// Background blur in pixels.
    #[serde(alias = "bgBlur")]
    pub bg_blur: u32,
    /// Background brightness in percent.
    #[serde(alias = "bgBrightness")]
    pub bg_brightness: u32,
    /// Minutes.
    #[serde(alias = "focusDuration")]
    pub focus_duration: u64,
    /// Minutes.
    #[serde(alias = "shortBreak")]
    pub short_break: u64,
    /// Minutes.
    #[serde(alias = "longBreak")]
    pub long_break: u64,
    #[serde(alias = "sessionsBeforeLongBreak")]
    pub sessions_before_long_break: u32,
    #[serde(alias = "autoStartNext")]
    pub auto_start_next: bool,
    #[serde(alias = "searchEngine")]
    pub search_engine: SearchEngine,
    #[serde(alias = "brandName")]
    pub brand_name: String,
    #[serde(alias = "pomodoroSounds")]
    pub pomodoro_sounds: bool,
    /// Desktop notifications on period completion.
    pub notifications: bool,
    pub theme: Theme,
    #[serde(alias = "showPomodoro")]
    pub show_pomodoro: bool,
    #[serde(alias = "showQuickLinks")]
    pub show_quick_links: bool,
    #[serde(alias = "quickLinks")]
    pub quick_links: Vec<QuickLink>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_username: String::new(),
            graph_theme: DEFAULT_GRAPH_THEME.to_string(),
            font_family: "JetBrains Mono".to_string(),
            clock_format: ClockFormat::Hour24,
            show_seconds: true,
            bg_url: String::new(),
            bg_blur: 8,
            bg_brightness: 40,
            focus_duration: 25,
            short_break: 5,
            long_break: 15,
            sessions_before_long_break: 4,
            auto_start_next: false,
            search_engine: SearchEngine::Google,
            brand_name: DEFAULT_BRAND.to_string(),
            pomodoro_sounds: true,
            notifications: true,
            theme: Theme::Dark,
            show_pomodoro: true,
            show_quick_links: true,
            quick_links: default_links(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = match current {
                serde_json::Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                other => other.get(part)?,
            };
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = match current {
                    serde_json::Value::Array(items) => {
                        let idx = part.parse::<usize>().map_err(|_| unknown())?;
                        items.get_mut(idx).ok_or_else(unknown)?
                    }
                    other => other.get_mut(part).ok_or_else(unknown)?,
                };
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Location of the settings file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        toml::from_str(&content).map_err(|e| load_failed(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Parse a JSON settings record, e.g. one exported from browser storage.
    /// Missing keys take their defaults; the result is normalized and
    /// validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut cfg: Config = serde_json::from_str(json).map_err(|e| ConfigError::InvalidValue {
            key: "<record>".to_string(),
            message: e.to_string(),
        })?;
        cfg.normalize();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key, normalizing and validating the result.
    /// The receiver is left unchanged on error. Call [`Config::save`] to
    /// persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting settings fail validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let mut updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.normalize();
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Trim free-text fields and restore the brand name when blank.
    pub fn normalize(&mut self) {
        self.github_username = self.github_username.trim().to_string();
        self.bg_url = self.bg_url.trim().to_string();
        let brand = self.brand_name.trim();
        self.brand_name = if brand.is_empty() {
            DEFAULT_BRAND.to_string()
        } else {
            brand.to_string()
        };
    }

    /// Check the settings before they are stored.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let positive = |field: &str, value: u64| {
            if value == 0 {
                Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    message: "must be at least 1".to_string(),
                })
            } else {
                Ok(())
            }
        };
        positive("focus_duration", self.focus_duration)?;
        positive("short_break", self.short_break)?;
        positive("long_break", self.long_break)?;
        positive(
            "sessions_before_long_break",
            u64::from(self.sessions_before_long_break),
        )?;

        if self.bg_blur > MAX_BG_BLUR {
            return Err(ValidationError::InvalidValue {
                field: "bg_blur".to_string(),
                message: format!("must be between 0 and {MAX_BG_BLUR}"),
            });
        }
        if self.bg_brightness > MAX_BG_BRIGHTNESS {
            return Err(ValidationError::InvalidValue {
                field: "bg_brightness".to_string(),
                message: format!("must be between 0 and {MAX_BG_BRIGHTNESS}"),
            });
        }
        if !self.github_username.is_empty() {
            github::validate_username(&self.github_username)?;
        }
        for link in &self.quick_links {
            QuickLink::new(&link.name, &link.url, &link.icon)?;
        }
        Ok(())
    }

    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            focus_min: self.focus_duration,
            short_break_min: self.short_break,
            long_break_min: self.long_break,
            sessions_before_long_break: self.sessions_before_long_break,
            sound_enabled: self.pomodoro_sounds,
            auto_start_next: self.auto_start_next,
        }
    }

    /// Brightness as the 0.00–1.00 factor the background filter uses.
    pub fn brightness_factor(&self) -> f64 {
        f64::from(self.bg_brightness.min(MAX_BG_BRIGHTNESS)) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.quick_links.len(), 5);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let parsed: Config = toml::from_str("focus_duration = 50\n").unwrap();
        assert_eq!(parsed.focus_duration, 50);
        assert_eq!(parsed.short_break, 5);
        assert_eq!(parsed.brand_name, "DevTab");
    }

    #[test]
    fn get_reads_flat_and_nested_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("focus_duration").as_deref(), Some("25"));
        assert_eq!(cfg.get("clock_format").as_deref(), Some("24"));
        assert_eq!(cfg.get("theme").as_deref(), Some("dark"));
        assert_eq!(cfg.get("quick_links.0.name").as_deref(), Some("GitHub"));
        assert!(cfg.get("missing_key").is_none());
        assert!(cfg.get("quick_links.9.name").is_none());
    }

    #[test]
    fn set_coerces_by_existing_type() {
        let mut cfg = Config::default();
        cfg.set("show_seconds", "false").unwrap();
        cfg.set("focus_duration", "50").unwrap();
        cfg.set("github_username", " octocat ").unwrap();
        cfg.set("search_engine", "claude").unwrap();
        cfg.set("quick_links.1.icon", "🧠").unwrap();
        assert!(!cfg.show_seconds);
        assert_eq!(cfg.focus_duration, 50);
        assert_eq!(cfg.github_username, "octocat");
        assert_eq!(cfg.search_engine, SearchEngine::Claude);
        assert_eq!(cfg.quick_links[1].icon, "🧠");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("nonexistent_key", "value"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_values_and_leaves_config_unchanged() {
        let mut cfg = Config::default();
        assert!(cfg.set("show_seconds", "not_a_bool").is_err());
        assert!(cfg.set("focus_duration", "0").is_err());
        assert!(cfg.set("bg_brightness", "101").is_err());
        assert!(cfg.set("theme", "purple").is_err());
        assert!(cfg.set("github_username", "-bad-").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn blank_brand_name_falls_back() {
        let mut cfg = Config::default();
        cfg.set("brand_name", "   ").unwrap();
        assert_eq!(cfg.brand_name, "DevTab");
    }

    #[test]
    fn imports_browser_storage_record() {
        let json = r#"{
            "githubUsername": "octocat",
            "clockFormat": "12",
            "focusDuration": 45,
            "pomodoroSounds": false,
            "searchEngine": "stackoverflow",
            "theme": "system",
            "quickLinks": [{ "name": "Docs", "url": "https://docs.rs", "icon": "" }]
        }"#;
        let cfg = Config::from_json(json).unwrap();
        assert_eq!(cfg.github_username, "octocat");
        assert_eq!(cfg.clock_format, ClockFormat::Hour12);
        assert_eq!(cfg.focus_duration, 45);
        assert_eq!(cfg.search_engine, SearchEngine::StackOverflow);
        assert_eq!(cfg.theme, Theme::System);
        assert_eq!(cfg.quick_links.len(), 1);
        assert!(!cfg.timer_settings().sound_enabled);
        assert_eq!(cfg.short_break, 5);
    }

    #[test]
    fn timer_settings_mirror_config() {
        let cfg = Config {
            focus_duration: 50,
            short_break: 10,
            long_break: 30,
            sessions_before_long_break: 3,
            auto_start_next: true,
            ..Config::default()
        };
        let s = cfg.timer_settings();
        assert_eq!(s.focus_min, 50);
        assert_eq!(s.short_break_min, 10);
        assert_eq!(s.long_break_min, 30);
        assert_eq!(s.sessions_before_long_break, 3);
        assert!(s.auto_start_next);
        assert!(s.sound_enabled);
    }

    #[test]
    fn brightness_factor_is_a_fraction() {
        let cfg = Config::default();
        assert_eq!(cfg.brightness_factor(), 0.4);
    }
}
