use serde::{Deserialize, Serialize};

/// One of the three Pomodoro phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub const ALL: [TimerMode; 3] = [TimerMode::Focus, TimerMode::ShortBreak, TimerMode::LongBreak];

    /// Label shown above the countdown.
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Focus => "Focus Time",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, TimerMode::Focus)
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TimerMode::Focus => "focus",
            TimerMode::ShortBreak => "short_break",
            TimerMode::LongBreak => "long_break",
        })
    }
}

impl std::str::FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "focus" => Ok(TimerMode::Focus),
            "break" | "short_break" | "short-break" | "shortbreak" => Ok(TimerMode::ShortBreak),
            "longbreak" | "long_break" | "long-break" => Ok(TimerMode::LongBreak),
            other => Err(format!("unknown timer mode: {other}")),
        }
    }
}

/// The slice of configuration the timer engine reads.
///
/// Durations are whole minutes. The engine trusts these values; validation
/// happens where the settings are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub focus_min: u64,
    pub short_break_min: u64,
    pub long_break_min: u64,
    /// Every n-th completed focus period is followed by a long break.
    pub sessions_before_long_break: u32,
    pub sound_enabled: bool,
    /// Start the next period immediately after the mode-advance.
    pub auto_start_next: bool,
}

impl TimerSettings {
    pub fn duration_min(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Focus => self.focus_min,
            TimerMode::ShortBreak => self.short_break_min,
            TimerMode::LongBreak => self.long_break_min,
        }
    }

    /// Duration of `mode` in seconds.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn duration_secs(&self, mode: TimerMode) -> u64 {
        self.duration_min(mode).saturating_mul(60)
    }

    /// Mode that follows a completed focus period, given the new session count.
    pub fn break_after(&self, completed_focus_sessions: u32) -> TimerMode {
        let every = self.sessions_before_long_break.max(1);
        if completed_focus_sessions % every == 0 {
            TimerMode::LongBreak
        } else {
            TimerMode::ShortBreak
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_min: 25,
            short_break_min: 5,
            long_break_min: 15,
            sessions_before_long_break: 4,
            sound_enabled: true,
            auto_start_next: false,
        }
    }
}
