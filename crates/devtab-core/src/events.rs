use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerMode;

/// Every timer state change produces an Event.
/// The presentation layer renders them; the CLI prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ModeChanged {
        mode: TimerMode,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    TimerCompleted {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    /// The deferred mode-advance after a completion fired.
    ModeAdvanced {
        from: TimerMode,
        to: TimerMode,
        completed_focus_sessions: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::ModeChanged { at, .. }
            | Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::TimerReset { at, .. }
            | Event::TimerCompleted { at, .. }
            | Event::ModeAdvanced { at, .. } => *at,
        }
    }
}
