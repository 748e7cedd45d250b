//! Pomodoro timer engine.
//!
//! The engine is a state machine over three modes crossed with
//! running/paused. It owns a [`Scheduler`] but never sleeps: the caller
//! feeds elapsed time through [`TimerEngine::advance`], which fires the
//! once-per-second ticker and the deferred mode-advance in deadline order.
//!
//! ## State Transitions
//!
//! ```text
//! Focus ──expire──> (1s) ──> ShortBreak | LongBreak ──expire──> (1s) ──> Focus
//!   each mode: Paused <-> Running
//! ```
//!
//! Every command returns the [`Effect`]s it produced; nothing is played or
//! rendered from inside the engine.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(settings);
//! let effects = engine.start();
//! // In the event loop:
//! let effects = engine.advance(elapsed);
//! dispatch(effects, &mut player, &mut notifier, &mut view);
//! ```

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::cue::Cue;
use super::effect::{Effect, Notification};
use super::mode::{TimerMode, TimerSettings};
use super::scheduler::{Scheduler, TimerHandle};
use crate::events::Event;

/// Period of the countdown ticker.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Delay between a completion and the automatic mode change, so the
/// completion and break/focus cues do not overlap.
pub const ADVANCE_DELAY: Duration = Duration::from_secs(1);
/// The tick cue plays while this many seconds or fewer remain.
const TICK_CUE_WINDOW_SECS: u64 = 5;

/// Everything the presentation layer needs to draw the timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub label: String,
    pub remaining_secs: u64,
    pub total_secs: u64,
    /// `mm:ss`
    pub display: String,
    /// 0.0 .. 100.0 elapsed within the current mode.
    pub progress_pct: f64,
    pub is_running: bool,
    pub completed_focus_sessions: u32,
}

#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    handle: TimerHandle,
    completed: TimerMode,
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    settings: TimerSettings,
    mode: TimerMode,
    time_left_secs: u64,
    total_secs: u64,
    completed_focus_sessions: u32,
    scheduler: Scheduler,
    /// At most one ticker; the engine is running exactly while this is set.
    ticker: Option<TimerHandle>,
    /// At most one deferred mode-advance.
    pending_advance: Option<PendingAdvance>,
}

impl TimerEngine {
    /// Create an engine in paused `Focus` mode with the configured duration.
    pub fn new(settings: TimerSettings) -> Self {
        let total_secs = settings.duration_secs(TimerMode::Focus);
        Self {
            settings,
            mode: TimerMode::Focus,
            time_left_secs: total_secs,
            total_secs,
            completed_focus_sessions: 0,
            scheduler: Scheduler::new(),
            ticker: None,
            pending_advance: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn time_left_secs(&self) -> u64 {
        self.time_left_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn completed_focus_sessions(&self) -> u32 {
        self.completed_focus_sessions
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// True between a completion and its mode-advance.
    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance.is_some()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Time until the next scheduled callback, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        let now = self.scheduler.now_ms();
        self.scheduler
            .next_deadline_ms()
            .map(|due| Duration::from_millis(due.saturating_sub(now)))
    }

    /// 0.0 .. 100.0 progress within the current mode.
    pub fn progress_pct(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        (self.total_secs - self.time_left_secs) as f64 / self.total_secs as f64 * 100.0
    }

    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.time_left_secs / 60, self.time_left_secs % 60)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            label: self.mode.label().to_string(),
            remaining_secs: self.time_left_secs,
            total_secs: self.total_secs,
            display: self.display(),
            progress_pct: self.progress_pct(),
            is_running: self.is_running(),
            completed_focus_sessions: self.completed_focus_sessions,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch to `mode`, paused, with a full countdown.
    ///
    /// Cancels the ticker and any pending mode-advance.
    pub fn set_mode(&mut self, mode: TimerMode) -> Vec<Effect> {
        self.cancel_pending_advance();
        self.enter_mode(mode)
    }

    pub fn start(&mut self) -> Vec<Effect> {
        if self.is_running() {
            return Vec::new();
        }
        if self.time_left_secs == 0 {
            tracing::debug!(mode = %self.mode, "start ignored, period already expired");
            return Vec::new();
        }

        self.ticker = Some(self.scheduler.every(TICK_INTERVAL));
        tracing::debug!(mode = %self.mode, remaining = self.time_left_secs, "timer started");

        let mut effects = Vec::with_capacity(3);
        self.push_cue(&mut effects, Cue::Start);
        effects.push(Effect::Emit(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            at: Utc::now(),
        }));
        effects.push(Effect::Render(self.snapshot()));
        effects
    }

    pub fn pause(&mut self) -> Vec<Effect> {
        if !self.stop_ticker() {
            return Vec::new();
        }
        tracing::debug!(mode = %self.mode, remaining = self.time_left_secs, "timer paused");

        let mut effects = Vec::with_capacity(3);
        self.push_cue(&mut effects, Cue::Pause);
        effects.push(Effect::Emit(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            at: Utc::now(),
        }));
        effects.push(Effect::Render(self.snapshot()));
        effects
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self) -> Vec<Effect> {
        if self.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Restore the full countdown of the current mode, paused. No sound.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.stop_ticker();
        self.cancel_pending_advance();
        self.time_left_secs = self.total_secs;
        vec![
            Effect::Emit(Event::TimerReset {
                mode: self.mode,
                at: Utc::now(),
            }),
            Effect::Render(self.snapshot()),
        ]
    }

    /// One second of countdown. No-op unless running.
    pub fn tick(&mut self) -> Vec<Effect> {
        if !self.is_running() {
            return Vec::new();
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(1);

        let mut effects = vec![Effect::Render(self.snapshot())];
        if (1..=TICK_CUE_WINDOW_SECS).contains(&self.time_left_secs) {
            self.push_cue(&mut effects, Cue::Tick);
        }
        if self.time_left_secs == 0 {
            effects.extend(self.complete());
        }
        effects
    }

    /// Finish the current period and schedule the mode-advance.
    pub fn complete(&mut self) -> Vec<Effect> {
        self.stop_ticker();
        self.cancel_pending_advance();
        self.time_left_secs = 0;
        tracing::debug!(mode = %self.mode, "period complete");

        let mut effects = vec![Effect::Render(self.snapshot())];
        self.push_cue(&mut effects, Cue::Complete);
        effects.push(Effect::Notify(Notification {
            title: "Pomodoro Complete!".to_string(),
            body: if self.mode == TimerMode::Focus {
                "Time for a break!".to_string()
            } else {
                "Ready to focus?".to_string()
            },
        }));
        effects.push(Effect::Emit(Event::TimerCompleted {
            mode: self.mode,
            at: Utc::now(),
        }));

        self.pending_advance = Some(PendingAdvance {
            handle: self.scheduler.once(ADVANCE_DELAY),
            completed: self.mode,
        });
        effects
    }

    /// Replace the engine's copy of the settings.
    ///
    /// Re-enters the active mode when its duration changed.
    pub fn update_settings(&mut self, settings: TimerSettings) -> Vec<Effect> {
        let changed = settings.duration_secs(self.mode) != self.settings.duration_secs(self.mode);
        self.settings = settings;
        if changed {
            self.set_mode(self.mode)
        } else {
            Vec::new()
        }
    }

    /// Move the clock forward by `elapsed`, firing due callbacks in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Effect> {
        let until = self
            .scheduler
            .now_ms()
            .saturating_add(elapsed.as_millis() as u64);
        let mut effects = Vec::new();

        while let Some(handle) = self.scheduler.pop_due(until) {
            if self.ticker == Some(handle) {
                effects.extend(self.tick());
            } else if let Some(pending) = self.pending_advance.filter(|p| p.handle == handle) {
                self.pending_advance = None;
                effects.extend(self.apply_advance(pending.completed));
            }
        }
        self.scheduler.set_now(until);
        effects
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter_mode(&mut self, mode: TimerMode) -> Vec<Effect> {
        self.stop_ticker();
        self.mode = mode;
        self.total_secs = self.settings.duration_secs(mode);
        self.time_left_secs = self.total_secs;
        vec![
            Effect::Emit(Event::ModeChanged {
                mode,
                total_secs: self.total_secs,
                at: Utc::now(),
            }),
            Effect::Render(self.snapshot()),
        ]
    }

    fn apply_advance(&mut self, completed: TimerMode) -> Vec<Effect> {
        let next = if completed == TimerMode::Focus {
            self.completed_focus_sessions += 1;
            self.settings.break_after(self.completed_focus_sessions)
        } else {
            TimerMode::Focus
        };
        tracing::debug!(from = %completed, to = %next, sessions = self.completed_focus_sessions, "mode advance");

        let mut effects = self.enter_mode(next);
        effects.push(Effect::Emit(Event::ModeAdvanced {
            from: completed,
            to: next,
            completed_focus_sessions: self.completed_focus_sessions,
            at: Utc::now(),
        }));
        self.push_cue(&mut effects, if next.is_break() { Cue::Break } else { Cue::Focus });
        if self.settings.auto_start_next {
            effects.extend(self.start());
        }
        effects
    }

    /// Returns true if a ticker was running.
    fn stop_ticker(&mut self) -> bool {
        match self.ticker.take() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }

    fn cancel_pending_advance(&mut self) {
        if let Some(pending) = self.pending_advance.take() {
            self.scheduler.cancel(pending.handle);
        }
    }

    fn push_cue(&self, effects: &mut Vec<Effect>, cue: Cue) {
        if self.settings.sound_enabled {
            effects.push(Effect::PlayCue(cue));
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}
