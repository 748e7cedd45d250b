//! Integration tests for the Pomodoro engine.
//!
//! Drives the engine through full focus/break cycles on virtual time and
//! dispatches its effects to recording collaborators.

use std::time::Duration;

use devtab_core::error::{AudioError, NotificationError};
use devtab_core::timer::{
    dispatch, CuePlayer, Notification, Notifier, Permission, TimerView, ADVANCE_DELAY,
};
use devtab_core::{Cue, Effect, Event, TimerEngine, TimerMode, TimerSettings, TimerSnapshot};
use proptest::prelude::*;

fn quick_settings() -> TimerSettings {
    TimerSettings {
        focus_min: 1,
        short_break_min: 1,
        long_break_min: 2,
        ..TimerSettings::default()
    }
}

/// Run the active period to completion and let the mode-advance fire.
fn finish_period(engine: &mut TimerEngine) -> Vec<Effect> {
    let mut effects = engine.start();
    effects.extend(engine.advance(Duration::from_secs(engine.time_left_secs())));
    effects.extend(engine.advance(ADVANCE_DELAY));
    effects
}

#[test]
fn focus_duration_sets_countdown() {
    for f in [1, 25, 50, 90] {
        let mut engine = TimerEngine::new(TimerSettings {
            focus_min: f,
            ..TimerSettings::default()
        });
        engine.set_mode(TimerMode::ShortBreak);
        engine.set_mode(TimerMode::Focus);
        assert_eq!(engine.time_left_secs(), f * 60);
        assert_eq!(engine.total_secs(), f * 60);
    }
}

#[test]
fn four_focus_completions_end_in_long_break() {
    let mut engine = TimerEngine::new(quick_settings());
    let mut breaks = Vec::new();

    for _ in 0..4 {
        assert_eq!(engine.mode(), TimerMode::Focus);
        finish_period(&mut engine);
        breaks.push(engine.mode());
        if engine.mode() == TimerMode::ShortBreak {
            finish_period(&mut engine);
        }
    }

    assert_eq!(
        breaks,
        vec![
            TimerMode::ShortBreak,
            TimerMode::ShortBreak,
            TimerMode::ShortBreak,
            TimerMode::LongBreak,
        ]
    );
    assert_eq!(engine.completed_focus_sessions(), 4);
    assert_eq!(engine.total_secs(), 2 * 60);
}

#[test]
fn every_advance_lands_paused() {
    let mut engine = TimerEngine::new(quick_settings());
    for _ in 0..6 {
        finish_period(&mut engine);
        assert!(!engine.is_running());
        assert_eq!(engine.time_left_secs(), engine.total_secs());
    }
}

#[test]
fn completion_emits_events_in_order() {
    let mut engine = TimerEngine::new(quick_settings());
    let effects = finish_period(&mut engine);
    let events: Vec<&Event> = effects
        .iter()
        .filter_map(|e| match e {
            Effect::Emit(ev) => Some(ev),
            _ => None,
        })
        .collect();

    assert!(matches!(events[0], Event::TimerStarted { mode: TimerMode::Focus, .. }));
    assert!(matches!(events[1], Event::TimerCompleted { mode: TimerMode::Focus, .. }));
    assert!(matches!(events[2], Event::ModeChanged { mode: TimerMode::ShortBreak, .. }));
    assert!(matches!(
        events[3],
        Event::ModeAdvanced {
            from: TimerMode::Focus,
            to: TimerMode::ShortBreak,
            completed_focus_sessions: 1,
            ..
        }
    ));
    assert_eq!(events.len(), 4);
}

#[test]
fn events_serialize_with_type_tag() {
    let mut engine = TimerEngine::new(quick_settings());
    let effects = engine.start();
    let event = effects
        .iter()
        .find_map(|e| match e {
            Effect::Emit(ev) => Some(ev.clone()),
            _ => None,
        })
        .unwrap();
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "TimerStarted");
    assert_eq!(json["mode"], "focus");
    assert_eq!(json["remaining_secs"], 60);
}

// ── Collaborators ────────────────────────────────────────────────────

#[derive(Default)]
struct FlakyAudio {
    played: Vec<Cue>,
}

impl CuePlayer for FlakyAudio {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        if cue == Cue::Tick {
            return Err(AudioError::Unavailable("tick sample missing".into()));
        }
        self.played.push(cue);
        Ok(())
    }
}

struct Desktop {
    shown: Vec<Notification>,
}

impl Notifier for Desktop {
    fn permission(&self) -> Permission {
        Permission::Granted
    }
    fn show(&mut self, n: &Notification) -> Result<(), NotificationError> {
        self.shown.push(n.clone());
        Ok(())
    }
}

#[derive(Default)]
struct Screen {
    frames: Vec<TimerSnapshot>,
}

impl TimerView for Screen {
    fn render(&mut self, snapshot: &TimerSnapshot) {
        self.frames.push(snapshot.clone());
    }
}

#[test]
fn failing_cues_never_stall_the_cycle() {
    let mut engine = TimerEngine::new(quick_settings());
    let mut audio = FlakyAudio::default();
    let mut desktop = Desktop { shown: vec![] };
    let mut screen = Screen::default();

    dispatch(finish_period(&mut engine), &mut audio, &mut desktop, &mut screen);

    assert_eq!(audio.played, vec![Cue::Start, Cue::Complete, Cue::Break]);
    assert_eq!(desktop.shown.len(), 1);
    assert_eq!(desktop.shown[0].title, "Pomodoro Complete!");
    assert_eq!(engine.mode(), TimerMode::ShortBreak);

    let last = screen.frames.last().unwrap();
    assert_eq!(last.mode, TimerMode::ShortBreak);
    assert_eq!(last.display, "01:00");
    assert_eq!(last.progress_pct, 0.0);
    // One frame per tick plus start, completion and mode change.
    assert_eq!(screen.frames.len(), 60 + 3);
}

proptest! {
    #[test]
    fn ticks_count_down_and_complete_exactly_once(
        (t, n) in (1u64..=180).prop_flat_map(|t| (Just(t), 0..=t))
    ) {
        let mut engine = TimerEngine::new(TimerSettings {
            focus_min: 3,
            ..TimerSettings::default()
        });
        engine.start();
        engine.advance(Duration::from_secs(180 - t));
        prop_assert_eq!(engine.time_left_secs(), t);

        let mut completions = 0;
        for _ in 0..n {
            let effects = engine.tick();
            completions += effects
                .iter()
                .filter(|e| matches!(e, Effect::Emit(Event::TimerCompleted { .. })))
                .count();
        }
        prop_assert_eq!(engine.time_left_secs(), t - n);
        prop_assert_eq!(completions, usize::from(n == t));
        prop_assert!(engine.time_left_secs() <= engine.total_secs());
    }

    #[test]
    fn pause_is_idempotent(elapsed in 0u64..60) {
        let mut engine = TimerEngine::new(quick_settings());
        engine.start();
        engine.advance(Duration::from_secs(elapsed));
        engine.pause();
        let once = engine.snapshot();
        prop_assert!(engine.pause().is_empty());
        prop_assert_eq!(engine.snapshot(), once);
    }
}
