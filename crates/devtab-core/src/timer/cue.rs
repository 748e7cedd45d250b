//! Audio cues played on timer transitions.
//!
//! Each cue is a short sequence of sine notes. [`render`] turns a cue into
//! mono samples; playing them is left to a [`CuePlayer`].

use serde::{Deserialize, Serialize};

use crate::error::AudioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Start,
    Pause,
    Complete,
    Break,
    Focus,
    Tick,
}

/// A single sine note, offsets in seconds from the start of the cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq_hz: f32,
    pub start_s: f32,
    pub duration_s: f32,
}

const fn note(freq_hz: f32, start_s: f32, duration_s: f32) -> Note {
    Note {
        freq_hz,
        start_s,
        duration_s,
    }
}

const START: &[Note] = &[note(440.0, 0.0, 0.1), note(554.0, 0.1, 0.1), note(659.0, 0.2, 0.15)];
const PAUSE: &[Note] = &[note(520.0, 0.0, 0.15), note(440.0, 0.12, 0.15)];
const COMPLETE: &[Note] = &[
    note(523.0, 0.0, 0.15),
    note(659.0, 0.15, 0.15),
    note(784.0, 0.3, 0.2),
    note(1047.0, 0.45, 0.3),
];
const BREAK: &[Note] = &[note(396.0, 0.0, 0.2), note(352.0, 0.15, 0.2), note(330.0, 0.3, 0.3)];
const FOCUS: &[Note] = &[
    note(330.0, 0.0, 0.1),
    note(392.0, 0.1, 0.1),
    note(523.0, 0.2, 0.15),
    note(659.0, 0.35, 0.2),
];
const TICK: &[Note] = &[note(800.0, 0.0, 0.05)];

/// Length of the linear fade-in at the start of every note.
const ATTACK_S: f32 = 0.02;
/// Gain each note decays to by its end.
const FLOOR_GAIN: f32 = 0.01;
/// Oscillators keep running this long past the note end.
const RELEASE_S: f32 = 0.1;

impl Cue {
    pub fn notes(self) -> &'static [Note] {
        match self {
            Cue::Start => START,
            Cue::Pause => PAUSE,
            Cue::Complete => COMPLETE,
            Cue::Break => BREAK,
            Cue::Focus => FOCUS,
            Cue::Tick => TICK,
        }
    }

    pub fn volume(self) -> f32 {
        match self {
            Cue::Tick => 0.1,
            _ => 0.3,
        }
    }

    /// Total length including the release tail of the last note.
    pub fn duration_s(self) -> f32 {
        self.notes()
            .iter()
            .map(|n| n.start_s + n.duration_s + RELEASE_S)
            .fold(0.0, f32::max)
    }
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Cue::Start => "start",
            Cue::Pause => "pause",
            Cue::Complete => "complete",
            Cue::Break => "break",
            Cue::Focus => "focus",
            Cue::Tick => "tick",
        };
        f.write_str(name)
    }
}

/// Render `cue` to mono `f32` samples at `sample_rate`.
///
/// Notes overlap additively. Each note ramps linearly to the cue volume over
/// 20 ms, then decays exponentially to 0.01 at its end and is silent after.
pub fn render(cue: Cue, sample_rate: u32) -> Vec<f32> {
    let rate = sample_rate as f32;
    let len = (cue.duration_s() * rate).ceil() as usize;
    let mut out = vec![0.0_f32; len];
    let volume = cue.volume();

    for n in cue.notes() {
        let first = (n.start_s * rate) as usize;
        let last = ((n.start_s + n.duration_s) * rate).ceil() as usize;
        for (i, sample) in out.iter_mut().enumerate().take(last.min(len)).skip(first) {
            let t = i as f32 / rate - n.start_s;
            let gain = envelope(t, n.duration_s, volume);
            *sample += gain * (std::f32::consts::TAU * n.freq_hz * t).sin();
        }
    }
    out
}

fn envelope(t: f32, duration_s: f32, volume: f32) -> f32 {
    if t < 0.0 || t > duration_s {
        return 0.0;
    }
    if t < ATTACK_S {
        return volume * t / ATTACK_S;
    }
    let decay_span = (duration_s - ATTACK_S).max(f32::EPSILON);
    let progress = (t - ATTACK_S) / decay_span;
    volume * (FLOOR_GAIN / volume).powf(progress)
}

/// Plays cues. Calls are fire-and-forget from the engine's point of view.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
}

/// A player that discards every cue.
#[derive(Debug, Default)]
pub struct SilentPlayer;

impl CuePlayer for SilentPlayer {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }
}
