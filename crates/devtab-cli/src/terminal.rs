//! Terminal stand-ins for the dashboard's audio, notification and display.

use std::io::{self, Write};

use devtab_core::error::{AudioError, NotificationError};
use devtab_core::timer::{CuePlayer, Notification, Notifier, Permission, TimerView};
use devtab_core::{Cue, Event, TimerSnapshot};

const BAR_WIDTH: usize = 24;

/// Rings the terminal bell for the cues that mark a transition.
pub struct BellPlayer;

impl CuePlayer for BellPlayer {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        tracing::debug!(%cue, notes = ?cue.notes(), "cue");
        if matches!(cue, Cue::Complete | Cue::Break | Cue::Focus) {
            let mut err = io::stderr();
            err.write_all(b"\x07")?;
            err.flush()?;
        }
        Ok(())
    }
}

/// Writes notifications to stderr when enabled in the settings.
pub struct StderrNotifier<W = io::Stderr> {
    enabled: bool,
    out: W,
}

impl StderrNotifier {
    pub fn new(enabled: bool) -> Self {
        Self::with_writer(enabled, io::stderr())
    }
}

impl<W: Write> StderrNotifier<W> {
    pub fn with_writer(enabled: bool, out: W) -> Self {
        Self { enabled, out }
    }
}

impl<W: Write> Notifier for StderrNotifier<W> {
    fn permission(&self) -> Permission {
        if self.enabled {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn show(&mut self, n: &Notification) -> Result<(), NotificationError> {
        writeln!(self.out, "\n[{}] {}", n.title, n.body)
            .and_then(|()| self.out.flush())
            .map_err(|e| NotificationError::ShowFailed(e.to_string()))
    }
}

/// Redraws a single status line.
pub struct StatusLine<W = io::Stdout> {
    out: W,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StatusLine<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    fn draw(&mut self, s: &TimerSnapshot) -> io::Result<()> {
        let filled = ((s.progress_pct / 100.0) * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        let state = if s.is_running { ">" } else { "||" };
        write!(
            self.out,
            "\r{:<12} {} [{}{}] {:>3.0}% {:<2} #{}",
            s.label,
            s.display,
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            s.progress_pct,
            state,
            s.completed_focus_sessions,
        )?;
        self.out.flush()
    }
}

impl<W: Write> TimerView for StatusLine<W> {
    fn render(&mut self, s: &TimerSnapshot) {
        if let Err(e) = self.draw(s) {
            tracing::debug!(error = %e, "status line not drawn");
        }
    }

    fn event(&mut self, event: &Event) {
        tracing::info!(?event, "timer event");
        if let Event::ModeAdvanced { .. } = event {
            if let Err(e) = writeln!(self.out) {
                tracing::debug!(error = %e, "status line not drawn");
            }
        }
    }
}
