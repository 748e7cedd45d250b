//! Side effects requested by the timer engine.
//!
//! Engine commands are pure state transitions that return a list of
//! [`Effect`]s. [`dispatch`] hands them to the collaborators in order.

use serde::{Deserialize, Serialize};

use super::cue::{Cue, CuePlayer};
use super::engine::TimerSnapshot;
use crate::error::NotificationError;
use crate::events::Event;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PlayCue(Cue),
    Notify(Notification),
    Render(TimerSnapshot),
    Emit(Event),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    Default,
}

/// System notification service.
pub trait Notifier {
    fn permission(&self) -> Permission;
    fn show(&mut self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Presentation layer for timer state.
pub trait TimerView {
    fn render(&mut self, snapshot: &TimerSnapshot);

    fn event(&mut self, _event: &Event) {}
}

/// Run effects against the collaborators.
///
/// Audio and notification failures are logged and dropped; they never stop
/// the remaining effects from being applied.
pub fn dispatch(
    effects: Vec<Effect>,
    cues: &mut dyn CuePlayer,
    notifier: &mut dyn Notifier,
    view: &mut dyn TimerView,
) {
    for effect in effects {
        match effect {
            Effect::PlayCue(cue) => {
                if let Err(e) = cues.play(cue) {
                    tracing::warn!(%cue, error = %e, "sound not available");
                }
            }
            Effect::Notify(n) => {
                if notifier.permission() != Permission::Granted {
                    tracing::debug!(title = %n.title, "notification skipped without permission");
                    continue;
                }
                if let Err(e) = notifier.show(&n) {
                    tracing::debug!(error = %e, "notification failed");
                }
            }
            Effect::Render(snapshot) => view.render(&snapshot),
            Effect::Emit(event) => view.event(&event),
        }
    }
}
