mod cue;
mod effect;
mod engine;
mod mode;
mod scheduler;

pub use cue::{render as render_cue, Cue, CuePlayer, Note, SilentPlayer};
pub use effect::{dispatch, Effect, Notification, Notifier, Permission, TimerView};
pub use engine::{TimerEngine, TimerSnapshot, ADVANCE_DELAY, TICK_INTERVAL};
pub use mode::{TimerMode, TimerSettings};
pub use scheduler::{Scheduler, TimerHandle};
