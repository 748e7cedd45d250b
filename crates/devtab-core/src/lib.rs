//! # DevTab Core Library
//!
//! This library provides the logic behind the DevTab developer dashboard.
//! Every operation is available to the standalone `devtab` CLI; a browser
//! or desktop front-end is a thin presentation layer over the same core.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A Pomodoro state machine driven by an owned,
//!   single-threaded scheduler; commands return effects instead of playing
//!   sounds or drawing
//! - **Icon Resolver**: Pure quick-link icon resolution into an ordered
//!   fallback list
//! - **Dashboard**: Clock, search, GitHub graph, quick links and theme helpers
//! - **Storage**: TOML-based settings record
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Pomodoro state machine
//! - [`resolve`]: Icon candidate resolution
//! - [`Config`]: Dashboard configuration management

pub mod dashboard;
pub mod error;
pub mod events;
pub mod icon;
pub mod storage;
pub mod timer;

pub use dashboard::{ClockFace, ClockFormat, QuickLink, SearchEngine, Theme};
pub use error::{AudioError, ConfigError, NotificationError, ValidationError};
pub use events::Event;
pub use icon::{resolve, IconCandidate, IconCursor, IconResolution, IconSpec};
pub use storage::Config;
pub use timer::{Cue, Effect, TimerEngine, TimerMode, TimerSettings, TimerSnapshot};
