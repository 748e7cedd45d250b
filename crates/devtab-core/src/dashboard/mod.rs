//! The dashboard widgets around the timer: clock, search bar, GitHub graph,
//! quick links and page theme.

pub mod clock;
pub mod github;
pub mod links;
pub mod search;
pub mod theme;

pub use clock::{ClockFace, ClockFormat};
pub use links::{add_link, default_links, edit_link, remove_link, QuickLink};
pub use search::{navigate, SearchEngine};
pub use theme::Theme;
