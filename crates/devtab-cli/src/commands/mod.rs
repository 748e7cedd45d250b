pub mod clock;
pub mod config;
pub mod github;
pub mod icon;
pub mod links;
pub mod search;
pub mod timer;
