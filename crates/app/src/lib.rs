#![warn(clippy::pedantic)]

pub mod log;
pub mod service;
pub mod view;

pub use service::Service;

/// Key under which the settings are stored.
pub const KEY_SETTINGS: &str = "simple_531_data_v2";
/// Key under which the log entries are stored.
pub const KEY_LOG: &str = "log";
