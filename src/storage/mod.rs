//! Persistence for user preferences: the last reading mode and the history
//! of texts read, stored as one JSON file in the data directory.

pub mod config;
pub mod json;
pub mod paths;

pub use config::{AppConfig, HistoryItem, HISTORY_LIMIT};
pub use json::{ConfigStore, ModePersister, SharedStore};
