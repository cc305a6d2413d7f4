use serde::{Deserialize, Serialize};

use crate::reading::ReadingMode;

/// Most recent entries kept in the reading history.
pub const HISTORY_LIMIT: usize = 25;

const PREVIEW_MAX_CHARS: usize = 80;

/// Persisted application preferences.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub last_reading_mode: ReadingMode,
    pub history: Vec<HistoryItem>,
}

/// A previously read text, newest first in [`AppConfig::history`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
    /// Full text, so the entry reopens even if the source is gone.
    #[serde(default)]
    pub text: String,
    /// Single-line detail shown in the history list.
    #[serde(default)]
    pub preview: Option<String>,
    pub added_at_epoch_ms: u64,
}

impl HistoryItem {
    /// Whether `other` refers to the same source and should be replaced by it.
    fn same_source(&self, other: &HistoryItem) -> bool {
        match (&self.uri, &other.uri) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.name == other.name,
            _ => false,
        }
    }

    /// Detail line: the stored preview, else the uri, else the start of the text.
    pub fn detail_line(&self) -> String {
        self.preview
            .clone()
            .or_else(|| self.uri.clone())
            .unwrap_or_else(|| single_line_preview(&self.text))
    }
}

impl AppConfig {
    /// Inserts `item` at the front, dropping older entries for the same source
    /// and anything past [`HISTORY_LIMIT`].
    pub fn add_history(&mut self, item: HistoryItem) {
        let older: Vec<HistoryItem> = std::mem::take(&mut self.history)
            .into_iter()
            .filter(|existing| !existing.same_source(&item))
            .take(HISTORY_LIMIT - 1)
            .collect();
        self.history = std::iter::once(item).chain(older).collect();
    }

    pub fn remove_history(&mut self, index: usize) -> Option<HistoryItem> {
        (index < self.history.len()).then(|| self.history.remove(index))
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

/// Collapses whitespace to single spaces and truncates with an ellipsis.
pub fn single_line_preview(text: &str) -> String {
    let single = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single.chars().count() <= PREVIEW_MAX_CHARS {
        return single;
    }
    let truncated: String = single.chars().take(PREVIEW_MAX_CHARS).collect();
    format!("{}…", truncated.trim_end())
}
