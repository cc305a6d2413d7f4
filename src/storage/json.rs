//! JSON file-backed config store.
//!
//! The whole [`AppConfig`] is kept in memory and rewritten on every change,
//! via write-to-temp + rename so a crash never leaves a truncated file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

use crate::engine::error::{PacerError, Result};
use crate::input::LoadedDocument;
use crate::reading::{ModeObserver, ReadingMode};
use crate::storage::config::{single_line_preview, AppConfig, HistoryItem};

pub struct ConfigStore {
    file_path: PathBuf,
    config: AppConfig,
}

impl ConfigStore {
    /// Opens the store at `file_path`, creating parent directories.
    ///
    /// A missing or unreadable file starts from defaults; the next write
    /// replaces it.
    pub fn open(file_path: PathBuf) -> Result<Self> {
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let config = if file_path.exists() {
            match Self::load_from_file(&file_path) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(path = ?file_path, error = %err, "ignoring unreadable config");
                    AppConfig::default()
                }
            }
        } else {
            AppConfig::default()
        };

        tracing::debug!(
            path = ?file_path,
            history = config.history.len(),
            mode = config.last_reading_mode.label(),
            "config store opened"
        );

        Ok(Self { file_path, config })
    }

    fn load_from_file(path: &Path) -> Result<AppConfig> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| PacerError::Storage(format!("failed to parse JSON: {e}")))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn set_last_reading_mode(&mut self, mode: ReadingMode) -> Result<()> {
        self.config.last_reading_mode = mode;
        self.persist()
    }

    pub fn add_history(&mut self, item: HistoryItem) -> Result<()> {
        self.config.add_history(item);
        self.persist()
    }

    /// Records a freshly loaded document at the top of the history.
    pub fn record(&mut self, doc: &LoadedDocument) -> Result<()> {
        let preview = doc.uri.is_none().then(|| single_line_preview(&doc.text));
        self.add_history(HistoryItem {
            name: doc.name.clone(),
            uri: doc.uri.clone(),
            text: doc.text.clone(),
            preview,
            added_at_epoch_ms: now_epoch_ms(),
        })
    }

    pub fn remove_history(&mut self, index: usize) -> Result<Option<HistoryItem>> {
        let removed = self.config.remove_history(index);
        if removed.is_some() {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.config.clear_history();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.config)
            .map_err(|e| PacerError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::trace!(path = ?self.file_path, "config saved");
        Ok(())
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

pub type SharedStore = Arc<Mutex<ConfigStore>>;

/// Persists the last-used reading mode whenever a session switches mode.
#[derive(Clone)]
pub struct ModePersister(pub SharedStore);

impl ModeObserver for ModePersister {
    fn on_mode_change(&self, mode: ReadingMode) {
        if let Err(err) = self.0.lock().set_last_reading_mode(mode) {
            tracing::warn!(error = %err, "failed to persist reading mode");
        }
    }
}
