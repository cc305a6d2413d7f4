use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::engine::config::PlaybackConfig;
use crate::engine::scheduler::{PacingScheduler, PlaybackCell};
use crate::reading::document::Document;
use crate::reading::mode::{ModeObserver, ReadingMode};
use crate::reading::state::{PlaybackSnapshot, PlaybackState};

/// One reading session over one loaded text.
///
/// Owns the playback state, its pacing loop and the mode observer. Dropping
/// the session cancels the loop, so replacing it with a new text never leaves
/// a stale task touching the old state.
pub struct PlaybackSession {
    cell: Arc<PlaybackCell>,
    scheduler: PacingScheduler,
    observer: Option<Arc<dyn ModeObserver>>,
}

impl PlaybackSession {
    pub fn new(document: Arc<Document>, mode: ReadingMode, config: PlaybackConfig) -> Self {
        let count = document.len();
        let cell = PlaybackCell::new(PlaybackState::new(document, mode, config));
        let scheduler = PacingScheduler::new(Arc::clone(&cell), Handle::try_current().ok());

        tracing::debug!(count, mode = mode.label(), tempo = config.initial_tempo, "session loaded");

        Self {
            cell,
            scheduler,
            observer: None,
        }
    }

    /// Starts a session over `text` with the default tempo and step sizes.
    pub fn load_session(text: impl Into<String>, initial_mode: ReadingMode) -> Self {
        Self::new(Document::shared(text), initial_mode, PlaybackConfig::default())
    }

    pub fn with_mode_observer(mut self, observer: Arc<dyn ModeObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Runs the pacing loop on `runtime` instead of the one current at creation.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.scheduler = PacingScheduler::new(Arc::clone(&self.cell), Some(runtime));
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.cell.subscribe()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.cell.snapshot()
    }

    pub fn document(&self) -> Arc<Document> {
        self.cell.read(|state| Arc::clone(state.document()))
    }

    pub fn is_scheduler_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn seek(&mut self, target: i64) {
        self.cell.update(|state| state.seek(target));
    }

    /// Seeks to a percentage of the text (0 = first token, 100 = last).
    pub fn seek_percent(&mut self, percent: u8) {
        self.cell.update(|state| {
            let last = state.last_index() as u64;
            let target = last * u64::from(percent.min(100)) / 100;
            state.seek(i64::try_from(target).unwrap_or(i64::MAX));
        });
    }

    pub fn rewind(&mut self) {
        self.cell.update(PlaybackState::rewind);
    }

    pub fn forward(&mut self) {
        self.cell.update(PlaybackState::forward);
    }

    pub fn speed_up(&mut self) {
        let tempo = self.cell.update(|state| {
            state.speed_up();
            state.tempo()
        });
        tracing::debug!(tempo, "tempo changed");
    }

    pub fn speed_down(&mut self) {
        let tempo = self.cell.update(|state| {
            state.speed_down();
            state.tempo()
        });
        tracing::debug!(tempo, "tempo changed");
    }

    /// Sets the play flag. Going from paused to playing (re)starts the pacing
    /// loop; pausing cancels it.
    pub fn set_playing(&mut self, playing: bool) {
        let was_playing = self.cell.update(|state| {
            let was = state.is_playing();
            state.set_playing(playing);
            was
        });

        match (was_playing, playing) {
            (false, true) => {
                tracing::debug!("play");
                self.scheduler.start();
            }
            (true, false) => {
                tracing::debug!("pause");
                self.scheduler.stop();
            }
            (false, false) => self.scheduler.stop(),
            (true, true) => {}
        }
    }

    pub fn toggle_playing(&mut self) {
        let playing = self.cell.read(PlaybackState::is_playing);
        self.set_playing(!playing);
    }

    pub fn set_mode(&mut self, mode: ReadingMode) {
        let changed = self.cell.update(|state| state.set_mode(mode));
        if !changed {
            return;
        }
        tracing::debug!(mode = mode.label(), "reading mode changed");
        if let Some(observer) = &self.observer {
            observer.on_mode_change(mode);
        }
    }

    pub fn toggle_mode(&mut self) {
        let mode = self.cell.read(PlaybackState::mode);
        self.set_mode(mode.toggled());
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.scheduler.stop();
        tracing::debug!("session closed");
    }
}
