use std::ops::Range;
use std::sync::Arc;

use crate::engine::config::PlaybackConfig;
use crate::reading::document::Document;
use crate::reading::mode::{ModeController, ReadingMode};
use crate::reading::timing::progress_percent;

/// Observable view of a [`PlaybackState`], published after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    pub position: usize,
    pub count: usize,
    pub current_token: String,
    pub progress: u8,
    pub tempo: i64,
    pub is_playing: bool,
    pub mode: ReadingMode,
    /// Byte range of the current token in the source text.
    pub highlight: Option<Range<usize>>,
}

/// Position, tempo and play flag over one loaded document.
///
/// `current_token` and `progress` are derived from `position` and are
/// recomputed inside every mutation that moves it, so the three never disagree.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    document: Arc<Document>,
    count: usize,
    position: usize,
    tempo: i64,
    is_playing: bool,
    current_token: String,
    progress: u8,
    mode: ModeController,
    config: PlaybackConfig,
}

impl PlaybackState {
    pub fn new(document: Arc<Document>, mode: ReadingMode, config: PlaybackConfig) -> Self {
        let count = document.len();
        let mut state = Self {
            document,
            count,
            position: 0,
            tempo: config.initial_tempo,
            is_playing: false,
            current_token: String::new(),
            progress: 0,
            mode: ModeController::new(mode),
            config,
        };
        state.refresh_derived();
        state
    }

    pub fn initialize(document: Arc<Document>, mode: ReadingMode) -> Self {
        Self::new(document, mode, PlaybackConfig::default())
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn tempo(&self) -> i64 {
        self.tempo
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_token(&self) -> &str {
        &self.current_token
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn mode(&self) -> ReadingMode {
        self.mode.mode()
    }

    pub fn last_index(&self) -> usize {
        self.count.saturating_sub(1)
    }

    /// Whether the position sits on the final token (always true when empty).
    pub fn at_end(&self) -> bool {
        self.position >= self.last_index()
    }

    /// Moves to `target`, clamped into `[0, count-1]` (0 for an empty document).
    pub fn seek(&mut self, target: i64) {
        let last = i64::try_from(self.last_index()).unwrap_or(i64::MAX);
        self.position = target.clamp(0, last) as usize;
        self.refresh_derived();
    }

    pub fn rewind(&mut self) {
        self.seek(self.position_i64().saturating_sub(self.config.seek_step));
    }

    pub fn forward(&mut self) {
        self.seek(self.position_i64().saturating_add(self.config.seek_step));
    }

    /// Advances one token; returns false when already on the last one.
    pub fn step(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.seek(self.position_i64() + 1);
        true
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    pub fn speed_up(&mut self) {
        self.tempo = self.tempo.saturating_add(self.config.speed_step);
    }

    pub fn speed_down(&mut self) {
        self.tempo = self.tempo.saturating_sub(self.config.speed_step);
    }

    /// Returns whether the mode changed.
    pub fn set_mode(&mut self, mode: ReadingMode) -> bool {
        self.mode.set(mode)
    }

    pub fn highlight(&self) -> Option<Range<usize>> {
        self.document
            .token(self.position)
            .map(|token| token.span.clone())
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            position: self.position,
            count: self.count,
            current_token: self.current_token.clone(),
            progress: self.progress,
            tempo: self.tempo,
            is_playing: self.is_playing,
            mode: self.mode(),
            highlight: self.highlight(),
        }
    }

    fn position_i64(&self) -> i64 {
        i64::try_from(self.position).unwrap_or(i64::MAX)
    }

    fn refresh_derived(&mut self) {
        self.current_token = self
            .document
            .token(self.position)
            .map(|token| token.text.clone())
            .unwrap_or_default();
        self.progress = progress_percent(self.position, self.count);
    }
}
