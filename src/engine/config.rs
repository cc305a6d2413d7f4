// Playback configuration: tempo and step sizes used by the reading core.

/// Tempo a fresh session starts at, in tokens per minute.
pub const DEFAULT_TEMPO: i64 = 60;

/// Tokens skipped by a single rewind or forward.
pub const SEEK_STEP: i64 = 10;

/// Tempo change applied by a single speed-up or speed-down.
pub const SPEED_STEP: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Tempo a new session starts at (default 60)
    pub initial_tempo: i64,

    /// Tokens moved by rewind/forward (default 10)
    pub seek_step: i64,

    /// Tempo delta for speed up/down (default 10). Tempo itself has no floor.
    pub speed_step: i64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_tempo: DEFAULT_TEMPO,
            seek_step: SEEK_STEP,
            speed_step: SPEED_STEP,
        }
    }
}

impl PlaybackConfig {
    pub fn with_tempo(tempo: i64) -> Self {
        Self {
            initial_tempo: tempo,
            ..Self::default()
        }
    }
}
