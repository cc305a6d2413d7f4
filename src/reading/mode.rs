use serde::{Deserialize, Serialize};

/// How the current token is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingMode {
    /// One word at a time, anchored at the optimal viewing position.
    #[default]
    Focus,
    /// Surrounding prose with the current word highlighted.
    Guided,
}

impl ReadingMode {
    pub fn toggled(self) -> Self {
        match self {
            ReadingMode::Focus => ReadingMode::Guided,
            ReadingMode::Guided => ReadingMode::Focus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReadingMode::Focus => "focus",
            ReadingMode::Guided => "guided",
        }
    }
}

/// Receives the new mode every time the reader switches presentation.
///
/// Called after the session has released its state lock, so implementations
/// may block briefly (e.g. to persist the preference).
pub trait ModeObserver: Send + Sync {
    fn on_mode_change(&self, mode: ReadingMode);
}

impl<F> ModeObserver for F
where
    F: Fn(ReadingMode) + Send + Sync,
{
    fn on_mode_change(&self, mode: ReadingMode) {
        self(mode)
    }
}

/// Tracks the active presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeController {
    mode: ReadingMode,
}

impl ModeController {
    pub fn new(mode: ReadingMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ReadingMode {
        self.mode
    }

    /// Switches to `mode`, returning whether anything changed.
    pub fn set(&mut self, mode: ReadingMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }
}
