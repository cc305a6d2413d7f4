/// Application events produced by the command deck
#[derive(Debug, PartialEq, Clone)]
pub enum AppEvent {
    LoadFile(String),
    /// Download an `http(s)` URL in the background
    LoadUrl(String),
    LoadClipboard,
    /// Reopen the n-th history entry (0 = most recent)
    OpenHistory(usize),
    RemoveHistory(usize),
    ClearHistory,
    Quit,
    Help,
    InvalidCommand(String),
    None,
}

/// Playback controls available while reading
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ReaderAction {
    TogglePlay,
    Rewind,
    Forward,
    SpeedUp,
    SpeedDown,
    ToggleMode,
    /// Jump to a percentage of the text
    SeekPercent(u8),
    /// Close the session and return to the command deck
    Back,
    Quit,
}
