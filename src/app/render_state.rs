use crate::app::mode::AppMode;
use crate::reading::{Document, PlaybackSnapshot};

/// Tokens of context shown before the current word in guided mode.
pub const GUIDED_WORDS_BEFORE: usize = 40;
/// Tokens of context shown after the current word in guided mode.
pub const GUIDED_WORDS_AFTER: usize = 80;

/// Render state for UI components
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub mode: AppMode,
    pub reader: Option<PlaybackSnapshot>,
    /// Source excerpt around the current word, present in guided mode.
    pub guided: Option<GuidedExcerpt>,
    pub command_input: String,
    pub status: Option<String>,
    /// (name, detail) per history entry, newest first.
    pub history: Vec<(String, String)>,
    pub show_help: bool,
}

impl RenderState {
    /// Render state for the command deck, with no session loaded
    pub fn empty(mode: AppMode) -> Self {
        Self {
            mode,
            reader: None,
            guided: None,
            command_input: String::new(),
            status: None,
            history: Vec::new(),
            show_help: false,
        }
    }
}

/// Slice of the source text split around the highlighted word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidedExcerpt {
    pub before: String,
    pub current: String,
    pub after: String,
}

impl GuidedExcerpt {
    /// Cuts the source text from `words_before` tokens ahead of the current
    /// one to `words_after` tokens past it, keeping original line breaks.
    pub fn around(
        document: &Document,
        snapshot: &PlaybackSnapshot,
        words_before: usize,
        words_after: usize,
    ) -> Option<Self> {
        let highlight = snapshot.highlight.clone()?;
        let last = document.len().checked_sub(1)?;
        let first_token = document.token(snapshot.position.saturating_sub(words_before))?;
        let last_token = document.token((snapshot.position + words_after).min(last))?;

        let text = document.text();
        Some(Self {
            before: text[first_token.span.start..highlight.start].to_string(),
            current: text[highlight.clone()].to_string(),
            after: text[highlight.end..last_token.span.end].to_string(),
        })
    }
}
