//! Command parsing for the command deck
//!
//! Supported input:
//! - `:q` or `:quit` quits
//! - `:h` or `:help` shows the help overlay
//! - `@path/to/file.txt` or `@file.pdf` loads a file
//! - `@https://...` downloads a text or PDF
//! - `@@` (or a bare `@`) reads the clipboard
//! - `#N` reopens the N-th history entry (1 = most recent)
//! - `:rm N` removes the N-th history entry
//! - `:clear` empties the history

use crate::app::AppEvent;
use crate::input::url::is_url;

/// Commands that can be parsed from command deck input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    LoadFile(String),
    LoadUrl(String),
    LoadClipboard,
    /// Zero-based history index
    OpenHistory(usize),
    /// Zero-based history index
    RemoveHistory(usize),
    ClearHistory,
    Unknown(String),
}

/// Parses a 1-based entry number as typed by the user into a 0-based index.
fn history_index(number: &str) -> Option<usize> {
    number.trim().parse::<usize>().ok()?.checked_sub(1)
}

/// Parse command deck input string into a Command
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let unknown = || Command::Unknown(input.to_string());

    if input.is_empty() {
        return unknown();
    }

    if let Some(cmd) = input.strip_prefix(':') {
        let (name, arg) = cmd
            .split_once(char::is_whitespace)
            .unwrap_or((cmd, ""));
        match (name, arg.trim()) {
            ("q" | "quit", "") => Command::Quit,
            ("h" | "help", "") => Command::Help,
            ("clear", "") => Command::ClearHistory,
            ("rm", number) => history_index(number)
                .map(Command::RemoveHistory)
                .unwrap_or_else(unknown),
            _ => unknown(),
        }
    } else if let Some(rest) = input.strip_prefix('@') {
        let filename = rest.trim();
        if filename.is_empty() || filename == "@" {
            Command::LoadClipboard
        } else if is_url(filename) {
            Command::LoadUrl(filename.to_string())
        } else {
            Command::LoadFile(filename.to_string())
        }
    } else if let Some(number) = input.strip_prefix('#') {
        history_index(number)
            .map(Command::OpenHistory)
            .unwrap_or_else(unknown)
    } else {
        unknown()
    }
}

/// Convert a parsed command into an AppEvent
pub fn command_to_app_event(command: Command) -> AppEvent {
    match command {
        Command::Quit => AppEvent::Quit,
        Command::Help => AppEvent::Help,
        Command::LoadFile(path) => AppEvent::LoadFile(path),
        Command::LoadUrl(url) => AppEvent::LoadUrl(url),
        Command::LoadClipboard => AppEvent::LoadClipboard,
        Command::OpenHistory(index) => AppEvent::OpenHistory(index),
        Command::RemoveHistory(index) => AppEvent::RemoveHistory(index),
        Command::ClearHistory => AppEvent::ClearHistory,
        Command::Unknown(input) => AppEvent::InvalidCommand(input),
    }
}
