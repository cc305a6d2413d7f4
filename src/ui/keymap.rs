use crate::app::ReaderAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Maps a key press in reading mode to a playback action.
pub fn reader_action(key: KeyEvent) -> Option<ReaderAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(ReaderAction::Quit);
    }

    let action = match key.code {
        KeyCode::Char(' ') => ReaderAction::TogglePlay,
        KeyCode::Char('h') | KeyCode::Left => ReaderAction::Rewind,
        KeyCode::Char('l') | KeyCode::Right => ReaderAction::Forward,
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => ReaderAction::SpeedUp,
        KeyCode::Char('-') | KeyCode::Down => ReaderAction::SpeedDown,
        KeyCode::Char('m') => ReaderAction::ToggleMode,
        KeyCode::Char(c @ '0'..='9') => {
            ReaderAction::SeekPercent((c as u8 - b'0') * 10)
        }
        KeyCode::Home => ReaderAction::SeekPercent(0),
        KeyCode::End => ReaderAction::SeekPercent(100),
        KeyCode::Char('b') | KeyCode::Esc => ReaderAction::Back,
        KeyCode::Char('q') => ReaderAction::Quit,
        _ => return None,
    };
    Some(action)
}
