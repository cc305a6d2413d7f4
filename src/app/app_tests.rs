use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::app::mode::AppMode;
use crate::app::{App, AppEvent, FinishedDownload, ReaderAction, RenderState};
use crate::engine::PlaybackConfig;
use crate::input::{LoadError, LoadedDocument};
use crate::reading::ReadingMode;
use crate::storage::{ConfigStore, HistoryItem, SharedStore};

fn doc(text: &str) -> LoadedDocument {
    LoadedDocument {
        name: "Paste".to_string(),
        uri: None,
        text: text.to_string(),
    }
}

fn store_in(dir: &tempfile::TempDir) -> SharedStore {
    Arc::new(Mutex::new(
        ConfigStore::open(dir.path().join("config.json")).unwrap(),
    ))
}

#[test]
fn test_app_starts_in_command_mode() {
    let app = App::new(PlaybackConfig::default());
    assert_eq!(app.mode(), AppMode::Command);
    assert!(app.session().is_none());
    assert!(app.subscribe().is_none());
}

#[test]
fn test_app_handle_event_quit() {
    let mut app = App::new(PlaybackConfig::default());
    app.handle_event(AppEvent::Quit);
    assert_eq!(app.mode(), AppMode::Quit);
}

#[test]
fn test_app_handle_event_help() {
    let mut app = App::new(PlaybackConfig::default());
    app.handle_event(AppEvent::Help);
    assert!(app.get_render_state().show_help);
    app.handle_event(AppEvent::None);
    assert!(!app.get_render_state().show_help);
}

#[test]
fn test_app_help_toggles() {
    let mut app = App::new(PlaybackConfig::default());
    app.handle_event(AppEvent::Help);
    assert!(app.get_render_state().show_help);
    app.handle_event(AppEvent::Help);
    assert!(!app.get_render_state().show_help);
    app.handle_event(AppEvent::Help);
    assert!(app.get_render_state().show_help);
}

#[test]
fn test_app_invalid_command_sets_status() {
    let mut app = App::new(PlaybackConfig::default());
    app.handle_event(AppEvent::InvalidCommand("xyz".to_string()));
    assert_eq!(app.status(), Some("Unknown command: xyz"));
}

#[test]
fn test_app_load_missing_file_stays_in_command_mode() {
    let mut app = App::new(PlaybackConfig::default());
    app.handle_event(AppEvent::LoadFile("/nonexistent/file.txt".to_string()));
    assert_eq!(app.mode(), AppMode::Command);
    assert!(app.status().unwrap().contains("File not found"));
}

#[test]
fn test_app_get_render_state_returns_correct_initial_state() {
    let app = App::new(PlaybackConfig::default());
    let state: RenderState = app.get_render_state();
    assert_eq!(state.mode, AppMode::Command);
    assert!(state.reader.is_none());
    assert!(state.guided.is_none());
}

#[test]
fn test_start_reading_creates_session() {
    let mut app = App::new(PlaybackConfig::with_tempo(300));
    app.start_reading(doc("one two three"));
    assert_eq!(app.mode(), AppMode::Reading);

    let reader = app.get_render_state().reader.unwrap();
    assert_eq!(reader.count, 3);
    assert_eq!(reader.current_token, "one");
    assert_eq!(reader.tempo, 300);
    assert!(!reader.is_playing);
}

#[test]
fn test_reader_actions_drive_session() {
    let mut app = App::new(PlaybackConfig::default());
    let text = (0..30).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
    app.start_reading(doc(&text));

    app.handle_reader_action(ReaderAction::Forward);
    app.handle_reader_action(ReaderAction::Forward);
    app.handle_reader_action(ReaderAction::Rewind);
    app.handle_reader_action(ReaderAction::SpeedUp);
    let reader = app.get_render_state().reader.unwrap();
    assert_eq!(reader.position, 10);
    assert_eq!(reader.current_token, "10");
    assert_eq!(reader.tempo, 70);

    app.handle_reader_action(ReaderAction::SeekPercent(100));
    assert_eq!(app.get_render_state().reader.unwrap().position, 29);

    app.handle_reader_action(ReaderAction::SpeedDown);
    app.handle_reader_action(ReaderAction::SpeedDown);
    assert_eq!(app.get_render_state().reader.unwrap().tempo, 50);
}

#[test]
fn test_toggle_mode_builds_guided_excerpt() {
    let mut app = App::new(PlaybackConfig::default());
    app.start_reading(doc("alpha beta gamma"));
    assert!(app.get_render_state().guided.is_none());

    app.handle_reader_action(ReaderAction::ToggleMode);
    let state = app.get_render_state();
    let excerpt = state.guided.unwrap();
    assert_eq!(excerpt.current, "alpha");
    assert_eq!(excerpt.after, " beta gamma");
}

#[test]
fn test_back_closes_session_and_keeps_mode() {
    let mut app = App::new(PlaybackConfig::default());
    app.start_reading(doc("alpha beta"));
    app.handle_reader_action(ReaderAction::ToggleMode);
    app.handle_reader_action(ReaderAction::Back);

    assert_eq!(app.mode(), AppMode::Command);
    assert!(app.session().is_none());
    assert_eq!(app.preferred_mode(), ReadingMode::Guided);

    app.start_reading(doc("again"));
    assert_eq!(app.get_render_state().reader.unwrap().mode, ReadingMode::Guided);
}

#[test]
fn test_reader_action_quit() {
    let mut app = App::new(PlaybackConfig::default());
    app.start_reading(doc("alpha"));
    app.handle_reader_action(ReaderAction::Quit);
    assert_eq!(app.mode(), AppMode::Quit);
    assert!(app.session().is_none());
}

#[test]
fn test_submit_command_clears_input() {
    let mut app = App::new(PlaybackConfig::default());
    for c in ":help".chars() {
        app.push_command_char(c);
    }
    app.pop_command_char();
    app.push_command_char('p');
    assert_eq!(app.command_input(), ":help");

    app.submit_command();
    assert_eq!(app.command_input(), "");
    assert!(app.get_render_state().show_help);
}

#[test]
fn test_history_recorded_and_reopened() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(PlaybackConfig::default()).with_store(store_in(&dir));

    app.start_reading(doc("first pasted text"));
    app.back_to_command();
    assert_eq!(app.history().len(), 1);

    let state = app.get_render_state();
    assert_eq!(state.history[0].0, "Paste");
    assert_eq!(state.history[0].1, "first pasted text");

    app.handle_event(AppEvent::OpenHistory(0));
    assert_eq!(app.mode(), AppMode::Reading);
    assert_eq!(app.get_render_state().reader.unwrap().current_token, "first");
    // Reopening does not duplicate the entry.
    assert_eq!(app.history().len(), 1);
}

#[test]
fn test_reopen_from_file_keeps_history_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "saved on disk").unwrap();
    let path = path.display().to_string();

    let store = store_in(&dir);
    store
        .lock()
        .add_history(HistoryItem {
            name: "notes.txt".to_string(),
            uri: Some(path.clone()),
            text: String::new(),
            preview: None,
            added_at_epoch_ms: 1,
        })
        .unwrap();
    let mut app = App::new(PlaybackConfig::default()).with_store(Arc::clone(&store));
    app.start_reading(doc("pasted later"));
    app.back_to_command();

    app.handle_event(AppEvent::OpenHistory(1));
    assert_eq!(app.mode(), AppMode::Reading);
    assert_eq!(app.get_render_state().reader.unwrap().current_token, "saved");

    let history = app.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].name, "Paste");
    assert_eq!(history[1].uri.as_deref(), Some(path.as_str()));
}

#[test]
fn test_reopen_without_saved_text_or_source() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store
        .lock()
        .add_history(HistoryItem {
            name: "lost".to_string(),
            uri: None,
            text: String::new(),
            preview: None,
            added_at_epoch_ms: 1,
        })
        .unwrap();
    let mut app = App::new(PlaybackConfig::default()).with_store(store);

    app.handle_event(AppEvent::OpenHistory(0));
    assert_eq!(app.mode(), AppMode::Command);
    assert_eq!(app.status(), Some("Nothing saved for lost"));
}

#[test]
fn test_finished_download_opens_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(PlaybackConfig::default()).with_store(store_in(&dir));
    let url = "https://example.com/book.txt".to_string();

    app.finish_download(FinishedDownload {
        url: url.clone(),
        record: true,
        result: Ok(LoadedDocument {
            name: "book.txt".to_string(),
            uri: Some(url.clone()),
            text: "call me ishmael".to_string(),
        }),
    });

    assert_eq!(app.mode(), AppMode::Reading);
    assert_eq!(app.status(), None);
    assert_eq!(app.history()[0].uri.as_deref(), Some(url.as_str()));
}

#[test]
fn test_failed_download_sets_status() {
    let mut app = App::new(PlaybackConfig::default());
    app.finish_download(FinishedDownload {
        url: "https://example.com/huge.pdf".to_string(),
        record: true,
        result: Err(LoadError::TooLarge { limit: 16 }),
    });
    assert_eq!(app.mode(), AppMode::Command);
    assert_eq!(app.status(), Some("Download exceeds 16 bytes"));
}

#[test]
fn test_load_url_without_runtime_reports_status() {
    let mut app = App::new(PlaybackConfig::default());
    app.handle_event(AppEvent::LoadUrl("https://example.com/a.txt".to_string()));
    assert_eq!(app.mode(), AppMode::Command);
    assert_eq!(app.status(), Some("Downloads need a running async runtime"));
}

#[tokio::test]
async fn test_load_url_reports_download_failure() {
    let mut app = App::new(PlaybackConfig::default());
    app.handle_event(AppEvent::LoadUrl("http://127.0.0.1:9/a.txt".to_string()));
    assert_eq!(app.status(), Some("Downloading http://127.0.0.1:9/a.txt..."));

    let done = app.next_download().await;
    assert!(done.record);
    app.finish_download(done);
    assert_eq!(app.mode(), AppMode::Command);
    assert!(app.status().unwrap().starts_with("Download failed"));
}

#[test]
fn test_open_missing_history_entry() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(PlaybackConfig::default()).with_store(store_in(&dir));
    app.handle_event(AppEvent::OpenHistory(4));
    assert_eq!(app.mode(), AppMode::Command);
    assert_eq!(app.status(), Some("No history entry #5"));
}

#[test]
fn test_remove_and_clear_history() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(PlaybackConfig::default()).with_store(store_in(&dir));
    app.start_reading(LoadedDocument {
        name: "a.txt".to_string(),
        uri: Some("/a.txt".to_string()),
        text: "a".to_string(),
    });
    app.start_reading(doc("b"));
    assert_eq!(app.history().len(), 2);

    app.handle_event(AppEvent::RemoveHistory(0));
    assert_eq!(app.history().len(), 1);
    assert_eq!(app.history()[0].name, "a.txt");

    app.handle_event(AppEvent::ClearHistory);
    assert!(app.history().is_empty());
}

#[test]
fn test_history_without_store() {
    let mut app = App::new(PlaybackConfig::default());
    app.handle_event(AppEvent::ClearHistory);
    assert_eq!(app.status(), Some("History is not available"));
}

#[test]
fn test_mode_change_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let mut app = App::new(PlaybackConfig::default()).with_store(Arc::clone(&store));
    app.start_reading(doc("alpha beta"));
    app.handle_reader_action(ReaderAction::ToggleMode);

    assert_eq!(store.lock().config().last_reading_mode, ReadingMode::Guided);

    let reopened = App::new(PlaybackConfig::default()).with_store(store_in(&dir));
    assert_eq!(reopened.preferred_mode(), ReadingMode::Guided);
}

#[tokio::test(start_paused = true)]
async fn test_loading_new_text_cancels_previous_playback() {
    let mut app = App::new(PlaybackConfig::default());
    app.start_reading(doc("a b c d e f"));
    let old = app.subscribe().unwrap();
    app.handle_reader_action(ReaderAction::TogglePlay);

    tokio::time::sleep(Duration::from_millis(1_100)).await;
    assert_eq!(old.borrow().position, 1);

    app.start_reading(doc("x y z"));
    tokio::time::sleep(Duration::from_millis(3_000)).await;
    assert_eq!(old.borrow().position, 1);

    let reader = app.get_render_state().reader.unwrap();
    assert_eq!(reader.position, 0);
    assert!(!reader.is_playing);
}
