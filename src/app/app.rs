use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};

use super::event::{AppEvent, ReaderAction};
use super::mode::AppMode;
use super::render_state::{GuidedExcerpt, RenderState, GUIDED_WORDS_AFTER, GUIDED_WORDS_BEFORE};
use crate::engine::{self, PlaybackConfig, PlaybackSession};
use crate::input::{self, LoadError, LoadedDocument};
use crate::reading::{Document, PlaybackSnapshot, ReadingMode};
use crate::storage::{ConfigStore, HistoryItem, ModePersister, SharedStore};
use crate::ui::command::{command_to_app_event, parse_command};

/// Outcome of a background URL download.
#[derive(Debug)]
pub struct FinishedDownload {
    pub url: String,
    /// Whether the document goes into the history when it opens.
    pub record: bool,
    pub result: Result<LoadedDocument, LoadError>,
}

pub struct App {
    mode: AppMode,
    session: Option<PlaybackSession>,
    store: Option<SharedStore>,
    config: PlaybackConfig,
    /// Mode the next session opens in; follows the last session's choice.
    preferred_mode: ReadingMode,
    command_input: String,
    status: Option<String>,
    show_help: bool,
    downloads_tx: mpsc::UnboundedSender<FinishedDownload>,
    downloads_rx: mpsc::UnboundedReceiver<FinishedDownload>,
}

impl App {
    pub fn new(config: PlaybackConfig) -> Self {
        let (downloads_tx, downloads_rx) = mpsc::unbounded_channel();
        Self {
            mode: AppMode::Command,
            session: None,
            store: None,
            config,
            preferred_mode: ReadingMode::default(),
            command_input: String::new(),
            status: None,
            show_help: false,
            downloads_tx,
            downloads_rx,
        }
    }

    /// Attaches persistent storage; the stored last reading mode becomes the
    /// preferred mode for new sessions.
    pub fn with_store(mut self, store: SharedStore) -> Self {
        self.preferred_mode = store.lock().config().last_reading_mode;
        self.store = Some(store);
        self
    }

    pub fn with_preferred_mode(mut self, mode: ReadingMode) -> Self {
        self.preferred_mode = mode;
        self
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn preferred_mode(&self) -> ReadingMode {
        self.preferred_mode
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Receiver for the active session's snapshots, if any.
    pub fn subscribe(&self) -> Option<watch::Receiver<PlaybackSnapshot>> {
        self.session.as_ref().map(PlaybackSession::subscribe)
    }

    pub fn history(&self) -> Vec<HistoryItem> {
        self.store
            .as_ref()
            .map(|store| store.lock().config().history.clone())
            .unwrap_or_default()
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        let _span = tracing::debug_span!("handle_event", event = ?event).entered();
        let help_was_shown = std::mem::take(&mut self.show_help);

        match event {
            AppEvent::LoadFile(path) => match input::load_path(&path) {
                Ok(doc) => self.start_reading(doc),
                Err(err) => self.status = Some(err.to_string()),
            },
            AppEvent::LoadUrl(url) => self.begin_download(url, true),
            AppEvent::LoadClipboard => match input::clipboard::load() {
                Ok(doc) => self.start_reading(doc),
                Err(err) => self.status = Some(err.to_string()),
            },
            AppEvent::OpenHistory(index) => match self.history().into_iter().nth(index) {
                Some(item) => self.reopen(item),
                None => self.status = Some(format!("No history entry #{}", index + 1)),
            },
            AppEvent::RemoveHistory(index) => self.with_store_mut(|store| {
                store.remove_history(index).map(|_| ())
            }),
            AppEvent::ClearHistory => self.with_store_mut(|store| store.clear_history()),
            AppEvent::Quit => {
                self.close_session();
                self.mode = AppMode::Quit;
            }
            AppEvent::Help => self.show_help = !help_was_shown,
            AppEvent::InvalidCommand(input) => {
                self.status = Some(format!("Unknown command: {input}"));
            }
            AppEvent::None => {}
        }
    }

    /// Records `doc` in the history and replaces any running session with one over it.
    pub fn start_reading(&mut self, doc: LoadedDocument) {
        if let Some(store) = &self.store {
            if let Err(err) = store.lock().record(&doc) {
                tracing::warn!(error = %err, "failed to record history");
            }
        }
        self.open_session(doc);
    }

    fn open_session(&mut self, doc: LoadedDocument) {
        self.close_session();

        let mut session =
            PlaybackSession::new(Document::shared(doc.text), self.preferred_mode, self.config);
        if let Some(store) = &self.store {
            session = session.with_mode_observer(Arc::new(ModePersister(Arc::clone(store))));
        }

        tracing::info!(name = %doc.name, tokens = session.snapshot().count, "reading started");
        self.session = Some(session);
        self.status = None;
        self.mode = AppMode::Reading;
    }

    fn reopen(&mut self, item: HistoryItem) {
        if !item.text.trim().is_empty() {
            self.open_session(LoadedDocument {
                name: item.name,
                uri: item.uri,
                text: item.text,
            });
            return;
        }
        match item.uri {
            Some(uri) if input::url::is_url(&uri) => self.begin_download(uri, false),
            Some(uri) => match input::load_path(&uri) {
                Ok(doc) => self.open_session(doc),
                Err(err) => self.status = Some(err.to_string()),
            },
            None => self.status = Some(format!("Nothing saved for {}", item.name)),
        }
    }

    /// Starts fetching `url` on the current runtime; the result arrives
    /// through [`App::next_download`].
    fn begin_download(&mut self, url: String, record: bool) {
        let Ok(runtime) = Handle::try_current() else {
            self.status = Some("Downloads need a running async runtime".to_string());
            return;
        };
        let tx = self.downloads_tx.clone();
        self.status = Some(format!("Downloading {url}..."));
        tracing::info!(url = %url, "download started");
        runtime.spawn(async move {
            let result = input::url::load(&url).await;
            let _ = tx.send(FinishedDownload {
                url,
                record,
                result,
            });
        });
    }

    /// Waits for the next background download to finish.
    pub async fn next_download(&mut self) -> FinishedDownload {
        match self.downloads_rx.recv().await {
            Some(done) => done,
            // The sender lives in `self`, so the channel never closes here.
            None => std::future::pending().await,
        }
    }

    pub fn finish_download(&mut self, done: FinishedDownload) {
        match done.result {
            Ok(doc) if done.record => self.start_reading(doc),
            Ok(doc) => self.open_session(doc),
            Err(err) => {
                tracing::warn!(url = %done.url, error = %err, "download failed");
                self.status = Some(err.to_string());
            }
        }
    }

    fn with_store_mut(
        &mut self,
        f: impl FnOnce(&mut ConfigStore) -> engine::Result<()>,
    ) {
        let Some(store) = &self.store else {
            self.status = Some("History is not available".to_string());
            return;
        };
        if let Err(err) = f(&mut store.lock()) {
            self.status = Some(err.to_string());
        }
    }

    /// Tears the current session down, cancelling its pacing loop.
    pub fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            self.preferred_mode = session.snapshot().mode;
        }
    }

    pub fn back_to_command(&mut self) {
        self.close_session();
        self.mode = AppMode::Command;
    }

    pub fn handle_reader_action(&mut self, action: ReaderAction) {
        if action == ReaderAction::Back {
            self.back_to_command();
            return;
        }
        if action == ReaderAction::Quit {
            self.handle_event(AppEvent::Quit);
            return;
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        match action {
            ReaderAction::TogglePlay => session.toggle_playing(),
            ReaderAction::Rewind => session.rewind(),
            ReaderAction::Forward => session.forward(),
            ReaderAction::SpeedUp => session.speed_up(),
            ReaderAction::SpeedDown => session.speed_down(),
            ReaderAction::ToggleMode => session.toggle_mode(),
            ReaderAction::SeekPercent(percent) => session.seek_percent(percent),
            ReaderAction::Back | ReaderAction::Quit => {}
        }
    }

    pub fn command_input(&self) -> &str {
        &self.command_input
    }

    pub fn push_command_char(&mut self, c: char) {
        self.command_input.push(c);
    }

    pub fn pop_command_char(&mut self) {
        self.command_input.pop();
    }

    /// Parses and runs whatever is in the command input, then clears it.
    pub fn submit_command(&mut self) {
        let input = std::mem::take(&mut self.command_input);
        let event = command_to_app_event(parse_command(&input));
        self.handle_event(event);
    }

    pub fn get_render_state(&self) -> RenderState {
        let mut state = RenderState::empty(self.mode);
        state.command_input = self.command_input.clone();
        state.status = self.status.clone();
        state.show_help = self.show_help;
        if let Some(store) = &self.store {
            state.history = store
                .lock()
                .config()
                .history
                .iter()
                .map(|item| (item.name.clone(), item.detail_line()))
                .collect();
        }

        if let Some(session) = &self.session {
            let snapshot = session.snapshot();
            if snapshot.mode == ReadingMode::Guided {
                state.guided = GuidedExcerpt::around(
                    &session.document(),
                    &snapshot,
                    GUIDED_WORDS_BEFORE,
                    GUIDED_WORDS_AFTER,
                );
            }
            state.reader = Some(snapshot);
        }

        state
    }
}
