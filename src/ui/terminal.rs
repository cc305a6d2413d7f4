use crate::app::{mode::AppMode, App, RenderState};
use crate::reading::{PlaybackSnapshot, ReadingMode};
use crate::ui::deck::render_command_deck;
use crate::ui::keymap::reader_action;
use crate::ui::reader::view::{
    render_guided_excerpt, render_progress_bar, render_status_line, render_word_display,
};
use crate::ui::terminal_guard::TerminalGuard;
use crate::ui::theme::colors;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use tokio::sync::watch;

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl TuiManager {
    pub fn new() -> Result<Self, io::Error> {
        let guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager {
            terminal,
            _guard: guard,
        })
    }

    /// Redraws on every key press, finished download and snapshot the pacing
    /// loop publishes, until the app quits or the input stream ends.
    pub async fn run_event_loop(&mut self, app: &mut App) -> io::Result<()> {
        let mut events = EventStream::new();
        let mut snapshots = app.subscribe();
        self.render_frame(app)?;

        while app.mode() != AppMode::Quit {
            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) => {
                        handle_key(app, key);
                        snapshots = app.subscribe();
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err),
                    None => break,
                },
                done = app.next_download() => {
                    app.finish_download(done);
                    snapshots = app.subscribe();
                }
                alive = next_change(&mut snapshots) => {
                    if !alive {
                        snapshots = None;
                    }
                }
            }
            self.render_frame(app)?;
        }

        tracing::debug!("event loop finished");
        Ok(())
    }

    pub fn render_frame(&mut self, app: &App) -> io::Result<()> {
        let state = app.get_render_state();
        self.terminal.draw(|frame| draw(frame, &state))?;
        Ok(())
    }
}

/// Resolves when the session publishes a new snapshot; `false` once the
/// session is gone. Never resolves without a session.
async fn next_change(snapshots: &mut Option<watch::Receiver<PlaybackSnapshot>>) -> bool {
    match snapshots {
        Some(rx) => rx.changed().await.is_ok(),
        None => std::future::pending().await,
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    match app.mode() {
        AppMode::Reading => {
            if let Some(action) = reader_action(key) {
                app.handle_reader_action(action);
            }
        }
        AppMode::Command => handle_command_key(app, key),
        AppMode::Quit => {}
    }
}

fn handle_command_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.handle_event(crate::app::AppEvent::Quit);
        }
        return;
    }
    match key.code {
        KeyCode::Char(c) => app.push_command_char(c),
        KeyCode::Backspace => app.pop_command_char(),
        KeyCode::Enter if !app.command_input().trim().is_empty() => app.submit_command(),
        _ => {}
    }
}

fn draw(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();
    match (&state.mode, &state.reader) {
        (AppMode::Reading, Some(snapshot)) => draw_reader(frame, area, state, snapshot),
        _ => render_command_deck(frame, area, state),
    }
}

fn draw_reader(frame: &mut Frame, area: Rect, state: &RenderState, snapshot: &PlaybackSnapshot) {
    frame.render_widget(
        Block::default().style(Style::default().bg(colors::background())),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    match (&snapshot.mode, &state.guided) {
        (ReadingMode::Guided, Some(excerpt)) => {
            let inner = rows[0].inner(Margin {
                horizontal: 4,
                vertical: 1,
            });
            frame.render_widget(render_guided_excerpt(excerpt), inner);
        }
        _ => {
            let word_row = Rect {
                y: rows[0].y + rows[0].height / 2,
                height: 1,
                ..rows[0]
            };
            frame.render_widget(
                render_word_display(&snapshot.current_token, word_row.width),
                word_row,
            );
        }
    }

    frame.render_widget(render_progress_bar(snapshot.progress), rows[1]);
    frame.render_widget(render_status_line(snapshot), rows[2]);
}
