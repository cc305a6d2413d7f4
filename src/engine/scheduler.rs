//! Timed loop that advances a playing session one token per tick.
//!
//! The loop runs as a single Tokio task per session. Each cycle polls the
//! shared state for the play flag and tempo, sleeps for the interval that
//! tempo implies, then re-checks the flag before stepping. The sleep is the
//! only suspension point, so aborting the task or pausing between cycles never
//! leaves a half-applied step behind.
//!
//! Every start hands the task a fresh run id. A step is applied only while the
//! state still carries that id, so a loop that was stopped or superseded can
//! never move the position even if it wakes before its abort lands.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::reading::state::{PlaybackSnapshot, PlaybackState};
use crate::reading::timing::tick_interval;

struct Inner {
    state: PlaybackState,
    run_id: u64,
}

/// Playback state shared between the session owner and its scheduler task.
///
/// Mutations go through [`PlaybackCell::update`], which publishes a snapshot
/// before releasing the lock; subscribers always see one consistent state.
pub struct PlaybackCell {
    inner: Mutex<Inner>,
    updates: watch::Sender<PlaybackSnapshot>,
}

impl PlaybackCell {
    pub fn new(state: PlaybackState) -> Arc<Self> {
        let (updates, _) = watch::channel(state.snapshot());
        Arc::new(Self {
            inner: Mutex::new(Inner { state, run_id: 0 }),
            updates,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.updates.subscribe()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.updates.borrow().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&PlaybackState) -> R) -> R {
        f(&self.inner.lock().state)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut PlaybackState) -> R) -> R {
        let mut inner = self.inner.lock();
        let out = f(&mut inner.state);
        self.updates.send_replace(inner.state.snapshot());
        out
    }

    fn begin_run(&self) -> u64 {
        let mut inner = self.inner.lock();
        inner.run_id = inner.run_id.wrapping_add(1);
        inner.run_id
    }

    fn cancel_runs(&self) {
        let mut inner = self.inner.lock();
        inner.run_id = inner.run_id.wrapping_add(1);
    }

    /// Tempo for the next tick, or `None` when the loop should exit.
    fn poll(&self, run: u64) -> Option<i64> {
        let inner = self.inner.lock();
        let state = &inner.state;
        if inner.run_id != run || !state.is_playing() || state.at_end() {
            return None;
        }
        Some(state.tempo())
    }

    /// Steps one token if the run is still current and playing.
    fn advance(&self, run: u64) -> bool {
        let mut inner = self.inner.lock();
        if inner.run_id != run || !inner.state.is_playing() {
            return false;
        }
        let stepped = inner.state.step();
        if stepped {
            self.updates.send_replace(inner.state.snapshot());
        }
        stepped
    }
}

pub struct PacingScheduler {
    cell: Arc<PlaybackCell>,
    runtime: Option<Handle>,
    task: Option<JoinHandle<()>>,
}

impl PacingScheduler {
    pub fn new(cell: Arc<PlaybackCell>, runtime: Option<Handle>) -> Self {
        Self {
            cell,
            runtime,
            task: None,
        }
    }

    /// Restarts the loop, reading tempo fresh for the first tick.
    pub fn start(&mut self) {
        self.stop();
        let run = self.cell.begin_run();

        let Some(runtime) = self.runtime.as_ref() else {
            tracing::warn!("no async runtime available, playback will not advance");
            return;
        };

        tracing::debug!(run, "starting pacing loop");
        self.task = Some(runtime.spawn(pace(Arc::clone(&self.cell), run)));
    }

    /// Cancels the loop. No step from an earlier run can land after this returns.
    pub fn stop(&mut self) {
        self.cell.cancel_runs();
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                tracing::debug!("stopping pacing loop");
            }
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for PacingScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn pace(cell: Arc<PlaybackCell>, run: u64) {
    while let Some(tempo) = cell.poll(run) {
        let interval = tick_interval(tempo);
        tokio::time::sleep(interval).await;

        if !cell.advance(run) {
            break;
        }
        tracing::trace!(run, tempo, "tick");
    }
    tracing::debug!(run, "pacing loop finished");
}
