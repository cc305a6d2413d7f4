pub mod app;
#[cfg(test)]
mod app_tests;
pub mod event;
pub mod mode;
pub mod render_state;

pub use app::{App, FinishedDownload};
pub use event::{AppEvent, ReaderAction};
pub use mode::AppMode;
pub use render_state::{GuidedExcerpt, RenderState};
