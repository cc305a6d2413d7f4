pub mod document;
pub mod mode;
pub mod ovp;
pub mod state;
pub mod timing;
pub mod token;

pub use document::Document;
pub use mode::{ModeController, ModeObserver, ReadingMode};
pub use ovp::{calculate_anchor_position, split_at_anchor};
pub use state::{PlaybackSnapshot, PlaybackState};
pub use timing::{progress_percent, tick_interval, tick_interval_ms};
pub use token::{tokenize, tokenize_document, Token};
