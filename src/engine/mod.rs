pub mod config;
pub mod error;
pub mod scheduler;
pub mod session;

pub use config::PlaybackConfig;
pub use error::{PacerError, Result};
pub use scheduler::{PacingScheduler, PlaybackCell};
pub use session::PlaybackSession;

// Reading core items re-exported for callers that only deal with the engine
pub use crate::reading::{Document, PlaybackSnapshot, PlaybackState, ReadingMode};
