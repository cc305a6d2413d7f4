use std::io;

use thiserror::Error;

use crate::input::LoadError;

/// Application-level failures. The playback core itself never fails; these
/// come from the terminal, text acquisition and persistence around it.
#[derive(Error, Debug)]
pub enum PacerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, PacerError>;
