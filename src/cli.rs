//! Command line interface for the pacer binary.

use clap::{Parser, ValueEnum};
use pacer::engine::config::DEFAULT_TEMPO;
use pacer::reading::ReadingMode;
use std::path::PathBuf;

/// Terminal speed reader: one word at a time, at a steady tempo.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Text or PDF file, or an http(s) URL, to open straight away
    pub file: Option<String>,

    /// Starting tempo in words per minute
    #[arg(short, long, default_value_t = DEFAULT_TEMPO, allow_negative_numbers = true)]
    pub tempo: i64,

    /// Reading mode for the first session (defaults to the last one used)
    #[arg(short, long)]
    pub mode: Option<ModeArg>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Directory for the config file and the log
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Focus,
    Guided,
}

impl From<ModeArg> for ReadingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Focus => ReadingMode::Focus,
            ModeArg::Guided => ReadingMode::Guided,
        }
    }
}
