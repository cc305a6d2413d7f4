//! Tracing setup.
//!
//! The terminal UI owns stdout, so events go to `pacer.log` in the data
//! directory. `RUST_LOG` takes precedence over the level passed in.

use std::fs::OpenOptions;
use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE: &str = "pacer.log";

/// Installs the global subscriber. Failing to open the log file leaves
/// tracing disabled rather than aborting startup; repeated calls are no-ops.
pub fn init_tracing(level: &str, data_dir: &Path) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }

    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))
    else {
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();

    tracing::debug!(level, "tracing initialized");
}
