mod cli;

use std::sync::Arc;

use clap::Parser;
use parking_lot::Mutex;

use crate::cli::Cli;
use pacer::app::{App, AppEvent};
use pacer::engine::PlaybackConfig;
use pacer::input::url::is_url;
use pacer::observability::init_tracing;
use pacer::storage::{paths, ConfigStore};
use pacer::ui::TuiManager;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.clone().unwrap_or_else(paths::data_dir);
    init_tracing(&cli.log_level, &data_dir);
    tracing::info!(data_dir = %data_dir.display(), tempo = cli.tempo, "starting");

    let mut app = App::new(PlaybackConfig::with_tempo(cli.tempo));
    match ConfigStore::open(paths::config_file(&data_dir)) {
        Ok(store) => app = app.with_store(Arc::new(Mutex::new(store))),
        Err(err) => tracing::warn!(error = %err, "running without saved preferences"),
    }
    if let Some(mode) = cli.mode {
        app = app.with_preferred_mode(mode.into());
    }
    if let Some(file) = cli.file {
        let event = if is_url(&file) {
            AppEvent::LoadUrl(file)
        } else {
            AppEvent::LoadFile(file)
        };
        app.handle_event(event);
    }

    let mut tui = TuiManager::new()?;
    tui.run_event_loop(&mut app).await?;

    tracing::info!("exiting");
    Ok(())
}
