use std::ffi::OsString;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "pacer";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "PACER_DATA_DIR";

/// Resolves the data directory holding the config file and the log.
///
/// Order: `$PACER_DATA_DIR`, then the platform data directory from `dirs`
/// (`~/.local/share/pacer`, `~/Library/Application Support/pacer`,
/// `%APPDATA%\pacer`), then `./.pacer` as a last resort.
pub fn data_dir() -> PathBuf {
    resolve(
        std::env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()),
        dirs::data_dir(),
    )
}

fn resolve(override_dir: Option<OsString>, platform_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir {
        return PathBuf::from(dir);
    }
    match platform_dir {
        Some(dir) => dir.join(APP_DIR),
        None => PathBuf::from(".").join(format!(".{APP_DIR}")),
    }
}

pub fn config_file(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}
