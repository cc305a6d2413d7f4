use super::{LoadError, LoadedDocument};
use std::path::Path;

/// Load a UTF-8 text file.
pub fn load(path: &str) -> Result<LoadedDocument, LoadError> {
    let path = Path::new(path);

    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    LoadedDocument::from_path(path, content)
}
