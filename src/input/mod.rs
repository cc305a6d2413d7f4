//! Text acquisition: turns a file, a URL or the clipboard into the plain
//! text a reading session consumes. Nothing here knows about playback.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("PDF parse error: {0}")]
    PdfParse(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("No readable text in {0}")]
    EmptyText(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Download exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Plain text plus where it came from, as recorded in the reading history.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub name: String,
    /// Location the text can be reloaded from; `None` for pasted text.
    pub uri: Option<String>,
    pub text: String,
}

impl LoadedDocument {
    fn from_path(path: &Path, text: String) -> Result<Self, LoadError> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let text = non_blank(text, &name)?;
        Ok(Self {
            name,
            uri: Some(path.display().to_string()),
            text,
        })
    }
}

fn non_blank(text: String, source: &str) -> Result<String, LoadError> {
    if text.trim().is_empty() {
        return Err(LoadError::EmptyText(source.to_string()));
    }
    Ok(text)
}

/// Loads `path` as PDF when it has a `.pdf` extension, as UTF-8 text otherwise.
pub fn load_path(path: &str) -> Result<LoadedDocument, LoadError> {
    let is_pdf = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let result = if is_pdf { pdf::load(path) } else { text::load(path) };
    match &result {
        Ok(doc) => tracing::debug!(name = %doc.name, bytes = doc.text.len(), "text loaded"),
        Err(err) => tracing::warn!(path, error = %err, "failed to load text"),
    }
    result
}

pub mod clipboard;
pub mod pdf;
pub mod text;
pub mod url;
