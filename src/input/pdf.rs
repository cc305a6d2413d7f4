use super::{LoadError, LoadedDocument};
use std::path::Path;

/// Extracts the text layer of a PDF with `pdf-extract`. Layout, images and
/// scanned pages without a text layer yield nothing.
pub fn load(path: &str) -> Result<LoadedDocument, LoadError> {
    let path = Path::new(path);
    if !path.is_file() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    let text = extract_text(&bytes)?;
    tracing::trace!(path = %path.display(), chars = text.len(), "pdf text extracted");

    LoadedDocument::from_path(path, text)
}

/// Text of an in-memory PDF.
pub fn extract_text(bytes: &[u8]) -> Result<String, LoadError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| LoadError::PdfParse(e.to_string()))
}
