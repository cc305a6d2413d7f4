use super::{non_blank, LoadError, LoadedDocument};

const PASTE_NAME: &str = "Paste";

/// Read the clipboard's text content as a pasted document.
pub fn load() -> Result<LoadedDocument, LoadError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| LoadError::Clipboard(e.to_string()))?;
    let text = clipboard
        .get_text()
        .map_err(|e| LoadError::Clipboard(e.to_string()))?;
    from_text(text)
}

/// Wrap already-pasted text.
pub fn from_text(text: String) -> Result<LoadedDocument, LoadError> {
    let text = non_blank(text, PASTE_NAME)?;
    Ok(LoadedDocument {
        name: PASTE_NAME.to_string(),
        uri: None,
        text,
    })
}
