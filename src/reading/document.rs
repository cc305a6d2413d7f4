use std::sync::Arc;

use super::token::{tokenize_document, Token};

/// Immutable source text together with its token sequence.
///
/// Built once per loaded text and shared read-only between the playback state,
/// the scheduler and the renderer.
#[derive(Debug, PartialEq, Eq, Default)]
pub struct Document {
    text: String,
    tokens: Vec<Token>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = tokenize_document(&text);
        Self { text, tokens }
    }

    pub fn shared(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_tokenizes_once() {
        let doc = Document::new("one two three");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.token(1).map(|t| t.text.as_str()), Some("two"));
        assert_eq!(doc.text(), "one two three");
    }

    #[test]
    fn test_blank_document_is_empty() {
        let doc = Document::new("   \n ");
        assert!(doc.is_empty());
        assert_eq!(doc.token(0), None);
    }
}
