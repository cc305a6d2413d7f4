use std::ops::Range;

/// One whitespace-delimited word of the source text.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub text: String,
    /// Byte range of the word inside the source text, used by the guided view
    /// to highlight the current word in place.
    pub span: Range<usize>,
}

impl Token {
    fn new(text: &str, start: usize) -> Self {
        Self {
            text: text.to_string(),
            span: start..start + text.len(),
        }
    }
}

/// Splits text into words on runs of whitespace, keeping each word's position.
///
/// Leading and trailing whitespace never produces tokens, so blank input yields
/// an empty sequence.
pub fn tokenize_document(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), word_start) {
            (true, Some(start)) => {
                tokens.push(Token::new(&text[start..idx], start));
                word_start = None;
            }
            (false, None) => word_start = Some(idx),
            _ => {}
        }
    }

    if let Some(start) = word_start {
        tokens.push(Token::new(&text[start..], start));
    }

    tokens
}

/// Splits text into its words, discarding the positions.
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_document(text)
        .into_iter()
        .map(|token| token.text)
        .collect()
}
