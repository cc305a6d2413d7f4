use unicode_segmentation::UnicodeSegmentation;

/// Optimal viewing position for focus mode.
///
/// Words are shifted horizontally so the anchor letter stays on a fixed column:
/// - 1 grapheme → 1st letter
/// - 2-5 → 2nd letter
/// - 6-9 → 3rd letter
/// - 10+ → 4th letter
///
/// Returns the 0-based grapheme index of the anchor.
pub fn calculate_anchor_position(word: &str) -> usize {
    match word.graphemes(true).count() {
        0..=1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        _ => 3,
    }
}

/// Splits a word into the text before the anchor, the anchor, and the rest.
pub fn split_at_anchor(word: &str) -> (String, String, String) {
    let anchor = calculate_anchor_position(word);
    let graphemes: Vec<&str> = word.graphemes(true).collect();
    if graphemes.is_empty() {
        return (String::new(), String::new(), String::new());
    }
    (
        graphemes[..anchor].concat(),
        graphemes[anchor].to_string(),
        graphemes[anchor + 1..].concat(),
    )
}
