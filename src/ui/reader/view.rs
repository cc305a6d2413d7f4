use crate::app::GuidedExcerpt;
use crate::reading::{split_at_anchor, PlaybackSnapshot};
use crate::ui::theme::colors;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

const PROGRESS_BAR_CELLS: usize = 20;

/// Columns of left padding that put the anchor letter of `word` on the
/// middle column of an area `area_width` cells wide.
pub fn anchor_padding(word: &str, area_width: u16) -> usize {
    let (prefix, _, _) = split_at_anchor(word);
    (area_width as usize / 2).saturating_sub(prefix.width())
}

/// Focus mode: the current word with its anchor letter pinned to the centre.
pub fn render_word_display(word: &str, area_width: u16) -> Paragraph<'static> {
    let (prefix, anchor, suffix) = split_at_anchor(word);
    let text_style = Style::default().fg(colors::text());

    let line = Line::from(vec![
        Span::raw(" ".repeat(anchor_padding(word, area_width))),
        Span::styled(prefix, text_style),
        Span::styled(
            anchor,
            Style::default()
                .fg(colors::anchor())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(suffix, text_style),
    ]);

    Paragraph::new(line)
        .alignment(Alignment::Left)
        .style(Style::default().bg(colors::background()))
}

/// Guided mode: surrounding source text with the current word highlighted.
pub fn render_guided_excerpt(excerpt: &GuidedExcerpt) -> Paragraph<'static> {
    Paragraph::new(Text::from(excerpt_lines(excerpt)))
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(colors::background()))
}

fn excerpt_lines(excerpt: &GuidedExcerpt) -> Vec<Line<'static>> {
    let dimmed = Style::default().fg(colors::dimmed());
    let mut lines: Vec<Line<'static>> = vec![Line::default()];

    let pieces = [
        (excerpt.before.as_str(), dimmed),
        (
            excerpt.current.as_str(),
            Style::default()
                .fg(colors::background())
                .bg(colors::highlight())
                .add_modifier(Modifier::BOLD),
        ),
        (excerpt.after.as_str(), dimmed),
    ];
    // Source line breaks become separate lines so the layout follows the text.
    for (text, style) in pieces {
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if !segment.is_empty() {
                if let Some(line) = lines.last_mut() {
                    line.spans.push(Span::styled(segment.to_string(), style));
                }
            }
        }
    }
    lines
}

pub fn render_progress_bar(progress: u8) -> Line<'static> {
    let filled = usize::from(progress.min(100)) * PROGRESS_BAR_CELLS / 100;

    Line::from(vec![
        Span::styled("─".repeat(filled), Style::default().fg(colors::text())),
        Span::styled(
            "─".repeat(PROGRESS_BAR_CELLS - filled),
            Style::default().fg(colors::dimmed()),
        ),
        Span::styled(format!(" {progress:>3}%"), Style::default().fg(colors::dimmed())),
    ])
    .alignment(Alignment::Center)
}

/// Position, tempo, play state and mode in one status line.
pub fn render_status_line(snapshot: &PlaybackSnapshot) -> Line<'static> {
    let position = if snapshot.count == 0 {
        "0/0".to_string()
    } else {
        format!("{}/{}", snapshot.position + 1, snapshot.count)
    };
    let state = if snapshot.is_playing { "playing" } else { "paused" };

    Line::from(Span::styled(
        format!(
            "{position}  ·  {} wpm  ·  {state}  ·  {}",
            snapshot.tempo,
            snapshot.mode.label()
        ),
        Style::default().fg(colors::dimmed()),
    ))
    .alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::ReadingMode;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_anchor_padding_centres_anchor() {
        // "hello" anchors on 'e', one cell of prefix
        assert_eq!(anchor_padding("hello", 40), 19);
        // "I" anchors on itself
        assert_eq!(anchor_padding("I", 40), 20);
    }

    #[test]
    fn test_anchor_padding_wide_characters() {
        // Two CJK graphemes, anchor on the second, prefix two cells wide
        assert_eq!(anchor_padding("日本", 40), 18);
    }

    #[test]
    fn test_anchor_padding_narrow_area() {
        assert_eq!(anchor_padding("extraordinary", 2), 0);
    }

    #[test]
    fn test_excerpt_lines_follow_source_breaks() {
        let excerpt = GuidedExcerpt {
            before: "first line\n".to_string(),
            current: "second".to_string(),
            after: " line".to_string(),
        };
        let lines = excerpt_lines(&excerpt);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "first line");
        assert_eq!(line_text(&lines[1]), "second line");
        assert_eq!(lines[1].spans[0].content, "second");
        assert_eq!(lines[1].spans[0].style.bg, Some(colors::highlight()));
    }

    #[test]
    fn test_render_progress_bar_bounds() {
        let empty = render_progress_bar(0);
        assert_eq!(empty.spans[0].content, "");
        assert!(line_text(&empty).ends_with("  0%"));

        let full = render_progress_bar(100);
        assert_eq!(full.spans[1].content, "");
        assert!(line_text(&full).ends_with("100%"));
    }

    #[test]
    fn test_render_progress_bar_halfway() {
        let bar = render_progress_bar(50);
        assert_eq!(bar.spans[0].content.chars().count(), 10);
        assert_eq!(bar.spans[1].content.chars().count(), 10);
    }

    #[test]
    fn test_status_line_text() {
        let snapshot = PlaybackSnapshot {
            position: 4,
            count: 10,
            current_token: "word".to_string(),
            progress: 50,
            tempo: 250,
            is_playing: true,
            mode: ReadingMode::Guided,
            highlight: Some(0..4),
        };
        assert_eq!(
            line_text(&render_status_line(&snapshot)),
            "5/10  ·  250 wpm  ·  playing  ·  guided"
        );
    }

    #[test]
    fn test_status_line_empty_document() {
        let snapshot = PlaybackSnapshot {
            position: 0,
            count: 0,
            current_token: String::new(),
            progress: 0,
            tempo: 60,
            is_playing: false,
            mode: ReadingMode::Focus,
            highlight: None,
        };
        assert!(line_text(&render_status_line(&snapshot)).starts_with("0/0"));
    }
}
