//! Command deck: input line, status and the reading history list.

use crate::app::RenderState;
use crate::ui::theme::colors;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub const HELP_TEXT: &str = "\
@path        load a text or PDF file
@https://..  download a text or PDF
@@           read the clipboard
#N           reopen history entry N
:rm N        remove history entry N
:clear       clear the history
:h           toggle this help
:q           quit

While reading:
space play/pause   h/← l/→ seek   ↑/+ ↓/- tempo
m focus/guided     0-9 jump to N0%   Home/End
b/Esc back to deck q quit";

pub fn render_command_deck(frame: &mut Frame, area: Rect, state: &RenderState) {
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(colors::background())),
        area,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(area);

    let body = if state.show_help {
        Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(colors::text()))
            .block(titled_block(" help "))
    } else {
        Paragraph::new(history_lines(&state.history))
            .wrap(Wrap { trim: true })
            .block(titled_block(" history "))
    };
    frame.render_widget(body, layout[0]);

    if let Some(status) = &state.status {
        frame.render_widget(
            Paragraph::new(status.clone()).style(Style::default().fg(colors::anchor())),
            layout[1],
        );
    }

    let input = Line::from(vec![
        Span::styled("▌ ", Style::default().fg(colors::anchor())),
        Span::styled(state.command_input.clone(), Style::default().fg(colors::text())),
        Span::styled("█", Style::default().fg(colors::dimmed())),
    ]);
    frame.render_widget(
        Paragraph::new(input)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(colors::dimmed())),
            )
            .style(Style::default().bg(colors::surface())),
        layout[2],
    );
}

fn titled_block(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::dimmed()))
}

/// One numbered line per history entry; a hint when the history is empty.
pub fn history_lines(history: &[(String, String)]) -> Vec<Line<'static>> {
    if history.is_empty() {
        return vec![Line::from(Span::styled(
            "Nothing read yet. Type @file or @@ to start, :h for help.",
            Style::default().fg(colors::dimmed()),
        ))];
    }

    history
        .iter()
        .enumerate()
        .map(|(i, (name, detail))| {
            Line::from(vec![
                Span::styled(format!("#{:<3}", i + 1), Style::default().fg(colors::dimmed())),
                Span::styled(
                    name.clone(),
                    Style::default()
                        .fg(colors::text())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {detail}"), Style::default().fg(colors::dimmed())),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_lines_numbered_from_one() {
        let history = vec![
            ("Paste".to_string(), "hello world".to_string()),
            ("book.pdf".to_string(), "/tmp/book.pdf".to_string()),
        ];
        let lines = history_lines(&history);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, "#1  ");
        assert_eq!(lines[1].spans[1].content, "book.pdf");
        assert_eq!(lines[1].spans[2].content, "  /tmp/book.pdf");
    }

    #[test]
    fn test_history_lines_empty_hint() {
        let lines = history_lines(&[]);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans[0].content.contains("@@"));
    }
}
