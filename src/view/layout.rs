//! Layout rendering (top bar, sidebar, key hints)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{AppState, Focus, IndexOp, SearchStrategy};
use super::utils::truncate_string;

pub fn render_top_bar(frame: &mut Frame, area: Rect, state: &AppState, api_url: &str) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(62), // Strategy selector
        ])
        .split(area);

    let focused = state.focus == Focus::Query;
    let search_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if state.query.is_empty() {
        Span::styled(
            "Search for songs, lyrics, or artists...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(state.query.as_str(), search_style)
    };

    let title = if state.loading { " Searching... " } else { " Search (Enter) " };
    let api_title = match &state.api_banner {
        Some(banner) => format!(" {} · {} ", banner, api_url),
        None => format!(" {} ", api_url),
    };

    let search = Paragraph::new(Line::from(search_text)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_bottom(Line::from(api_title).right_aligned())
            .padding(Padding::horizontal(1))
            .border_style(if focused {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(search, chunks[0]);

    if focused {
        if let Some(cursor_x) = query_cursor_x(chunks[0], &state.query) {
            frame.set_cursor_position((cursor_x, chunks[0].y + 1));
        }
    }

    let mut spans = Vec::new();
    for (i, strategy) in SearchStrategy::ALL.iter().enumerate() {
        let selected = *strategy == state.strategy;
        let marker = if selected { "(•)" } else { "( )" };
        let style = if selected {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!("{} {}", marker, strategy.short_label()), style));
    }

    let selector = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Method (←/→) ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(selector, chunks[1]);
}

/// Cursor column after `query` inside the bordered, padded input box, or
/// `None` once the text reaches the right border.
fn query_cursor_x(input: Rect, query: &str) -> Option<u16> {
    // Display width, so wide characters advance two columns
    let width = u16::try_from(Span::raw(query).width()).ok()?;
    let cursor_x = input.x.checked_add(2)?.checked_add(width)?;
    (cursor_x < input.right().saturating_sub(1)).then_some(cursor_x)
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Index controls (4 items + 2 borderlines)
            Constraint::Min(0),    // Database statistics
        ])
        .split(area);

    render_index_controls(frame, chunks[0], state);

    // Stats are only shown once they have been fetched
    if state.stats.is_some() {
        render_stats(frame, chunks[1], state);
    }
}

fn render_index_controls(frame: &mut Frame, area: Rect, state: &AppState) {
    let keys = ["f", "F", "t", "T"];
    let items: Vec<ListItem> = IndexOp::ALL
        .iter()
        .zip(keys)
        .map(|(op, key)| {
            let style = if state.loading {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", key), style.add_modifier(Modifier::BOLD)),
                Span::styled(op.button_label(), style),
            ]))
        })
        .collect();

    let controls = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Index Management ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(controls, area);
}

fn render_stats(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(snapshot) = &state.stats else {
        return;
    };
    let stats = &snapshot.stats;
    let width = area.width.saturating_sub(6) as usize;

    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Total songs: "),
            Span::styled(stats.song_count.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(Span::styled("Current Indexes:", heading)),
    ];

    if stats.indexes.is_empty() {
        lines.push(Line::from(Span::styled(
            "No indexes found on songs table.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.extend(
            stats
                .indexes
                .iter()
                .map(|index| Line::from(format!("• {}", truncate_string(&index.indexname, width)))),
        );
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("PostgreSQL Extensions:", heading)));
    lines.extend(
        stats
            .extensions
            .iter()
            .map(|ext| Line::from(format!("• {}", truncate_string(ext, width)))),
    );

    let updated = format!(" Updated {} (r) ", snapshot.fetched_at.format("%H:%M:%S"));
    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Database Statistics ")
            .title_bottom(Line::from(updated).right_aligned())
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(panel, area);
}

pub fn render_hint_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = match state.focus {
        Focus::Query => " Enter search · ←/→ method · Tab results · Esc clear · Ctrl+Q quit",
        Focus::Results => {
            " ↑/↓ select · Enter lyrics · 1-3 method · f/F t/T indexes · r stats · / search · h help · q quit"
        }
    };
    let hint = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_follows_display_width() {
        let input = Rect::new(0, 0, 40, 3);
        assert_eq!(query_cursor_x(input, ""), Some(2));
        assert_eq!(query_cursor_x(input, "love"), Some(6));
        // Each CJK character occupies two cells
        assert_eq!(query_cursor_x(input, "日本"), Some(6));
        assert_eq!(query_cursor_x(input, "日本語"), Some(8));
    }

    #[test]
    fn test_cursor_hidden_at_border() {
        let input = Rect::new(0, 0, 10, 3);
        assert_eq!(query_cursor_x(input, "abcdef"), Some(8));
        assert_eq!(query_cursor_x(input, "abcdefg"), None);
        assert_eq!(query_cursor_x(input, "日本語"), Some(8));
        assert_eq!(query_cursor_x(input, "日本語日"), None);
    }
}
