//! Overlay rendering (song detail, help popup)

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::AppState;
use super::utils::format_rank;

const CLOSE_LABEL: &str = " [x] ";

/// Where a mouse click landed relative to the song detail overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailClick {
    Outside,
    CloseControl,
    Content,
}

/// Centered area occupied by the song detail overlay (70% x 80% of `area`)
pub fn detail_popup_area(area: Rect) -> Rect {
    let popup_width = (area.width as u32 * 70 / 100) as u16;
    let popup_height = (area.height as u32 * 80 / 100) as u16;

    Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

fn close_control_area(popup: Rect) -> Rect {
    Rect {
        x: popup.right().saturating_sub(6),
        y: popup.y,
        width: 5,
        height: 1,
    }
}

pub fn classify_detail_click(popup: Rect, column: u16, row: u16) -> DetailClick {
    let position = Position::new(column, row);
    if close_control_area(popup).contains(position) {
        DetailClick::CloseControl
    } else if popup.contains(position) {
        DetailClick::Content
    } else {
        DetailClick::Outside
    }
}

pub fn render_detail_overlay(frame: &mut Frame, state: &AppState) {
    let Some(result) = state.modal_song() else {
        return;
    };
    let song = result.song();
    let popup_area = detail_popup_area(frame.area());

    // Clear the area behind the popup first
    frame.render_widget(Clear, popup_area);

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![Span::styled("Artist: ", label), Span::raw(song.artist.as_str())]),
        Line::from(vec![
            Span::styled("Album: ", label),
            Span::raw(format!(
                "{} ({})",
                song.album.as_deref().unwrap_or("Unknown"),
                song.year
            )),
        ]),
    ];

    if let Some(rank) = result.rank() {
        lines.push(Line::from(vec![
            Span::styled("Relevance Score: ", label),
            Span::styled(format_rank(rank), Style::default().fg(Color::Green)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Lyrics:", label)));
    if song.lyrics.is_empty() {
        lines.push(Line::from(Span::styled(
            "No lyrics available",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.extend(song.lyrics.lines().map(|line| Line::from(line.to_string())));
    }

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.modal_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", song.name))
                .title(
                    Line::from(Span::styled(CLOSE_LABEL, Style::default().fg(Color::Red)))
                        .right_aligned(),
                )
                .title_bottom(Line::from(" ↑↓ scroll · Esc close ").right_aligned())
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .padding(Padding::horizontal(1))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(detail, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── Search box ──"),
        ("Enter", "Run search"),
        ("← / →", "Change search method"),
        ("Esc", "Clear query"),
        ("Tab / ↓", "Go to results"),
        ("", ""),
        ("", "── Results ──"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "View full lyrics"),
        ("1 / 2 / 3", "ILIKE / Full Text / Fuzzy"),
        ("/ or Tab", "Back to search box"),
        ("", ""),
        ("", "── Indexes ──"),
        ("f / F", "Create / drop FTS index"),
        ("t / T", "Create / drop trigram index"),
        ("r", "Refresh database stats"),
        ("", ""),
        ("", "── General ──"),
        ("h", "Toggle this help"),
        ("q / Ctrl+Q", "Quit"),
    ];

    let popup_width = 62.min(area.width);
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_x = area.width.saturating_sub(popup_width) / 2;
    let popup_y = area.height.saturating_sub(popup_height) / 2;

    let popup_area = Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: popup_height,
    };

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (h or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_is_centered() {
        let popup = detail_popup_area(Rect::new(0, 0, 100, 50));
        assert_eq!(popup, Rect::new(15, 5, 70, 40));
    }

    #[test]
    fn test_classify_clicks() {
        let popup = detail_popup_area(Rect::new(0, 0, 120, 40));
        assert_eq!(classify_detail_click(popup, 0, 0), DetailClick::Outside);
        assert_eq!(
            classify_detail_click(popup, popup.x + 2, popup.y + 3),
            DetailClick::Content
        );
        assert_eq!(
            classify_detail_click(popup, popup.right() - 4, popup.y),
            DetailClick::CloseControl
        );
        // Title row away from the close control is still content
        assert_eq!(
            classify_detail_click(popup, popup.x + 1, popup.y),
            DetailClick::Content
        );
        assert_eq!(
            classify_detail_click(popup, popup.right(), popup.y + 1),
            DetailClick::Outside
        );
    }
}
