//! Main content area rendering (status message, executed query, results)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{AppState, Focus, Phase, SongResult};
use super::utils::{
    calculate_num_width, format_execution_time, format_rank, render_scrollable_list,
    single_line, truncate_lyrics, truncate_string, wrap_chars,
};

pub fn render_main_content(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status message
            Constraint::Length(7), // Executed query
            Constraint::Min(0),    // Results
        ])
        .split(area);

    render_message(frame, chunks[0], state);
    render_executed_query(frame, chunks[1], state);
    render_results(frame, chunks[2], state);
}

fn render_message(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = match (state.phase(), &state.message) {
        (Phase::Loading, _) => {
            Line::from(Span::styled(" Loading...", Style::default().fg(Color::Yellow)))
        }
        (_, Some(message)) => {
            // Search and index outcomes share this line
            let color = if message.starts_with("Error") { Color::Red } else { Color::Green };
            Line::from(Span::styled(format!(" {}", message), Style::default().fg(color)))
        }
        (_, None) => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_executed_query(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Executed Query ")
        .padding(Padding::horizontal(1));

    let Some(executed) = &state.executed else {
        let empty = Paragraph::new("No query executed yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = Vec::new();
    if let Some(elapsed) = executed.elapsed_ms {
        lines.push(Line::from(vec![
            Span::styled("Execution Time: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format_execution_time(elapsed)),
        ]));
    }
    lines.push(Line::from(Span::styled(
        executed.sql.as_str(),
        Style::default().fg(Color::Cyan),
    )));

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block.title_bottom(Line::from(format!(" {} ", executed.strategy.label())).right_aligned()));
    frame.render_widget(panel, area);
}

fn render_results(frame: &mut Frame, area: Rect, state: &AppState) {
    let is_focused = state.focus == Focus::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    if state.shows_no_results() || state.results.is_empty() {
        let text = if state.shows_no_results() {
            "No songs found matching your query."
        } else {
            "Type in search and press Enter to find songs"
        };
        let content = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Results ")
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
        frame.render_widget(content, area);
        return;
    }

    let num_width = calculate_num_width(state.results.len());
    let text_width = area.width.saturating_sub(num_width as u16 + 6) as usize;

    let items: Vec<ListItem> = state
        .results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            result_item(result, i, num_width, text_width, is_focused && i == state.selected)
        })
        .collect();

    let title = format!(" Results ({}) ", state.results.len());
    render_scrollable_list(
        frame,
        area,
        items,
        state.selected,
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
}

fn result_item(
    result: &SongResult,
    index: usize,
    num_width: usize,
    text_width: usize,
    is_selected: bool,
) -> ListItem<'static> {
    let song = result.song();
    let indent = " ".repeat(num_width + 1);

    let name_style = if is_selected {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    let detail_style = Style::default().fg(Color::Gray);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{:>width$} ", index + 1, width = num_width), detail_style),
            Span::styled(truncate_string(&song.name, text_width), name_style),
        ]),
        Line::from(Span::styled(
            format!("{}Artist: {}", indent, truncate_string(&song.artist, text_width)),
            detail_style,
        )),
        Line::from(Span::styled(
            format!(
                "{}Album: {} ({})",
                indent,
                song.album.as_deref().unwrap_or("Unknown"),
                song.year
            ),
            detail_style,
        )),
    ];

    if let Some(rank) = result.rank() {
        lines.push(Line::from(Span::styled(
            format!("{}Relevance Score: {}", indent, format_rank(rank)),
            Style::default().fg(Color::Green),
        )));
    }

    // Full preview, wrapped over as many rows as it needs
    let preview = format!("Lyrics: {}", single_line(&truncate_lyrics(&song.lyrics)));
    lines.extend(wrap_chars(&preview, text_width).into_iter().map(|row| {
        Line::from(Span::styled(
            format!("{}{}", indent, row),
            Style::default().fg(Color::DarkGray),
        ))
    }));

    if is_selected {
        lines.push(Line::from(Span::styled(
            format!("{}View Full Lyrics (Enter)", indent),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        )));
    }
    lines.push(Line::from(""));

    ListItem::new(lines)
}
