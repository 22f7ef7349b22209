//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Main layout structure (top bar, sidebar, key hints)
//! - `content`: Status message, executed query and result list
//! - `overlays`: Modal overlays (song detail, help)

mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::AppState;

pub use overlays::{classify_detail_click, detail_popup_area, DetailClick};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, state: &AppState, api_url: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + method selector
                Constraint::Min(0),    // Main content (sidebar + content)
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], state, api_url);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30), // Index management + stats
                Constraint::Percentage(70), // Main content
            ])
            .split(chunks[1]);

        layout::render_sidebar(frame, main_chunks[0], state);
        content::render_main_content(frame, main_chunks[1], state);
        layout::render_hint_bar(frame, chunks[2], state);

        // Song detail overlay (if open)
        if state.modal.is_some() {
            overlays::render_detail_overlay(frame, state);
        }

        // Help popup overlay (if open)
        if state.show_help {
            overlays::render_help_popup(frame);
        }
    }
}
