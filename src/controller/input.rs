//! Key and mouse event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::model::{Action, Focus, IndexAction, IndexKind, IndexOp, SearchStrategy};
use crate::view::{classify_detail_click, detail_popup_area, DetailClick};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Ctrl+Q quits from anywhere, including while typing
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.model.apply(Action::Quit).await;
            return Ok(());
        }

        let state = self.model.snapshot().await;

        // Handle help popup
        if state.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                self.model.apply(Action::ToggleHelp).await;
            }
            return Ok(());
        }

        // Handle detail overlay (blocks all other interactions)
        if state.modal.is_some() {
            let action = match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::CloseDetail),
                KeyCode::Up => Some(Action::ScrollDetail(-1)),
                KeyCode::Down => Some(Action::ScrollDetail(1)),
                KeyCode::PageUp => Some(Action::ScrollDetail(-10)),
                KeyCode::PageDown => Some(Action::ScrollDetail(10)),
                _ => None,
            };
            if let Some(action) = action {
                self.model.apply(action).await;
            }
            return Ok(());
        }

        match state.focus {
            Focus::Query => match key.code {
                KeyCode::Enter => {
                    self.submit_search().await;
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    self.model.apply(Action::ToggleFocus).await;
                }
                KeyCode::Down => {
                    self.model.apply(Action::SetFocus(Focus::Results)).await;
                }
                KeyCode::Esc => {
                    self.model.apply(Action::ClearQuery).await;
                }
                KeyCode::Backspace => {
                    self.model.apply(Action::Backspace).await;
                }
                KeyCode::Left => {
                    self.model.apply(Action::PrevStrategy).await;
                }
                KeyCode::Right => {
                    self.model.apply(Action::NextStrategy).await;
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.model.apply(Action::InsertChar(c)).await;
                }
                _ => {}
            },
            Focus::Results => match key.code {
                KeyCode::Up => {
                    self.model.apply(Action::SelectPrev).await;
                }
                KeyCode::Down => {
                    self.model.apply(Action::SelectNext).await;
                }
                KeyCode::Enter => {
                    if state.selected_song().is_some() {
                        self.model.apply(Action::OpenDetail(state.selected)).await;
                    }
                }
                KeyCode::Left => {
                    self.model.apply(Action::PrevStrategy).await;
                }
                KeyCode::Right => {
                    self.model.apply(Action::NextStrategy).await;
                }
                KeyCode::Char(c @ '1'..='3') => {
                    let index = c as usize - '1' as usize;
                    self.model
                        .apply(Action::SelectStrategy(SearchStrategy::ALL[index]))
                        .await;
                }
                // Index management
                KeyCode::Char('f') => {
                    self.run_index_op(IndexOp::new(IndexAction::Create, IndexKind::FullText)).await;
                }
                KeyCode::Char('F') => {
                    self.run_index_op(IndexOp::new(IndexAction::Drop, IndexKind::FullText)).await;
                }
                KeyCode::Char('t') => {
                    self.run_index_op(IndexOp::new(IndexAction::Create, IndexKind::Trigram)).await;
                }
                KeyCode::Char('T') => {
                    self.run_index_op(IndexOp::new(IndexAction::Drop, IndexKind::Trigram)).await;
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.refresh_stats().await;
                    });
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    self.model.apply(Action::ToggleFocus).await;
                }
                KeyCode::Char('/') => {
                    self.model.apply(Action::SetFocus(Focus::Query)).await;
                }
                KeyCode::Char('h') | KeyCode::Char('H') => {
                    self.model.apply(Action::ToggleHelp).await;
                }
                KeyCode::Char('q') | KeyCode::Char('Q') => {
                    self.model.apply(Action::Quit).await;
                }
                _ => {}
            },
        }
        Ok(())
    }

    /// Mouse handling is limited to the detail overlay: a click outside it or
    /// on its close control dismisses it, a click on its content does not.
    pub async fn handle_mouse_event(&self, mouse: MouseEvent, area: Rect) {
        let state = self.model.snapshot().await;
        if state.modal.is_none() {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let popup = detail_popup_area(area);
                match classify_detail_click(popup, mouse.column, mouse.row) {
                    DetailClick::Outside | DetailClick::CloseControl => {
                        self.model.apply(Action::CloseDetail).await;
                    }
                    DetailClick::Content => {}
                }
            }
            MouseEventKind::ScrollUp => {
                self.model.apply(Action::ScrollDetail(-1)).await;
            }
            MouseEventKind::ScrollDown => {
                self.model.apply(Action::ScrollDetail(1)).await;
            }
            _ => {}
        }
    }
}
