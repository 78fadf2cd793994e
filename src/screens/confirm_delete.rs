use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, prelude::Frame};

use crate::app::{AppCtx, DeleteRequest, ScreenWidget, Transition};
use crate::types::ItemId;
use crate::ui::dialog::draw_dialog;

/// Asks before deleting. The answer, yes or no, is handed to the list
/// screen through `AppCtx::pending_delete`.
pub struct ConfirmDeleteScreen {
    id: ItemId,
    message: String,
    selected: usize, // 0 = Cancel, 1 = Delete
}

impl ConfirmDeleteScreen {
    pub fn new(id: ItemId, name: &str) -> Self {
        Self { id, message: format!("Delete \"{name}\"? This cannot be undone."), selected: 0 }
    }

    fn answer(&self, ctx: &mut AppCtx, confirmed: bool) -> Transition {
        ctx.pending_delete = Some(DeleteRequest { id: self.id, confirmed });
        Transition::Pop
    }
}

#[async_trait]
impl ScreenWidget for ConfirmDeleteScreen {
    fn title(&self) -> &str {
        "Confirm"
    }

    fn is_overlay(&self) -> bool {
        true
    }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, _ctx: &AppCtx) {
        draw_dialog(
            f,
            size,
            self.title(),
            &self.message,
            &[("Cancel", self.selected == 0), ("Delete", self.selected == 1)],
        );
    }

    async fn on_key(&mut self, k: KeyEvent, ctx: &mut AppCtx) -> Result<Transition> {
        match k.code {
            KeyCode::Esc => return Ok(self.answer(ctx, false)),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char(' ') => {
                self.selected = 1 - self.selected;
            }
            KeyCode::Enter => return Ok(self.answer(ctx, self.selected == 1)),
            _ => {}
        }
        Ok(Transition::Stay)
    }
}
