use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, prelude::Frame};

use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::ui::dialog::draw_dialog;

pub struct ConfirmQuitScreen {
    selected: usize, // 0 = Don't Quit, 1 = Quit
}

impl ConfirmQuitScreen {
    pub fn new() -> Self {
        Self { selected: 0 }
    }
}

#[async_trait]
impl ScreenWidget for ConfirmQuitScreen {
    fn title(&self) -> &str {
        "Quit"
    }

    fn is_overlay(&self) -> bool {
        true
    }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, _ctx: &AppCtx) {
        draw_dialog(
            f,
            size,
            self.title(),
            "Do you really want to quit the Menu Manager?",
            &[("Don't Quit", self.selected == 0), ("Quit", self.selected == 1)],
        );
    }

    async fn on_key(&mut self, k: KeyEvent, _ctx: &mut AppCtx) -> Result<Transition> {
        match k.code {
            KeyCode::Esc => return Ok(Transition::Pop),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char(' ') => {
                self.selected = 1 - self.selected;
            }
            KeyCode::Enter => {
                return Ok(if self.selected == 1 { Transition::Quit } else { Transition::Pop });
            }
            _ => {}
        }
        Ok(Transition::Stay)
    }
}
