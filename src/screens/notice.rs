use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, prelude::Frame};

use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::notifier::Notice;
use crate::ui::dialog::draw_dialog;

/// Modal alert with a single OK button.
pub struct NoticeScreen {
    notice: Notice,
}

impl NoticeScreen {
    pub fn new(notice: Notice) -> Self {
        Self { notice }
    }
}

#[async_trait]
impl ScreenWidget for NoticeScreen {
    fn title(&self) -> &str {
        &self.notice.title
    }

    fn is_overlay(&self) -> bool {
        true
    }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, _ctx: &AppCtx) {
        draw_dialog(f, size, self.title(), &self.notice.message, &[("OK", true)]);
    }

    async fn on_key(&mut self, k: KeyEvent, _ctx: &mut AppCtx) -> Result<Transition> {
        match k.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => Ok(Transition::Pop),
            _ => Ok(Transition::Stay),
        }
    }
}
