use anyhow::Result;
use async_trait::async_trait;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, prelude::Frame, widgets::Clear, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::notifier::NoticeQueue;
use crate::repository::MenuRepository;
use crate::screens::{ConfirmQuitScreen, MenuListScreen, NoticeScreen};
use crate::types::ItemId;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub enum Transition {
    Stay,
    Push(Box<dyn ScreenWidget>),
    Pop,
    Quit,
}

/// The user's answer from the delete dialog. The list screen `take()`s it
/// and runs the delete once it is active again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: ItemId,
    pub confirmed: bool,
}

pub struct AppCtx {
    pub repo: Arc<dyn MenuRepository>,
    pub notices: NoticeQueue,
    pub currency: String,
    pub pending_delete: Option<DeleteRequest>,
}

impl AppCtx {
    pub fn new(repo: Arc<dyn MenuRepository>, currency: &str) -> Self {
        Self {
            repo,
            notices: NoticeQueue::default(),
            currency: currency.to_string(),
            pending_delete: None,
        }
    }
}

#[async_trait]
pub trait ScreenWidget: Send {
    fn title(&self) -> &str {
        "Menu"
    }

    /// Overlays (dialogs) are drawn on top of the screen below them and do
    /// not take focus away from it.
    fn is_overlay(&self) -> bool {
        false
    }

    fn draw(&self, f: &mut Frame<'_>, area: Rect, ctx: &AppCtx);

    /// Called each time this screen becomes the active (non-overlay) screen.
    async fn on_focus(&mut self, _ctx: &mut AppCtx) -> Result<Transition> {
        Ok(Transition::Stay)
    }

    /// Called every loop turn while active, to collect finished background work.
    async fn tick(&mut self, _ctx: &mut AppCtx) -> Result<Transition> {
        Ok(Transition::Stay)
    }

    async fn on_key(&mut self, key: KeyEvent, ctx: &mut AppCtx) -> Result<Transition>;
}

/// Screen stack plus the bookkeeping for which screen last got focus.
pub struct Router {
    stack: Vec<Box<dyn ScreenWidget>>,
    needs_focus: bool,
}

impl Router {
    pub fn new(root: Box<dyn ScreenWidget>) -> Self {
        Self { stack: vec![root], needs_focus: true }
    }

    fn active_index(&self) -> Option<usize> {
        self.stack.iter().rposition(|s| !s.is_overlay())
    }

    fn top_is_overlay(&self) -> bool {
        self.stack.last().map_or(false, |s| s.is_overlay())
    }

    /// Apply a transition requested by the screen at `idx`. Returns false
    /// when the app should stop.
    fn apply(&mut self, idx: usize, t: Transition) -> bool {
        match t {
            Transition::Stay => {}
            Transition::Push(s) => {
                if !s.is_overlay() {
                    self.needs_focus = true;
                }
                let at = (idx + 1).min(self.stack.len());
                self.stack.insert(at, s);
            }
            Transition::Pop => {
                if idx < self.stack.len() {
                    let popped = self.stack.remove(idx);
                    if !popped.is_overlay() {
                        self.needs_focus = true;
                    }
                }
            }
            Transition::Quit => return false,
        }
        !self.stack.is_empty()
    }

    /// Focus, background work and pending notices. Returns false to quit.
    pub async fn update(&mut self, ctx: &mut AppCtx) -> Result<bool> {
        if self.needs_focus {
            self.needs_focus = false;
            if let Some(idx) = self.active_index() {
                let t = self.stack[idx].on_focus(ctx).await?;
                if !self.apply(idx, t) {
                    return Ok(false);
                }
            }
        }

        if let Some(idx) = self.active_index() {
            let t = self.stack[idx].tick(ctx).await?;
            if !self.apply(idx, t) {
                return Ok(false);
            }
        }

        // One notice at a time, never on top of another dialog.
        if !self.top_is_overlay() {
            if let Some(notice) = ctx.notices.pop() {
                self.stack.push(Box::new(NoticeScreen::new(notice)));
            }
        }
        Ok(!self.stack.is_empty())
    }

    pub fn draw(&self, f: &mut Frame<'_>, ctx: &AppCtx) {
        let size = f.size();
        match self.active_index() {
            Some(idx) => {
                for screen in &self.stack[idx..] {
                    screen.draw(f, size, ctx);
                }
            }
            None => f.render_widget(Clear, size),
        }
    }

    pub async fn on_key(&mut self, k: KeyEvent, ctx: &mut AppCtx) -> Result<bool> {
        // Ctrl+Q asks to quit from anywhere
        if k.modifiers.contains(KeyModifiers::CONTROL) && matches!(k.code, KeyCode::Char('q' | 'Q')) {
            self.stack.push(Box::new(ConfirmQuitScreen::new()));
            return Ok(true);
        }
        let Some(idx) = self.stack.len().checked_sub(1) else {
            return Ok(false);
        };
        let t = self.stack[idx].on_key(k, ctx).await?;
        Ok(self.apply(idx, t))
    }
}

pub async fn run_tui(mut ctx: AppCtx) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut ctx).await;

    // restore even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, ctx: &mut AppCtx) -> Result<()> {
    info!("starting TUI");
    let mut router = Router::new(Box::new(MenuListScreen::new()));

    loop {
        if !router.update(ctx).await? {
            break;
        }

        terminal.draw(|f| router.draw(f, ctx))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press && !router.on_key(k, ctx).await? {
                    break;
                }
            }
        }
    }
    info!("TUI closed");
    Ok(())
}
