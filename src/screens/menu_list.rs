use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    prelude::Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::error::MenuError;
use crate::list::{begin_delete, finish_delete, DeleteOutcome, ListDisplay, MenuList, EMPTY_MESSAGE};
use crate::screens::{ConfirmDeleteScreen, ConfirmQuitScreen, MenuFormScreen};
use crate::types::{format_price, ItemId, MenuItem};
use crate::ui::help::help_list;
use crate::ui::layout::page_regions;
use crate::ui::style::ACCENT;

type LoadTask = JoinHandle<Result<Vec<MenuItem>, MenuError>>;
type DeleteTask = JoinHandle<Result<(), MenuError>>;

/// Root screen: every item on the menu, reloaded whenever the screen
/// becomes active again.
pub struct MenuListScreen {
    list: MenuList,
    selected: usize,
    loads: Vec<LoadTask>,
    delete: Option<(ItemId, DeleteTask)>,
}

impl MenuListScreen {
    pub fn new() -> Self {
        Self { list: MenuList::default(), selected: 0, loads: Vec::new(), delete: None }
    }

    /// Fetch in the background. Earlier fetches still in flight are not
    /// cancelled.
    fn start_load(&mut self, ctx: &AppCtx) {
        self.list.begin_load();
        let repo = ctx.repo.clone();
        self.loads.push(tokio::spawn(async move { repo.list().await }));
    }

    async fn collect_loads(&mut self, ctx: &AppCtx) {
        let mut i = 0;
        while i < self.loads.len() {
            if !self.loads[i].is_finished() {
                i += 1;
                continue;
            }
            let task = self.loads.remove(i);
            let result = task.await.unwrap_or_else(|e| Err(MenuError::from(e)));
            self.list.finish_load(result, &ctx.notices);
        }
        if !self.loads.is_empty() {
            self.list.begin_load();
        }
        self.selected = self.selected.min(self.list.items().len().saturating_sub(1));
    }

    /// Send a confirmed delete in the background; the list keeps drawing and
    /// taking keys until it resolves.
    fn start_delete(&mut self, ctx: &AppCtx, id: ItemId) {
        let repo = ctx.repo.clone();
        self.delete = Some((id, tokio::spawn(async move { repo.delete(id).await })));
    }

    async fn collect_delete(&mut self, ctx: &AppCtx) {
        if !self.delete.as_ref().is_some_and(|(_, task)| task.is_finished()) {
            return;
        }
        if let Some((id, task)) = self.delete.take() {
            let result = task.await.unwrap_or_else(|e| Err(MenuError::from(e)));
            if finish_delete(id, result, &ctx.notices) == DeleteOutcome::Deleted {
                self.start_load(ctx);
            }
        }
    }

    fn selected_item(&self) -> Option<&MenuItem> {
        self.list.items().get(self.selected)
    }

    fn item_line(item: &MenuItem, selected: bool, currency: &str) -> Line<'static> {
        let marker = if selected { "▶ " } else { "  " };
        let name_style = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(item.name.clone(), name_style),
            Span::raw("  "),
            Span::styled(format_price(currency, item.price), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        ];
        if !item.description.is_empty() {
            spans.push(Span::styled(format!("  {}", item.description), Style::default().fg(Color::Gray)));
        }
        Line::from(spans)
    }
}

impl Default for MenuListScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScreenWidget for MenuListScreen {
    fn title(&self) -> &str {
        "Menu"
    }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, ctx: &AppCtx) {
        let regions = page_regions(size, 5, 3);

        // header
        f.render_widget(Block::default().borders(Borders::ALL), regions.header);
        let status = if self.delete.is_some() {
            "Deleting..."
        } else if self.list.is_loading() {
            "Loading..."
        } else {
            ""
        };
        let count = format!("{} item(s)", self.list.items().len());
        let header = vec![
            Line::from(Span::styled(
                self.title().to_string(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![Span::raw(count), Span::raw("  "), Span::styled(status, Style::default().fg(Color::Yellow))]),
        ];
        f.render_widget(Paragraph::new(header).alignment(Alignment::Center), regions.header_inner);

        // items
        f.render_widget(Block::default().borders(Borders::ALL), regions.body);
        let body = regions.body_inner;
        match self.list.display() {
            ListDisplay::Loading => {
                f.render_widget(Paragraph::new("Loading...").alignment(Alignment::Center), body);
            }
            ListDisplay::Empty => {
                let p = Paragraph::new(EMPTY_MESSAGE)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                f.render_widget(p, body);
            }
            ListDisplay::Items(items) => {
                let lines: Vec<Line> = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| Self::item_line(item, i == self.selected, &ctx.currency))
                    .collect();
                let visible = body.height.max(1) as usize;
                let offset = self.selected.saturating_sub(visible - 1) as u16;
                f.render_widget(Paragraph::new(lines).scroll((offset, 0)), body);
            }
        }

        // legend
        f.render_widget(Block::default().borders(Borders::ALL), regions.footer);
        f.render_widget(help_list(), regions.footer_inner);
    }

    async fn on_focus(&mut self, ctx: &mut AppCtx) -> Result<Transition> {
        debug!("menu list focused");
        self.start_load(ctx);
        Ok(Transition::Stay)
    }

    async fn tick(&mut self, ctx: &mut AppCtx) -> Result<Transition> {
        if let Some(req) = ctx.pending_delete.take() {
            if begin_delete(req.id, &ctx.notices.answered(req.confirmed)) {
                self.start_delete(ctx, req.id);
            }
        }
        self.collect_delete(ctx).await;
        self.collect_loads(ctx).await;
        Ok(Transition::Stay)
    }

    async fn on_key(&mut self, k: KeyEvent, ctx: &mut AppCtx) -> Result<Transition> {
        let count = self.list.items().len();
        match k.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = count.saturating_sub(1),

            KeyCode::Char('n') | KeyCode::Char('+') | KeyCode::Insert => {
                return Ok(Transition::Push(Box::new(MenuFormScreen::from_param(None))));
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(item) = self.selected_item() {
                    let param = item.id.to_string();
                    return Ok(Transition::Push(Box::new(MenuFormScreen::from_param(Some(&param)))));
                }
            }
            // one delete at a time
            KeyCode::Char('d') | KeyCode::Delete if self.delete.is_none() => {
                if let Some(item) = self.selected_item() {
                    return Ok(Transition::Push(Box::new(ConfirmDeleteScreen::new(item.id, &item.name))));
                }
            }
            KeyCode::Char('r') | KeyCode::F(5) => self.start_load(ctx),
            KeyCode::Esc | KeyCode::Char('q') => {
                return Ok(Transition::Push(Box::new(ConfirmQuitScreen::new())));
            }
            _ => {}
        }
        Ok(Transition::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DeleteRequest;
    use crate::repository::{LocalRepository, MenuRepository, RemoteRepository};
    use crate::types::NewMenuItem;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::net::TcpListener;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE, kind: KeyEventKind::Press, state: KeyEventState::NONE }
    }

    async fn seeded(dir: &TempDir, names: &[&str]) -> AppCtx {
        let repo = LocalRepository::new(dir.path(), "menu_items");
        for name in names {
            repo.create(&NewMenuItem { name: name.to_string(), description: String::new(), price: 5.0 })
                .await
                .unwrap();
        }
        AppCtx::new(Arc::new(repo), "R$")
    }

    async fn settle(screen: &mut MenuListScreen, ctx: &mut AppCtx) {
        while !screen.loads.is_empty() || screen.delete.is_some() {
            tokio::task::yield_now().await;
            screen.tick(ctx).await.unwrap();
        }
    }

    #[tokio::test]
    async fn focus_loads_items() {
        let dir = TempDir::new().unwrap();
        let mut ctx = seeded(&dir, &["Pizza", "Soda"]).await;
        let mut screen = MenuListScreen::new();

        screen.on_focus(&mut ctx).await.unwrap();
        assert!(screen.list.is_loading());
        settle(&mut screen, &mut ctx).await;

        assert!(!screen.list.is_loading());
        assert_eq!(screen.list.items().len(), 2);
        assert!(ctx.notices.is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete_from_dialog_removes_and_reloads() {
        let dir = TempDir::new().unwrap();
        let mut ctx = seeded(&dir, &["Pizza", "Soda"]).await;
        let mut screen = MenuListScreen::new();
        screen.on_focus(&mut ctx).await.unwrap();
        settle(&mut screen, &mut ctx).await;

        let Transition::Push(mut dialog) = screen.on_key(key(KeyCode::Char('d')), &mut ctx).await.unwrap() else {
            panic!("expected the delete dialog");
        };
        dialog.on_key(key(KeyCode::Right), &mut ctx).await.unwrap();
        dialog.on_key(key(KeyCode::Enter), &mut ctx).await.unwrap();

        screen.tick(&mut ctx).await.unwrap();
        settle(&mut screen, &mut ctx).await;

        let names: Vec<_> = screen.list.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Soda"]);
        assert_eq!(ctx.notices.pop().map(|n| n.title), Some("Success".to_string()));
    }

    #[tokio::test]
    async fn cancelled_delete_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut ctx = seeded(&dir, &["Pizza"]).await;
        let mut screen = MenuListScreen::new();
        screen.on_focus(&mut ctx).await.unwrap();
        settle(&mut screen, &mut ctx).await;

        let Transition::Push(mut dialog) = screen.on_key(key(KeyCode::Delete), &mut ctx).await.unwrap() else {
            panic!("expected the delete dialog");
        };
        dialog.on_key(key(KeyCode::Esc), &mut ctx).await.unwrap();
        screen.tick(&mut ctx).await.unwrap();

        assert_eq!(ctx.repo.list().await.unwrap().len(), 1);
        assert!(ctx.notices.is_empty());
    }

    #[tokio::test]
    async fn edit_and_delete_need_a_selection() {
        let dir = TempDir::new().unwrap();
        let mut ctx = seeded(&dir, &[]).await;
        let mut screen = MenuListScreen::new();

        assert!(matches!(screen.on_key(key(KeyCode::Enter), &mut ctx).await.unwrap(), Transition::Stay));
        assert!(matches!(screen.on_key(key(KeyCode::Char('d')), &mut ctx).await.unwrap(), Transition::Stay));
        assert!(matches!(screen.on_key(key(KeyCode::Char('n')), &mut ctx).await.unwrap(), Transition::Push(_)));
    }

    #[tokio::test]
    async fn hung_delete_keeps_the_screen_responsive() {
        // accepts connections at the socket level but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let mut ctx = AppCtx::new(Arc::new(RemoteRepository::new(&url, 1).unwrap()), "R$");
        let mut screen = MenuListScreen::new();
        ctx.pending_delete = Some(DeleteRequest { id: 1, confirmed: true });

        let ticked = tokio::time::timeout(Duration::from_secs(2), screen.tick(&mut ctx)).await;

        assert!(ticked.is_ok());
        assert!(screen.delete.is_some());
        let quit = screen.on_key(key(KeyCode::Esc), &mut ctx).await.unwrap();
        assert!(matches!(quit, Transition::Push(_)));
        assert!(matches!(screen.on_key(key(KeyCode::Char('d')), &mut ctx).await.unwrap(), Transition::Stay));
        drop(listener);
    }
}
