use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    prelude::Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use textwrap::wrap;
use tokio::task::JoinHandle;

use crate::app::{AppCtx, ScreenWidget, Transition};
use crate::error::MenuError;
use crate::form::{FormFields, FormMode, FormOutcome, MenuForm};
use crate::types::MenuItem;
use crate::ui::components::{field_line, TextField};
use crate::ui::help::{help_form, help_loading};
use crate::ui::layout::page_regions;
use crate::ui::style::{button_spans, button_spans_disabled, ACCENT};

const NAME: usize = 0;
const DESCRIPTION: usize = 1;
const PRICE: usize = 2;
const SAVE: usize = 3;
const CANCEL: usize = 4;
const POSITIONS: usize = 5;

/// Create/edit form for one menu item.
pub struct MenuFormScreen {
    form: MenuForm,
    name: TextField,
    description: TextField,
    price: TextField,
    field_index: usize,
    started: bool,
    load: Option<JoinHandle<Result<Vec<MenuItem>, MenuError>>>,
    save: Option<JoinHandle<Result<(), MenuError>>>,
}

impl MenuFormScreen {
    /// `param` is the item id handed over by the list, as text.
    pub fn from_param(param: Option<&str>) -> Self {
        Self {
            form: MenuForm::new(FormMode::from_param(param)),
            name: TextField::default(),
            description: TextField::default(),
            price: TextField::default(),
            field_index: NAME,
            started: false,
            load: None,
            save: None,
        }
    }

    fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.field_index {
            NAME => Some(&mut self.name),
            DESCRIPTION => Some(&mut self.description),
            PRICE => Some(&mut self.price),
            _ => None,
        }
    }

    fn fields_to_inputs(&mut self) {
        let FormFields { name, description, price } = &self.form.fields;
        self.name.set(name);
        self.description.set(description);
        self.price.set(price);
    }

    fn inputs_to_fields(&mut self) {
        self.form.fields = FormFields {
            name: self.name.text.clone(),
            description: self.description.text.clone(),
            price: self.price.text.clone(),
        };
    }

    fn submit(&mut self, ctx: &AppCtx) {
        self.inputs_to_fields();
        if let Some(submission) = self.form.begin_save(&ctx.notices) {
            let repo = ctx.repo.clone();
            self.save = Some(tokio::spawn(async move { submission.send(repo.as_ref()).await }));
        }
    }

    fn buttons_line(&self) -> Line<'static> {
        let mut spans = if self.form.can_submit() {
            button_spans(self.form.save_label(), self.field_index == SAVE)
        } else {
            button_spans_disabled(self.form.save_label())
        };
        spans.push(Span::raw("   "));
        spans.extend(button_spans("Cancel", self.field_index == CANCEL));
        Line::from(spans)
    }

    fn back_if(outcome: FormOutcome) -> Transition {
        match outcome {
            FormOutcome::NavigateBack => Transition::Pop,
            FormOutcome::Stay => Transition::Stay,
        }
    }
}

async fn finished<T>(slot: &mut Option<JoinHandle<Result<T, MenuError>>>) -> Option<Result<T, MenuError>> {
    if !slot.as_ref().is_some_and(|h| h.is_finished()) {
        return None;
    }
    let handle = slot.take()?;
    Some(handle.await.unwrap_or_else(|e| Err(MenuError::from(e))))
}

#[async_trait]
impl ScreenWidget for MenuFormScreen {
    fn title(&self) -> &str {
        self.form.title()
    }

    fn draw(&self, f: &mut Frame<'_>, size: Rect, _ctx: &AppCtx) {
        let explanation = match self.form.mode() {
            FormMode::Create => "Fill in the new item. Name and price are required.",
            FormMode::Edit(_) => "Change any field and press the update button. All fields are saved together.",
        };
        let width = size.width.saturating_sub(8).max(10) as usize;
        let explanation_lines: Vec<Line> = wrap(explanation, width).into_iter().map(|s| Line::from(s.into_owned())).collect();
        let header_needed = 2 + 2 + 1 + explanation_lines.len() as u16;

        let regions = page_regions(size, header_needed, 3);

        f.render_widget(Block::default().borders(Borders::ALL), regions.header);
        let mut header = vec![
            Line::from(Span::styled(self.title().to_string(), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)))
                .alignment(Alignment::Center),
        ];
        header.extend(explanation_lines);
        f.render_widget(Paragraph::new(header), regions.header_inner);

        f.render_widget(Block::default().borders(Borders::ALL), regions.body);
        f.render_widget(Block::default().borders(Borders::ALL), regions.footer);

        if self.form.is_loading() {
            f.render_widget(Paragraph::new("Loading item...").alignment(Alignment::Center), regions.body_inner);
            f.render_widget(help_loading(), regions.footer_inner);
            return;
        }

        let lines = vec![
            Line::from(""),
            field_line("Name *", &self.name, self.field_index == NAME, "e.g. Pepperoni Pizza"),
            field_line("Description", &self.description, self.field_index == DESCRIPTION, "e.g. Tomato sauce, cheese and pepperoni"),
            field_line("Price *", &self.price, self.field_index == PRICE, "e.g. 48.50"),
            Line::from(""),
            self.buttons_line(),
        ];
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), regions.body_inner);
        f.render_widget(help_form(), regions.footer_inner);
    }

    async fn on_focus(&mut self, ctx: &mut AppCtx) -> Result<Transition> {
        if self.started {
            return Ok(Transition::Stay);
        }
        self.started = true;
        if self.form.is_loading() {
            let repo = ctx.repo.clone();
            self.load = Some(tokio::spawn(async move { repo.list().await }));
        }
        Ok(Transition::Stay)
    }

    async fn tick(&mut self, ctx: &mut AppCtx) -> Result<Transition> {
        if let Some(result) = finished(&mut self.load).await {
            let outcome = self.form.finish_load(result, &ctx.notices);
            self.fields_to_inputs();
            return Ok(Self::back_if(outcome));
        }
        if let Some(result) = finished(&mut self.save).await {
            let outcome = self.form.finish_save(result, &ctx.notices);
            return Ok(Self::back_if(outcome));
        }
        Ok(Transition::Stay)
    }

    async fn on_key(&mut self, k: KeyEvent, ctx: &mut AppCtx) -> Result<Transition> {
        // a save in flight has to report back here before the form can close
        if self.form.is_submitting() {
            return Ok(Transition::Stay);
        }
        if k.code == KeyCode::Esc {
            return Ok(Transition::Pop);
        }
        // fields stay locked until the item has loaded
        if self.form.is_loading() {
            return Ok(Transition::Stay);
        }

        match k.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.field_index = (self.field_index + POSITIONS - 1) % POSITIONS;
            }
            KeyCode::Down | KeyCode::Tab => {
                self.field_index = (self.field_index + 1) % POSITIONS;
            }

            KeyCode::Enter if self.field_index == SAVE => self.submit(ctx),
            KeyCode::Enter if self.field_index == CANCEL => return Ok(Transition::Pop),
            KeyCode::Enter => self.field_index += 1,

            _ => match self.focused_field() {
                Some(field) => edit_field(field, k),
                None => {
                    if matches!(k.code, KeyCode::Left | KeyCode::Right) {
                        self.field_index = if self.field_index == SAVE { CANCEL } else { SAVE };
                    }
                }
            },
        }
        Ok(Transition::Stay)
    }
}

fn edit_field(field: &mut TextField, k: KeyEvent) {
    match k.code {
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.home(),
        KeyCode::End => field.end(),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Char(c) if !k.modifiers.contains(KeyModifiers::CONTROL) => field.insert_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{LocalRepository, MenuRepository};
    use crate::types::NewMenuItem;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE, kind: KeyEventKind::Press, state: KeyEventState::NONE }
    }

    async fn type_text(screen: &mut MenuFormScreen, ctx: &mut AppCtx, text: &str) {
        for c in text.chars() {
            screen.on_key(key(KeyCode::Char(c)), ctx).await.unwrap();
        }
    }

    /// Tick until the screen leaves or its background work is done.
    async fn settle(screen: &mut MenuFormScreen, ctx: &mut AppCtx) -> Transition {
        loop {
            tokio::task::yield_now().await;
            let t = screen.tick(ctx).await.unwrap();
            if !matches!(t, Transition::Stay) || (screen.load.is_none() && screen.save.is_none()) {
                return t;
            }
        }
    }

    fn ctx(dir: &TempDir) -> AppCtx {
        AppCtx::new(Arc::new(LocalRepository::new(dir.path(), "menu_items")), "R$")
    }

    #[tokio::test]
    async fn typed_item_is_created_and_form_closes() {
        let dir = TempDir::new().unwrap();
        let mut ctx = ctx(&dir);
        let mut screen = MenuFormScreen::from_param(None);
        screen.on_focus(&mut ctx).await.unwrap();

        type_text(&mut screen, &mut ctx, "Soda").await;
        screen.on_key(key(KeyCode::Tab), &mut ctx).await.unwrap();
        screen.on_key(key(KeyCode::Tab), &mut ctx).await.unwrap();
        type_text(&mut screen, &mut ctx, "3.50").await;
        screen.on_key(key(KeyCode::Enter), &mut ctx).await.unwrap();
        screen.on_key(key(KeyCode::Enter), &mut ctx).await.unwrap();
        assert_eq!(screen.form.save_label(), "Saving...");

        assert!(matches!(settle(&mut screen, &mut ctx).await, Transition::Pop));
        let items = ctx.repo.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Soda");
        assert_eq!(items[0].price, 3.5);
    }

    #[tokio::test]
    async fn invalid_price_stays_with_a_notice() {
        let dir = TempDir::new().unwrap();
        let mut ctx = ctx(&dir);
        let mut screen = MenuFormScreen::from_param(None);

        type_text(&mut screen, &mut ctx, "Soda").await;
        screen.field_index = PRICE;
        type_text(&mut screen, &mut ctx, "abc").await;
        screen.field_index = SAVE;
        screen.on_key(key(KeyCode::Enter), &mut ctx).await.unwrap();

        assert!(screen.save.is_none());
        assert_eq!(ctx.notices.pop().map(|n| n.message), Some("Price must be a valid number.".to_string()));
        assert!(!dir.path().join("menu_items.json").exists());
    }

    #[tokio::test]
    async fn edit_mode_prefills_and_locks_until_loaded() {
        let dir = TempDir::new().unwrap();
        let mut ctx = ctx(&dir);
        ctx.repo
            .create(&NewMenuItem { name: "Pizza".into(), description: "Cheese".into(), price: 48.5 })
            .await
            .unwrap();
        let id = ctx.repo.list().await.unwrap()[0].id.to_string();

        let mut screen = MenuFormScreen::from_param(Some(&id));
        screen.on_key(key(KeyCode::Char('x')), &mut ctx).await.unwrap();
        assert_eq!(screen.name.text, "");

        screen.on_focus(&mut ctx).await.unwrap();
        assert!(matches!(settle(&mut screen, &mut ctx).await, Transition::Stay));
        assert_eq!(screen.name.text, "Pizza");
        assert_eq!(screen.price.text, "48.5");
        assert_eq!(screen.form.save_label(), "Update Item");
    }

    #[tokio::test]
    async fn unknown_edit_target_pops_back() {
        let dir = TempDir::new().unwrap();
        let mut ctx = ctx(&dir);
        let mut screen = MenuFormScreen::from_param(Some("12345"));

        screen.on_focus(&mut ctx).await.unwrap();

        assert!(matches!(settle(&mut screen, &mut ctx).await, Transition::Pop));
        assert_eq!(screen.name.text, "");
        assert_eq!(ctx.notices.pop().map(|n| n.message), Some("Item not found.".to_string()));
    }

    #[tokio::test]
    async fn form_stays_open_until_the_save_reports_back() {
        let dir = TempDir::new().unwrap();
        let mut ctx = ctx(&dir);
        let mut screen = MenuFormScreen::from_param(None);
        type_text(&mut screen, &mut ctx, "Soda").await;
        screen.field_index = PRICE;
        type_text(&mut screen, &mut ctx, "3.50").await;
        screen.field_index = SAVE;
        screen.on_key(key(KeyCode::Enter), &mut ctx).await.unwrap();

        assert!(matches!(screen.on_key(key(KeyCode::Esc), &mut ctx).await.unwrap(), Transition::Stay));
        assert!(screen.save.is_some());

        assert!(matches!(settle(&mut screen, &mut ctx).await, Transition::Pop));
        assert_eq!(ctx.repo.list().await.unwrap().len(), 1);
    }
}
