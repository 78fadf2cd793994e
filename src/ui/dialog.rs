use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    prelude::Frame,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};
use textwrap::wrap;

use super::layout::centered_popup;
use super::style::button_row;

const MIN_WIDTH: u16 = 36;
const MAX_WIDTH: u16 = 64;

/// Inner width in columns: wide enough for the message on one line and for
/// the button row, within the dialog's bounds.
fn text_width(message: &str, buttons: &[(&'static str, bool)]) -> u16 {
    let buttons_w: usize = buttons.iter().map(|(l, _)| l.chars().count() + 4).sum::<usize>()
        + 3 * buttons.len().saturating_sub(1);
    let message_w = message.chars().count();
    message_w.max(buttons_w).clamp(MIN_WIDTH as usize, MAX_WIDTH as usize) as u16
}

/// Modal box: wrapped message lines, a spacer, then a row of buttons.
pub fn draw_dialog(f: &mut Frame<'_>, size: Rect, title: &str, message: &str, buttons: &[(&'static str, bool)]) {
    let text_w = text_width(message, buttons);
    let lines: Vec<String> = wrap(message, text_w as usize).into_iter().map(|s| s.into_owned()).collect();

    let inner_height = lines.len().max(1) as u16 + 2;
    let area = centered_popup(text_w + 4, inner_height + 2, size);
    let inner = area.inner(&Margin { horizontal: 2, vertical: 1 });

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(lines.len().max(1) as u16),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    f.render_widget(Clear, area);
    f.render_widget(Block::default().borders(Borders::ALL).title(title.to_string()), area);

    let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), rows[0]);
    f.render_widget(
        Paragraph::new(Line::from(button_row(buttons))).alignment(Alignment::Center),
        rows[2],
    );
}
