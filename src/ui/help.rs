use ratatui::{
    text::Line,
    widgets::{Paragraph, Wrap},
};

use super::style::{span_key, span_sep, span_text};

fn legend(entries: &[(&'static str, &'static str)]) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (i, (key, what)) in entries.iter().enumerate() {
        if i > 0 {
            spans.push(span_sep());
        }
        spans.push(span_key(key));
        spans.push(span_text(what));
    }
    Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true })
}

pub fn help_list() -> Paragraph<'static> {
    legend(&[
        ("↑/↓", " Select"),
        ("n", " New"),
        ("Enter/e", " Edit"),
        ("d/Del", " Delete"),
        ("r/F5", " Refresh"),
        ("Ctrl+Q", " Quit"),
    ])
}

pub fn help_form() -> Paragraph<'static> {
    legend(&[
        ("↑/↓/Tab", " Move"),
        ("Enter", " Next / Press button"),
        ("←/→/Home/End", " Cursor"),
        ("Backspace/Delete", " Edit"),
        ("Esc", " Back"),
        ("Ctrl+Q", " Quit"),
    ])
}

pub fn help_loading() -> Paragraph<'static> {
    legend(&[("Esc", " Back"), ("Ctrl+Q", " Quit")])
}
