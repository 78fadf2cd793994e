use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};
use std::borrow::Cow;

pub fn span_key(s: &'static str) -> Span<'static> {
    Span::styled(s, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}
pub fn span_sep() -> Span<'static> {
    Span::styled("  |  ", Style::default().fg(Color::DarkGray))
}
pub fn span_text(s: &'static str) -> Span<'static> {
    Span::raw(s)
}

pub const ACCENT: Color = Color::Red;

const BRACKET: Color = Color::Blue;
const SELECTED_TEXT: Color = Color::Red;
const IDLE_TEXT: Color = Color::Blue;

/// "< LABEL >", red when selected.
pub fn button_spans<S: Into<Cow<'static, str>>>(label: S, selected: bool) -> Vec<Span<'static>> {
    let bracket = Style::default().fg(BRACKET).add_modifier(Modifier::BOLD);
    vec![
        Span::styled("< ", bracket),
        Span::styled(
            label.into(),
            Style::default()
                .fg(if selected { SELECTED_TEXT } else { IDLE_TEXT })
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" >", bracket),
    ]
}

/// Same shape as `button_spans`, greyed out.
pub fn button_spans_disabled<S: Into<Cow<'static, str>>>(label: S) -> Vec<Span<'static>> {
    vec![
        Span::styled("< ", Style::default().fg(Color::DarkGray)),
        Span::styled(label.into(), Style::default().fg(Color::Gray)),
        Span::styled(" >", Style::default().fg(Color::DarkGray)),
    ]
}

/// Buttons side by side, three spaces apart.
pub fn button_row(buttons: &[(&'static str, bool)]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, (label, selected)) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.extend(button_spans(*label, *selected));
    }
    spans
}
