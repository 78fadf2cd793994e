use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Single-line text input. `cursor` counts characters, not bytes, so
/// accented names edit cleanly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextField {
    pub text: String,
    pub cursor: usize,
}

impl TextField {
    pub fn with(text: &str) -> Self {
        Self { text: text.into(), cursor: text.chars().count() }
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.text.len())
    }

    pub fn set(&mut self, text: &str) {
        *self = Self::with(text);
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_at(self.cursor);
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_at(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) { self.cursor = self.cursor.saturating_sub(1); }
    pub fn move_right(&mut self) { self.cursor = (self.cursor + 1).min(self.len()); }
    pub fn home(&mut self) { self.cursor = 0; }
    pub fn end(&mut self) { self.cursor = self.len(); }
}

/// `Label: text` with a block cursor over the current character when
/// focused. Empty unfocused fields show `placeholder` in grey.
pub fn field_line<'a>(label: &str, field: &TextField, focused: bool, placeholder: &str) -> Line<'a> {
    let label_span = Span::styled(format!("{label}: "), Style::default().fg(Color::Yellow));

    if !focused {
        let value = if field.text.is_empty() {
            Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(field.text.clone())
        };
        return Line::from(vec![label_span, value]);
    }

    let split = field.byte_at(field.cursor.min(field.len()));
    let (left, rest) = field.text.split_at(split);
    let cursor_style = Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut spans = vec![label_span, Span::raw(left.to_string())];
    match rest.chars().next() {
        Some(ch) => {
            spans.push(Span::styled(ch.to_string(), cursor_style));
            spans.push(Span::raw(rest[ch.len_utf8()..].to_string()));
        }
        None => spans.push(Span::styled(" ", cursor_style)),
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_respects_multibyte_chars() {
        let mut f = TextField::with("Açaí");
        assert_eq!(f.cursor, 4);

        f.backspace();
        assert_eq!(f.text, "Aça");
        f.move_left();
        f.insert_char('ç');
        assert_eq!(f.text, "Açça");
        f.home();
        f.delete();
        assert_eq!(f.text, "çça");
        f.end();
        f.insert_char('!');
        assert_eq!(f.text, "çça!");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut f = TextField::default();
        f.move_left();
        f.backspace();
        f.delete();
        assert_eq!(f.cursor, 0);
        f.set("ab");
        f.move_right();
        assert_eq!(f.cursor, 2);
    }

    #[test]
    fn unfocused_empty_field_shows_placeholder() {
        let line = field_line("Price", &TextField::default(), false, "e.g. 48.50");
        assert_eq!(line.spans[1].content, "e.g. 48.50");
    }
}
