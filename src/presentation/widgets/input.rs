//! Text input widget.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::coercion::{coerce_number, format_number};

/// Single-line text field rendering a value owned by screen state.
///
/// The cursor always sits at the end of the value; typing appends and
/// Backspace removes the last character.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    focus_color: Color,
}

impl<'a> TextInput<'a> {
    /// Creates input with label and current value.
    #[must_use]
    pub const fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
            focus_color: Color::Cyan,
        }
    }

    /// Sets placeholder text.
    #[must_use]
    pub const fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = text;
        self
    }

    /// Sets focus state and the border colour used while focused.
    #[must_use]
    pub const fn focused(mut self, focused: bool, color: Color) -> Self {
        self.focused = focused;
        self.focus_color = color;
        self
    }
}

/// Applies an editing key to a field value.
///
/// Returns whether the value changed.
pub fn apply_key(value: &mut String, key: &KeyEvent) -> bool {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }

    match key.code {
        KeyCode::Char(c) => {
            value.push(c);
            true
        }
        KeyCode::Backspace => value.pop().is_some(),
        _ => false,
    }
}

/// Text shown in a numeric field.
///
/// The typed text is kept while it still coerces to the stored value, so a
/// trailing `.` survives; otherwise the stored value is printed.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn numeric_text(typed: &str, value: f64) -> String {
    let typed_value = coerce_number(typed);
    if typed_value == value || (typed_value.is_nan() && value.is_nan()) {
        typed.to_string()
    } else {
        format_number(value)
    }
}

impl Widget for &TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.focus_color)
        } else {
            Style::default().fg(Color::Gray)
        };

        let (display, text_style) = if self.value.is_empty() {
            (self.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (self.value, Style::default())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label);

        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(display).style(text_style).render(inner, buf);

        if self.focused && inner.width > 0 && inner.height > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let cursor_x = inner.x + self.value.width() as u16;
            if cursor_x < inner.x + inner.width {
                buf[(cursor_x, inner.y)]
                    .set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_apply_key_basic() {
        let mut value = String::new();
        assert!(apply_key(&mut value, &key(KeyCode::Char('a'))));
        assert!(apply_key(&mut value, &key(KeyCode::Char('é'))));
        assert_eq!(value, "aé");

        assert!(apply_key(&mut value, &key(KeyCode::Backspace)));
        assert_eq!(value, "a");
    }

    #[test]
    fn test_control_keys_do_not_edit() {
        let mut value = "x".to_string();
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(!apply_key(&mut value, &ctrl_s));
        assert!(!apply_key(&mut String::new(), &key(KeyCode::Backspace)));
        assert_eq!(value, "x");
    }

    #[test]
    fn test_numeric_text_keeps_typed_form() {
        assert_eq!(numeric_text("2.", 2.0), "2.");
        assert_eq!(numeric_text("", 0.0), "");
        assert_eq!(numeric_text("", 1.0), "1");
        assert_eq!(numeric_text("abc", f64::NAN), "abc");
        assert_eq!(numeric_text("12", 5000.0), "5000");
    }

    #[test]
    fn test_render_placeholder() {
        let input = TextInput::new("Nota", "").placeholder("N-001");
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        (&input).render(area, &mut buf);

        assert_eq!(buf[(1, 1)].symbol(), "N");
    }
}
