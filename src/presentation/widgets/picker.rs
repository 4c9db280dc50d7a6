//! Picker widget cycling through a fixed option list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::application::PickerOption;

/// Returns the option value `delta` steps away from `current`, wrapping.
///
/// A value missing from the options counts as the first option.
#[must_use]
pub fn cycle_value(options: &[PickerOption], current: &str, delta: isize) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let len = options.len().cast_signed();
    let index = options
        .iter()
        .position(|o| o.value == current)
        .unwrap_or(0)
        .cast_signed();
    let next = (index + delta).rem_euclid(len).cast_unsigned();
    Some(options[next].value.clone())
}

/// Bordered picker showing the selected option's label between arrows.
pub struct Picker<'a> {
    label: &'a str,
    options: &'a [PickerOption],
    selected: &'a str,
    focused: bool,
    focus_color: Color,
}

impl<'a> Picker<'a> {
    #[must_use]
    pub const fn new(label: &'a str, options: &'a [PickerOption], selected: &'a str) -> Self {
        Self {
            label,
            options,
            selected,
            focused: false,
            focus_color: Color::Cyan,
        }
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool, color: Color) -> Self {
        self.focused = focused;
        self.focus_color = color;
        self
    }

    fn selected_label(&self) -> &str {
        self.options
            .iter()
            .find(|o| o.value == self.selected)
            .map_or(self.selected, |o| o.label.as_str())
    }
}

impl Widget for Picker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.focus_color)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label);
        let inner = block.inner(area);
        block.render(area, buf);

        let arrow_style = if self.focused {
            Style::default().fg(self.focus_color)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let line = Line::from(vec![
            Span::styled("< ", arrow_style),
            Span::raw(self.selected_label().to_string()),
            Span::styled(" >", arrow_style),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<PickerOption> {
        vec![
            PickerOption::placeholder("-- pilih --"),
            PickerOption::new("Budi", "P1"),
            PickerOption::new("Sari", "P2"),
        ]
    }

    #[test]
    fn test_cycle_forward_and_wrap() {
        let opts = options();
        assert_eq!(cycle_value(&opts, "", 1).as_deref(), Some("P1"));
        assert_eq!(cycle_value(&opts, "P2", 1).as_deref(), Some(""));
        assert_eq!(cycle_value(&opts, "", -1).as_deref(), Some("P2"));
    }

    #[test]
    fn test_unknown_value_starts_at_first() {
        assert_eq!(cycle_value(&options(), "P9", 1).as_deref(), Some("P1"));
        assert_eq!(cycle_value(&[], "", 1), None);
    }

    #[test]
    fn test_label_falls_back_to_raw_value() {
        let opts = options();
        assert_eq!(Picker::new("Pelanggan", &opts, "P2").selected_label(), "Sari");
        assert_eq!(Picker::new("Pelanggan", &opts, "P9").selected_label(), "P9");
    }
}
