//! Home menu.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::Route;
use crate::domain::keybinding::{Action, Keybind, bindings_for, resolve};
use crate::presentation::events::EventResult;
use crate::presentation::theme::Theme;

/// Menu listing the data screens.
pub struct HomeScreen {
    selected: usize,
    bindings: Vec<Keybind>,
}

impl HomeScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selected: 0,
            bindings: bindings_for(Route::Home),
        }
    }

    /// Returns the highlighted menu entry.
    #[must_use]
    pub fn selected(&self) -> Route {
        Route::from_menu_index(self.selected).unwrap_or(Route::Pelanggan)
    }

    #[must_use]
    pub fn bindings(&self) -> &[Keybind] {
        &self.bindings
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> EventResult {
        if let KeyCode::Char(c) = key.code
            && let Some(index) = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1))
            && index < Route::MENU.len()
        {
            self.selected = index;
            return EventResult::Continue;
        }

        match resolve(&self.bindings, key, false) {
            Some(Action::Open) => EventResult::Navigate(self.selected()),
            Some(Action::NavigateUp) => {
                self.selected = self.selected.saturating_sub(1);
                EventResult::Continue
            }
            Some(Action::NavigateDown) => {
                self.selected = (self.selected + 1).min(Route::MENU.len() - 1);
                EventResult::Continue
            }
            Some(Action::Quit) => EventResult::Exit,
            _ => EventResult::Continue,
        }
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a [`HomeScreen`] with the given theme.
pub struct HomePage<'a> {
    screen: &'a HomeScreen,
    theme: &'a Theme,
}

impl<'a> HomePage<'a> {
    #[must_use]
    pub const fn new(screen: &'a HomeScreen, theme: &'a Theme) -> Self {
        Self { screen, theme }
    }
}

impl Widget for HomePage<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = Route::MENU.len() as u16 + 4;
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, content_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(40),
            Constraint::Fill(1),
        ])
        .areas(center);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .title(format!(" {} ", Route::Home.heading()));
        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let mut lines = vec![
            Line::from(Span::styled("Pilih menu:", self.theme.dimmed_style)),
            Line::from(""),
        ];
        lines.extend(Route::MENU.iter().enumerate().map(|(i, route)| {
            let text = format!(" {}. {} ", i + 1, route.title());
            if i == self.screen.selected {
                Line::from(Span::styled(format!(">{text}"), self.theme.selection_style))
            } else {
                Line::from(Span::styled(format!(" {text}"), self.theme.base_style))
            }
        }));

        Paragraph::new(lines).render(inner, buf);
    }
}
