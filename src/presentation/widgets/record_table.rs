use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::presentation::theme::Theme;

/// Selection state of a record table.
#[derive(Debug, Clone, Default)]
pub struct RecordTableState {
    table_state: TableState,
}

impl RecordTableState {
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let next = self.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.table_state.select(Some(next));
    }

    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let prev = self.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    /// Keeps the selection inside a list of `len` rows after a reload.
    pub fn clamp(&mut self, len: usize) {
        match self.selected() {
            Some(_) if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            _ => {}
        }
    }
}

/// Bordered table of records with a highlighted selected row.
pub struct RecordTable<'a> {
    title: &'a str,
    headers: &'a [&'a str],
    rows: Vec<Vec<String>>,
    widths: &'a [Constraint],
    focused: bool,
    focus_style: Style,
    header_style: Style,
    selection_style: Style,
}

impl<'a> RecordTable<'a> {
    #[must_use]
    pub fn new(
        title: &'a str,
        headers: &'a [&'a str],
        widths: &'a [Constraint],
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            title,
            headers,
            rows,
            widths,
            focused: false,
            focus_style: Style::default().fg(Color::Cyan),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            selection_style: Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        }
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub const fn theme(mut self, theme: &Theme) -> Self {
        self.focus_style = theme.focus_style;
        self.header_style = theme.header_style;
        self.selection_style = theme.selection_style;
        self
    }
}

impl StatefulWidget for RecordTable<'_> {
    type State = RecordTableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if self.focused {
            self.focus_style
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title);

        if self.rows.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Line::from("Belum ada data")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        let header = Row::new(self.headers.iter().map(|h| Cell::from(*h))).style(self.header_style);
        let rows = self
            .rows
            .into_iter()
            .map(|cells| Row::new(cells.into_iter().map(Cell::from)));

        let highlight = if self.focused {
            self.selection_style
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let table = Table::new(rows, self.widths.iter().copied())
            .header(header)
            .block(block)
            .row_highlight_style(highlight)
            .highlight_symbol("> ");

        StatefulWidget::render(table, area, buf, &mut state.table_state);
    }
}
