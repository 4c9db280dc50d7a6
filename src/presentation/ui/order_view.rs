//! Sales order screen: header fields, a variable list of lines and the
//! order table.

use crossterm::event::KeyEvent;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
};
use std::sync::Arc;

use crate::application::use_cases::OrderScreen;
use crate::domain::Route;
use crate::domain::coercion::{coerce_number, format_number};
use crate::domain::entities::{Goods, Order};
use crate::domain::keybinding::{Action, Keybind, bindings_for, resolve};
use crate::domain::ports::ApiPort;
use crate::presentation::events::{EventResult, ScreenRequest};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    FocusArea, Picker, RecordTable, RecordTableState, StatusBar, TextInput, apply_key,
    cycle_value, numeric_text,
};

const FIELD_HEIGHT: u16 = 3;
const QTY_WIDTH: u16 = 12;
const ORDER_COLUMNS: &[&str] = &["Nota", "Tanggal", "Pelanggan", "Subtotal"];
const ORDER_WIDTHS: &[Constraint] = &[
    Constraint::Length(10),
    Constraint::Length(12),
    Constraint::Fill(1),
    Constraint::Length(12),
];
const LINE_COLUMNS: &[&str] = &["Barang", "Qty", "Total"];
const LINE_WIDTHS: &[Constraint] = &[
    Constraint::Fill(1),
    Constraint::Length(6),
    Constraint::Length(12),
];

/// Focusable element of the order screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFocus {
    Number,
    Date,
    Customer,
    LineGoods(usize),
    LineQty(usize),
    Table,
}

impl OrderFocus {
    /// Focus ring for a draft with `lines` lines, in Tab order.
    fn ring(lines: usize) -> Vec<Self> {
        let mut ring = vec![Self::Number, Self::Date, Self::Customer];
        for i in 0..lines {
            ring.push(Self::LineGoods(i));
            ring.push(Self::LineQty(i));
        }
        ring.push(Self::Table);
        ring
    }

    const fn line(self) -> Option<usize> {
        match self {
            Self::LineGoods(i) | Self::LineQty(i) => Some(i),
            _ => None,
        }
    }
}

/// Interactive state of the mounted order screen.
pub struct OrderView {
    screen: OrderScreen,
    bindings: Vec<Keybind>,
    focus: OrderFocus,
    table: RecordTableState,
    typed_qty: Vec<String>,
}

impl OrderView {
    #[must_use]
    pub fn new(api: Arc<dyn ApiPort>) -> Self {
        Self {
            screen: OrderScreen::new(api),
            bindings: bindings_for(Route::Penjualan),
            focus: OrderFocus::Number,
            table: RecordTableState::default(),
            typed_qty: Vec::new(),
        }
    }

    #[must_use]
    pub const fn screen(&self) -> &OrderScreen {
        &self.screen
    }

    #[must_use]
    pub fn bindings(&self) -> &[Keybind] {
        &self.bindings
    }

    #[must_use]
    pub const fn focus(&self) -> OrderFocus {
        self.focus
    }

    #[must_use]
    pub const fn focus_area(&self) -> FocusArea {
        match self.focus {
            OrderFocus::Table => FocusArea::Table,
            _ => FocusArea::Form,
        }
    }

    /// Future running a backend request against this screen's state.
    #[must_use]
    pub fn task(&self, request: ScreenRequest) -> BoxFuture<'static, ()> {
        let screen = self.screen.clone();
        async move {
            match request {
                ScreenRequest::Fetch => screen.fetch().await,
                ScreenRequest::Save => screen.save().await,
                ScreenRequest::Delete(id) => screen.delete(id).await,
            }
        }
        .boxed()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> EventResult {
        let table_focused = self.focus == OrderFocus::Table;

        match resolve(&self.bindings, key, table_focused) {
            Some(Action::Quit) => EventResult::Exit,
            Some(Action::Back) => EventResult::Navigate(Route::Home),
            Some(Action::FocusNext) => {
                self.move_focus(1);
                EventResult::Continue
            }
            Some(Action::FocusPrevious) => {
                self.move_focus(-1);
                EventResult::Continue
            }
            Some(Action::NavigateUp) => {
                if table_focused {
                    let len = self.screen.read(|s| s.orders.len());
                    self.table.select_previous(len);
                } else {
                    self.step_focus(-1);
                }
                EventResult::Continue
            }
            Some(Action::NavigateDown) => {
                if table_focused {
                    let len = self.screen.read(|s| s.orders.len());
                    self.table.select_next(len);
                } else {
                    self.step_focus(1);
                }
                EventResult::Continue
            }
            Some(Action::PickPrevious) => {
                self.cycle_picker(-1);
                EventResult::Continue
            }
            Some(Action::PickNext) => {
                self.cycle_picker(1);
                EventResult::Continue
            }
            Some(Action::Save) => EventResult::Request(ScreenRequest::Save),
            Some(Action::Refresh) => EventResult::Request(ScreenRequest::Fetch),
            Some(Action::Edit) => {
                if let Some(order) = self.selected() {
                    self.screen.edit(&order);
                    self.typed_qty.clear();
                    self.focus = OrderFocus::Number;
                }
                EventResult::Continue
            }
            Some(Action::Delete) => self.selected().map_or(EventResult::Continue, |order| {
                EventResult::Request(ScreenRequest::Delete(order.id))
            }),
            Some(Action::CancelEdit) => {
                self.screen.cancel_edit();
                self.typed_qty.clear();
                self.clamp_focus();
                EventResult::Continue
            }
            Some(Action::AddLine) => {
                self.screen.add_item();
                let last = self.line_count() - 1;
                self.focus = OrderFocus::LineGoods(last);
                EventResult::Continue
            }
            Some(Action::RemoveLine) => {
                if let Some(index) = self.focus.line() {
                    self.screen.remove_item(index);
                    if index < self.typed_qty.len() {
                        self.typed_qty.remove(index);
                    }
                    self.clamp_focus();
                }
                EventResult::Continue
            }
            Some(Action::Open) => EventResult::Continue,
            None => {
                self.edit_field(key);
                EventResult::Continue
            }
        }
    }

    fn line_count(&self) -> usize {
        self.screen.read(|s| s.draft.items.len())
    }

    fn selected(&self) -> Option<Order> {
        let index = self.table.selected()?;
        self.screen.read(|s| s.orders.get(index).cloned())
    }

    fn move_focus(&mut self, delta: isize) {
        let ring = OrderFocus::ring(self.line_count());
        let len = ring.len().cast_signed();
        let index = ring
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0)
            .cast_signed();
        self.focus = ring[(index + delta).rem_euclid(len).cast_unsigned()];
    }

    /// Like [`Self::move_focus`] but stops at the table instead of wrapping.
    fn step_focus(&mut self, delta: isize) {
        let ring = OrderFocus::ring(self.line_count());
        let index = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = index
            .saturating_add_signed(delta)
            .min(ring.len().saturating_sub(1));
        self.focus = ring[next];
    }

    /// Keeps focus on an existing line after lines were removed.
    fn clamp_focus(&mut self) {
        let lines = self.line_count();
        self.focus = match self.focus {
            OrderFocus::LineGoods(i) | OrderFocus::LineQty(i) if i >= lines => {
                lines.checked_sub(1).map_or(OrderFocus::Customer, OrderFocus::LineGoods)
            }
            other => other,
        };
    }

    fn cycle_picker(&self, delta: isize) {
        match self.focus {
            OrderFocus::Customer => {
                let options = self.screen.customer_options();
                let current = self.screen.read(|s| s.draft.customer_code.clone());
                if let Some(code) = cycle_value(&options, &current, delta) {
                    self.screen.update_draft(|d| d.customer_code = code);
                }
            }
            OrderFocus::LineGoods(i) => {
                let options = self.screen.goods_options();
                let current = self
                    .screen
                    .read(|s| s.draft.items.get(i).map(|item| item.goods_code.clone()));
                if let Some(current) = current
                    && let Some(code) = cycle_value(&options, &current, delta)
                {
                    self.screen.set_item_goods(i, code);
                }
            }
            _ => {}
        }
    }

    fn edit_field(&mut self, key: &KeyEvent) {
        match self.focus {
            OrderFocus::Number => self.screen.update_draft(|d| {
                apply_key(&mut d.number, key);
            }),
            OrderFocus::Date => self.screen.update_draft(|d| {
                apply_key(&mut d.date, key);
            }),
            OrderFocus::LineQty(i) => {
                let Some(qty) = self.screen.read(|s| s.draft.items.get(i).map(|item| item.qty))
                else {
                    return;
                };
                if self.typed_qty.len() <= i {
                    self.typed_qty.resize(i + 1, String::new());
                }
                let mut text = numeric_text(&self.typed_qty[i], qty);
                if apply_key(&mut text, key) {
                    self.screen.set_item_qty(i, coerce_number(&text));
                    self.typed_qty[i] = text;
                }
            }
            OrderFocus::Customer | OrderFocus::LineGoods(_) | OrderFocus::Table => {}
        }
    }

    fn typed_qty(&self, index: usize) -> &str {
        self.typed_qty.get(index).map_or("", String::as_str)
    }
}

/// Renders an [`OrderView`].
pub struct OrderPage<'a> {
    theme: &'a Theme,
}

impl<'a> OrderPage<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn render_lines(&self, area: Rect, buf: &mut Buffer, view: &OrderView, draft_lines: &[(String, f64)]) {
        let goods_options = view.screen.goods_options();
        let visible = usize::from(area.height / FIELD_HEIGHT).max(1);
        let focused_line = view.focus.line().unwrap_or(0);
        let first = focused_line.saturating_sub(visible - 1);

        let rows = Layout::vertical(vec![Constraint::Length(FIELD_HEIGHT); visible]).split(area);
        for (slot, (index, (goods_code, qty))) in rows
            .iter()
            .zip(draft_lines.iter().enumerate().skip(first))
        {
            let [goods_area, qty_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(QTY_WIDTH)])
                    .areas(*slot);

            let goods_label = format!("Barang {}", index + 1);
            Picker::new(&goods_label, &goods_options, goods_code)
                .focused(view.focus == OrderFocus::LineGoods(index), self.theme.accent)
                .render(goods_area, buf);

            let qty_text = numeric_text(view.typed_qty(index), *qty);
            let input = TextInput::new("Qty", &qty_text)
                .focused(view.focus == OrderFocus::LineQty(index), self.theme.accent);
            (&input).render(qty_area, buf);
        }
    }
}

impl StatefulWidget for OrderPage<'_> {
    type State = OrderView;

    fn render(self, area: Rect, buf: &mut Buffer, view: &mut Self::State) {
        let [heading_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        Line::styled(
            format!(" {}", Route::Penjualan.heading()),
            self.theme.focus_style,
        )
        .render(heading_area, buf);

        let [form_area, list_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(body_area);

        let state = view.screen.snapshot();
        view.table.clamp(state.orders.len());

        let [number_area, date_area, customer_area, status_area, lines_area] =
            Layout::vertical([
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(form_area);

        let number = TextInput::new("Nota", &state.draft.number)
            .placeholder("N-001")
            .focused(view.focus == OrderFocus::Number, self.theme.accent);
        (&number).render(number_area, buf);

        let date = TextInput::new("Tgl", &state.draft.date)
            .placeholder("2024-01-31")
            .focused(view.focus == OrderFocus::Date, self.theme.accent);
        (&date).render(date_area, buf);

        let customer_options = view.screen.customer_options();
        Picker::new("Pelanggan", &customer_options, &state.draft.customer_code)
            .focused(view.focus == OrderFocus::Customer, self.theme.accent)
            .render(customer_area, buf);

        let status = StatusBar::form_mode(state.editing_id.is_some(), state.orders.len())
            .center(format!("{} barang", state.draft.items.len()));
        (&status).render(status_area, buf);

        let draft_lines: Vec<(String, f64)> = state
            .draft
            .items
            .iter()
            .map(|item| (item.goods_code.clone(), item.qty))
            .collect();
        self.render_lines(lines_area, buf, view, &draft_lines);

        let [orders_area, detail_area] =
            Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(list_area);

        let rows: Vec<Vec<String>> = state
            .orders
            .iter()
            .map(|o| {
                vec![
                    o.number.clone(),
                    o.date.clone(),
                    o.customer_name().to_string(),
                    format_number(o.subtotal),
                ]
            })
            .collect();
        let table = RecordTable::new("Penjualan", ORDER_COLUMNS, ORDER_WIDTHS, rows)
            .focused(view.focus == OrderFocus::Table)
            .theme(self.theme);
        StatefulWidget::render(table, orders_area, buf, &mut view.table);

        let detail_rows: Vec<Vec<String>> = view
            .table
            .selected()
            .and_then(|i| state.orders.get(i))
            .map(|order| {
                order
                    .items
                    .iter()
                    .map(|line| {
                        vec![
                            line.goods.as_ref().map(Goods::picker_label).unwrap_or_default(),
                            format_number(line.qty),
                            format_number(line.total),
                        ]
                    })
                    .collect()
            })
            .unwrap_or_default();
        let detail = RecordTable::new("Detail", LINE_COLUMNS, LINE_WIDTHS, detail_rows)
            .theme(self.theme);
        StatefulWidget::render(detail, detail_area, buf, &mut RecordTableState::default());
    }
}
