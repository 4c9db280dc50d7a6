//! List-and-form screen for customers and goods.

use crossterm::event::KeyEvent;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
};
use std::marker::PhantomData;
use std::sync::Arc;

use super::form_layout::{FieldKind, FormLayout};
use crate::application::use_cases::EntityScreen;
use crate::domain::coercion::{coerce_number, format_number};
use crate::domain::keybinding::{Action, Keybind, bindings_for, resolve};
use crate::domain::ports::ApiPort;
use crate::domain::Route;
use crate::presentation::events::{EventResult, ScreenRequest};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    FocusArea, Picker, RecordTable, RecordTableState, StatusBar, TextInput, apply_key,
    cycle_value, numeric_text,
};

const FIELD_HEIGHT: u16 = 3;

/// Interactive state of a mounted list-and-form screen.
pub struct EntityView<R: FormLayout> {
    screen: EntityScreen<R>,
    bindings: Vec<Keybind>,
    focus: usize,
    table: RecordTableState,
    typed_numbers: Vec<String>,
}

impl<R: FormLayout> EntityView<R> {
    #[must_use]
    pub fn new(api: Arc<dyn ApiPort>) -> Self {
        let blank = R::Form::default();
        let typed_numbers = R::FIELDS
            .iter()
            .enumerate()
            .map(|(index, field)| match field.kind {
                FieldKind::Number => format_number(R::number(&blank, index)),
                FieldKind::Text | FieldKind::Choice => String::new(),
            })
            .collect();
        Self {
            screen: EntityScreen::new(api),
            bindings: bindings_for(R::ROUTE),
            focus: 0,
            table: RecordTableState::default(),
            typed_numbers,
        }
    }

    #[must_use]
    pub const fn screen(&self) -> &EntityScreen<R> {
        &self.screen
    }

    #[must_use]
    pub fn bindings(&self) -> &[Keybind] {
        &self.bindings
    }

    #[must_use]
    pub const fn focus_area(&self) -> FocusArea {
        if self.table_focused() {
            FocusArea::Table
        } else {
            FocusArea::Form
        }
    }

    const fn table_focused(&self) -> bool {
        self.focus == R::FIELDS.len()
    }

    fn number_text(&self, form: &R::Form, index: usize) -> String {
        numeric_text(&self.typed_numbers[index], R::number(form, index))
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
        let focus_count = R::FIELDS.len() + 1;

        match resolve(&self.bindings, key, self.table_focused()) {
            Some(Action::Quit) => EventResult::Exit,
            Some(Action::Back) => EventResult::Navigate(Route::Home),
            Some(Action::FocusNext) => {
                self.focus = (self.focus + 1) % focus_count;
                EventResult::Continue
            }
            Some(Action::FocusPrevious) => {
                self.focus = (self.focus + focus_count - 1) % focus_count;
                EventResult::Continue
            }
            Some(Action::NavigateUp) => {
                if self.table_focused() {
                    let len = self.screen.read(|s| s.items.len());
                    self.table.select_previous(len);
                } else {
                    self.focus = self.focus.saturating_sub(1);
                }
                EventResult::Continue
            }
            Some(Action::NavigateDown) => {
                if self.table_focused() {
                    let len = self.screen.read(|s| s.items.len());
                    self.table.select_next(len);
                } else {
                    self.focus = (self.focus + 1).min(R::FIELDS.len());
                }
                EventResult::Continue
            }
            Some(Action::PickPrevious) => {
                self.cycle_choice(-1);
                EventResult::Continue
            }
            Some(Action::PickNext) => {
                self.cycle_choice(1);
                EventResult::Continue
            }
            Some(Action::Save) => EventResult::Request(ScreenRequest::Save),
            Some(Action::Refresh) => EventResult::Request(ScreenRequest::Fetch),
            Some(Action::Edit) => {
                if let Some(entity) = self.selected() {
                    self.screen.edit(&entity);
                    self.focus = 0;
                }
                EventResult::Continue
            }
            Some(Action::Delete) => self
                .selected()
                .map_or(EventResult::Continue, |entity| {
                    EventResult::Request(ScreenRequest::Delete(R::id(&entity)))
                }),
            Some(Action::CancelEdit) => {
                self.screen.cancel_edit();
                EventResult::Continue
            }
            Some(Action::Open | Action::AddLine | Action::RemoveLine) => EventResult::Continue,
            None => {
                self.edit_field(key);
                EventResult::Continue
            }
        }
    }

    fn selected(&self) -> Option<R::Entity> {
        let index = self.table.selected()?;
        self.screen.read(|s| s.items.get(index).cloned())
    }

    fn cycle_choice(&self, delta: isize) {
        let Some(field) = R::FIELDS.get(self.focus) else {
            return;
        };
        if field.kind != FieldKind::Choice {
            return;
        }
        let options = R::choices(self.focus);
        let index = self.focus;
        self.screen.update_form(|form| {
            if let Some(value) = cycle_value(&options, &R::choice(form, index), delta) {
                R::set_choice(form, index, &value);
            }
        });
    }

    fn edit_field(&mut self, key: &KeyEvent) {
        let Some(field) = R::FIELDS.get(self.focus) else {
            return;
        };
        let index = self.focus;
        match field.kind {
            FieldKind::Text => self.screen.update_form(|form| {
                if let Some(text) = R::text_mut(form, index) {
                    apply_key(text, key);
                }
            }),
            FieldKind::Number => {
                let value = self.screen.read(|s| R::number(&s.form, index));
                let mut text = numeric_text(&self.typed_numbers[index], value);
                if apply_key(&mut text, key) {
                    let coerced = coerce_number(&text);
                    self.screen.update_form(|form| {
                        if let Some(number) = R::number_mut(form, index) {
                            *number = coerced;
                        }
                    });
                    self.typed_numbers[index] = text;
                }
            }
            FieldKind::Choice => {}
        }
    }
}

/// Renders an [`EntityView`]: form on the left, records on the right.
pub struct EntityPage<'a, R> {
    theme: &'a Theme,
    resource: PhantomData<fn() -> R>,
}

impl<'a, R: FormLayout> EntityPage<'a, R> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            resource: PhantomData,
        }
    }
}

impl<R: FormLayout> StatefulWidget for EntityPage<'_, R> {
    type State = EntityView<R>;

    fn render(self, area: Rect, buf: &mut Buffer, view: &mut Self::State) {
        let [heading_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        Line::styled(format!(" {}", R::ROUTE.heading()), self.theme.focus_style)
            .render(heading_area, buf);

        let [form_area, table_area] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(body_area);

        let (form, rows, editing) = view.screen.read(|s| {
            (
                s.form.clone(),
                s.items.iter().map(R::row).collect::<Vec<_>>(),
                s.editing_id.is_some(),
            )
        });
        view.table.clamp(rows.len());

        let mut constraints = vec![Constraint::Length(FIELD_HEIGHT); R::FIELDS.len()];
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Fill(1));
        let slots = Layout::vertical(constraints).split(form_area);

        for (index, field) in R::FIELDS.iter().enumerate() {
            let focused = view.focus == index;
            let slot = slots[index];
            match field.kind {
                FieldKind::Text => {
                    let input = TextInput::new(field.label, R::text(&form, index))
                        .placeholder(field.placeholder)
                        .focused(focused, self.theme.accent);
                    (&input).render(slot, buf);
                }
                FieldKind::Number => {
                    let text = view.number_text(&form, index);
                    let input = TextInput::new(field.label, &text)
                        .placeholder(field.placeholder)
                        .focused(focused, self.theme.accent);
                    (&input).render(slot, buf);
                }
                FieldKind::Choice => {
                    let options = R::choices(index);
                    let selected = R::choice(&form, index);
                    Picker::new(field.label, &options, &selected)
                        .focused(focused, self.theme.accent)
                        .render(slot, buf);
                }
            }
        }

        let status = StatusBar::form_mode(editing, rows.len());
        (&status).render(slots[R::FIELDS.len()], buf);

        let table = RecordTable::new(R::ROUTE.title(), R::COLUMNS, R::WIDTHS, rows)
            .focused(view.table_focused())
            .theme(self.theme);
        StatefulWidget::render(table, table_area, buf, &mut view.table);
    }
}
