use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::borrow::Cow;

use super::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    Back,
    Open,

    // Navigation / Focus
    FocusNext,
    FocusPrevious,
    NavigateUp,
    NavigateDown,
    PickPrevious,
    PickNext,

    // Record Actions
    Save,
    Edit,
    Delete,
    Refresh,
    CancelEdit,

    // Order Lines
    AddLine,
    RemoveLine,
}

/// Where a binding applies on a data screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyScope {
    /// Active regardless of focus.
    #[default]
    Global,
    /// Active only while the record table has focus.
    Table,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
    pub scope: KeyScope,
    pub visible_in_bar: bool,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            scope: KeyScope::Global,
            visible_in_bar: true,
        }
    }

    #[must_use]
    pub fn in_table(mut self) -> Self {
        self.scope = KeyScope::Table;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        self.key.code == key.code
            && (self.key.modifiers == key.modifiers || key.code == KeyCode::BackTab)
    }
}

const fn plain(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

const fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Returns the bindings active on a screen, in footer display order.
#[must_use]
pub fn bindings_for(route: Route) -> Vec<Keybind> {
    if route == Route::Home {
        return vec![
            Keybind::new(plain(KeyCode::Enter), Action::Open, "Buka"),
            Keybind::new(plain(KeyCode::Up), Action::NavigateUp, "Naik").hidden(),
            Keybind::new(plain(KeyCode::Down), Action::NavigateDown, "Turun").hidden(),
            Keybind::new(plain(KeyCode::Char('q')), Action::Quit, "Keluar"),
            Keybind::new(plain(KeyCode::Esc), Action::Quit, "Keluar").hidden(),
        ];
    }

    let mut bindings = vec![
        Keybind::new(ctrl('s'), Action::Save, "Simpan"),
        Keybind::new(plain(KeyCode::Tab), Action::FocusNext, "Pindah"),
        Keybind::new(
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Action::FocusPrevious,
            "Kembali",
        )
        .hidden(),
        Keybind::new(plain(KeyCode::Up), Action::NavigateUp, "Naik").hidden(),
        Keybind::new(plain(KeyCode::Down), Action::NavigateDown, "Turun").hidden(),
        Keybind::new(plain(KeyCode::Left), Action::PickPrevious, "Pilih").hidden(),
        Keybind::new(plain(KeyCode::Right), Action::PickNext, "Pilih").hidden(),
        Keybind::new(ctrl('x'), Action::CancelEdit, "Batal"),
        Keybind::new(plain(KeyCode::Char('e')), Action::Edit, "Edit").in_table(),
        Keybind::new(plain(KeyCode::Char('d')), Action::Delete, "Hapus").in_table(),
        Keybind::new(plain(KeyCode::Char('r')), Action::Refresh, "Muat").in_table(),
    ];

    if route == Route::Penjualan {
        bindings.push(Keybind::new(ctrl('n'), Action::AddLine, "+ Barang"));
        bindings.push(Keybind::new(ctrl('d'), Action::RemoveLine, "- Barang"));
    }

    bindings.push(Keybind::new(plain(KeyCode::Esc), Action::Back, "Home"));
    bindings.push(Keybind::new(ctrl('c'), Action::Quit, "Keluar").hidden());
    bindings
}

/// Resolves a key press to an action.
///
/// Table-scoped bindings only resolve while `table_focused` is set, so plain
/// letters keep reaching the text fields.
#[must_use]
pub fn resolve(bindings: &[Keybind], key: &KeyEvent, table_focused: bool) -> Option<Action> {
    bindings
        .iter()
        .filter(|b| b.scope == KeyScope::Global || table_focused)
        .find(|b| b.matches(key))
        .map(|b| b.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_scope_only_when_focused() {
        let bindings = bindings_for(Route::Barang);
        let key = plain(KeyCode::Char('d'));

        assert_eq!(resolve(&bindings, &key, false), None);
        assert_eq!(resolve(&bindings, &key, true), Some(Action::Delete));
    }

    #[test]
    fn test_order_line_bindings() {
        let order = bindings_for(Route::Penjualan);
        let goods = bindings_for(Route::Barang);

        assert_eq!(resolve(&order, &ctrl('n'), false), Some(Action::AddLine));
        assert_eq!(resolve(&goods, &ctrl('n'), false), None);
    }

    #[test]
    fn test_home_quit() {
        let bindings = bindings_for(Route::Home);
        assert_eq!(
            resolve(&bindings, &plain(KeyCode::Char('q')), false),
            Some(Action::Quit)
        );
    }
}
