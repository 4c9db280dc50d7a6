mod footer_bar;
mod header_bar;
mod input;
mod picker;
mod record_table;
mod status_bar;

pub use footer_bar::{FocusArea, FooterBar, FooterBarStyle};
pub use header_bar::{HeaderBar, HeaderBarStyle};
pub use input::{TextInput, apply_key, numeric_text};
pub use picker::{Picker, cycle_value};
pub use record_table::{RecordTable, RecordTableState};
pub use status_bar::{StatusBar, StatusLevel};
