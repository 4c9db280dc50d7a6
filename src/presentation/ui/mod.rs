//! UI screens.

mod app;
mod entity_view;
mod form_layout;
mod home_screen;
mod order_view;

pub use app::App;
pub use entity_view::{EntityPage, EntityView};
pub use form_layout::{FieldKind, FormField, FormLayout};
pub use home_screen::{HomePage, HomeScreen};
pub use order_view::{OrderFocus, OrderPage, OrderView};
