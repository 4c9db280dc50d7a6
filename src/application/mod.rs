//! Application layer with screen state machines and DTOs.

/// Data transfer objects.
pub mod dto;
/// Screen state machines.
pub mod use_cases;

pub use dto::{CustomerForm, GoodsForm, OrderDraft, OrderItemDraft, PickerOption};
pub use use_cases::{CustomerScreen, EntityScreen, GoodsScreen, OrderScreen, Resource};
