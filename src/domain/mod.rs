//! Domain layer with records, the API port and shared value helpers.

/// Text-to-number coercion for form inputs.
pub mod coercion;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// Port definitions.
pub mod ports;
/// Screen registry.
pub mod route;
/// Serde utilities.
pub mod serde_utils;

pub use entities::{Customer, EntityId, Gender, Goods, Order, OrderLine};
pub use errors::ApiError;
pub use ports::ApiPort;
pub use route::Route;
