//! Domain entity definitions.

mod customer;
mod entity_id;
mod goods;
mod order;

pub use customer::{Customer, Gender};
pub use entity_id::EntityId;
pub use goods::Goods;
pub use order::{Order, OrderLine};
