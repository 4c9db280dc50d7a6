//! Screen state machines.

mod entity_screen;
mod order_screen;

pub use entity_screen::{
    CustomerResource, CustomerScreen, EntityScreen, EntityState, GoodsResource, GoodsScreen,
    Resource,
};
pub use order_screen::{OrderScreen, OrderState};
