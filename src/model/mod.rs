//! Domain Model
//!
//! Typed orders and inventory as the actors and their callers see them.
//! The store keeps its own flat records (see `store::record`).

mod inventory;
mod order;

pub use inventory::{Item, ItemUpdate, NewItem};
pub use order::{BreadSchedule, CroissantSlot, NewOrder, Order, OrderItem};
