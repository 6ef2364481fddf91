//! Repository Module
//!
//! The persistence seam behind each actor. The actor worker is the only
//! caller, so implementations take `&mut self` and need no synchronization.
//!
//! The provided implementations speak the driver's statement vocabulary;
//! tests plug in their own.

mod inventory;
mod orders;

pub use inventory::SqlInventoryRepository;
pub use orders::SqlOrderRepository;

use crate::context::Context;
use crate::error::Result;
use crate::model::{Item, ItemUpdate, NewItem, NewOrder, Order};

/// Storage for orders
pub trait OrderRepository: Send + 'static {
    /// Persist a validated order and return it with its identity
    fn save(&mut self, ctx: &Context, order: NewOrder) -> Result<Order>;

    /// All orders, newest first
    fn list(&mut self, ctx: &Context) -> Result<Vec<Order>>;
}

/// Storage for inventory batches
pub trait InventoryRepository: Send + 'static {
    /// Persist a validated batch and return it with its identity
    fn save(&mut self, ctx: &Context, item: NewItem) -> Result<Item>;

    /// All batches, most recently baked first
    fn list(&mut self, ctx: &Context) -> Result<Vec<Item>>;

    /// Apply the supplied fields; `NotFound` for an unknown id
    fn update(&mut self, ctx: &Context, update: ItemUpdate) -> Result<()>;

    /// Remove a batch; `NotFound` for an unknown id
    fn delete(&mut self, ctx: &Context, id: i64) -> Result<()>;
}
