//! Store state
//!
//! The authoritative in-memory sequences. A `StoreState` is owned by exactly
//! one store worker; nothing here is shared or locked.

use chrono::Utc;

use crate::error::{BakeryError, Result};

use super::{InventoryPatch, InventoryRecord, Inserted, OrderRecord, Snapshot};

/// Orders and inventory in insertion order, plus their id counters
///
/// Counters only ever grow. A deleted inventory id is never handed out again.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    orders: Vec<OrderRecord>,
    inventory: Vec<InventoryRecord>,
    order_counter: i64,
    inventory_counter: i64,
}

impl StoreState {
    /// Empty state, both counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from a loaded snapshot
    ///
    /// A counter below the highest stored id is raised to it, so a
    /// hand-edited snapshot can't make ids repeat.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let max_order = snapshot.orders.iter().map(|o| o.id).max().unwrap_or(0);
        let max_item = snapshot.inventory.iter().map(|i| i.id).max().unwrap_or(0);

        Self {
            order_counter: snapshot.order_counter.max(max_order),
            inventory_counter: snapshot.inventory_counter.max(max_item),
            orders: snapshot.orders,
            inventory: snapshot.inventory,
        }
    }

    /// Full copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            orders: self.orders.clone(),
            inventory: self.inventory.clone(),
            order_counter: self.order_counter,
            inventory_counter: self.inventory_counter,
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Append an order, assigning the next id and the creation time
    pub fn insert_order(&mut self, mut record: OrderRecord) -> Inserted {
        self.order_counter += 1;
        let inserted = Inserted {
            id: self.order_counter,
            created_at: Utc::now(),
        };
        record.id = inserted.id;
        record.created_at = inserted.created_at;
        self.orders.push(record);
        inserted
    }

    /// Independent copy of all orders, insertion order
    pub fn list_orders(&self) -> Vec<OrderRecord> {
        self.orders.clone()
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Append an inventory batch, assigning the next id and the creation time
    pub fn insert_inventory(&mut self, mut record: InventoryRecord) -> Inserted {
        self.inventory_counter += 1;
        let inserted = Inserted {
            id: self.inventory_counter,
            created_at: Utc::now(),
        };
        record.id = inserted.id;
        record.created_at = inserted.created_at;
        self.inventory.push(record);
        inserted
    }

    /// Independent copy of all inventory, insertion order
    pub fn list_inventory(&self) -> Vec<InventoryRecord> {
        self.inventory.clone()
    }

    /// Overwrite the supplied fields of the batch with this id
    pub fn update_inventory(&mut self, id: i64, patch: InventoryPatch) -> Result<()> {
        let record = self
            .inventory
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(BakeryError::NotFound)?;
        patch.apply(record);
        Ok(())
    }

    /// Remove the batch with this id, keeping the others in order
    pub fn delete_inventory(&mut self, id: i64) -> Result<()> {
        let position = self
            .inventory
            .iter()
            .position(|record| record.id == id)
            .ok_or(BakeryError::NotFound)?;
        self.inventory.remove(position);
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Last assigned order id
    pub fn order_counter(&self) -> i64 {
        self.order_counter
    }

    /// Last assigned inventory id
    pub fn inventory_counter(&self) -> i64 {
        self.inventory_counter
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn inventory_count(&self) -> usize {
        self.inventory.len()
    }
}
