//! Inventory over the statement vocabulary

use chrono::Utc;

use crate::context::Context;
use crate::driver::{Connection, Row, Value};
use crate::error::Result;
use crate::model::{Item, ItemUpdate, NewItem};

use super::InventoryRepository;

const INSERT: &str = "INSERT INTO inventory (name, category, available_count, price_cents, baked_at) VALUES (?, ?, ?, ?, ?)";
const LIST: &str = "SELECT id, name, category, available_count, price_cents, baked_at, created_at FROM inventory ORDER BY baked_at DESC";
const UPDATE: &str =
    "UPDATE inventory SET available_count = ?, price_cents = ?, baked_at = ? WHERE id = ?";
const DELETE: &str = "DELETE FROM inventory WHERE id = ?";

/// Inventory persistence through a driver connection
pub struct SqlInventoryRepository {
    conn: Connection,
}

impl SqlInventoryRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl InventoryRepository for SqlInventoryRepository {
    fn save(&mut self, ctx: &Context, item: NewItem) -> Result<Item> {
        let args = [
            Value::from(item.name.as_str()),
            Value::from(item.category.as_str()),
            Value::from(item.available_count),
            Value::from(item.price_cents),
            Value::from(item.baked_at),
        ];
        let result = self.conn.exec(ctx, INSERT, &args)?;

        let created_at = result.created_at.unwrap_or_else(Utc::now);
        Ok(Item::from_new(item, result.last_insert_id, created_at))
    }

    fn list(&mut self, ctx: &Context) -> Result<Vec<Item>> {
        let rows = self.conn.query(ctx, LIST, &[])?;
        rows.into_iter().map(|row| decode(&row)).collect()
    }

    fn update(&mut self, ctx: &Context, update: ItemUpdate) -> Result<()> {
        // Omitted fields travel as NULL, which the driver treats as "not supplied"
        let args = [
            Value::from(update.available_count),
            Value::from(update.price_cents),
            Value::from(update.baked_at),
            Value::from(update.id),
        ];
        self.conn.exec(ctx, UPDATE, &args)?;
        Ok(())
    }

    fn delete(&mut self, ctx: &Context, id: i64) -> Result<()> {
        self.conn.exec(ctx, DELETE, &[Value::from(id)])?;
        Ok(())
    }
}

fn decode(row: &Row) -> Result<Item> {
    Ok(Item {
        id: row.int(0)?,
        name: row.text(1)?,
        category: row.text(2)?,
        available_count: row.int(3)?,
        price_cents: row.int(4)?,
        baked_at: row.time(5)?,
        created_at: row.time(6)?,
    })
}
