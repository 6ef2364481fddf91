//! Orders over the statement vocabulary
//!
//! Line items and both schedules are stored as JSON text columns.

use chrono::Utc;

use crate::context::Context;
use crate::driver::{Connection, Row, Value};
use crate::error::Result;
use crate::model::{NewOrder, Order};

use super::OrderRepository;

const INSERT: &str = "INSERT INTO orders (name, address, phone, items, bread_schedule, croissant_schedule, comment) VALUES (?, ?, ?, ?, ?, ?, ?)";
const LIST: &str = "SELECT id, name, address, phone, items, bread_schedule, croissant_schedule, comment, created_at FROM orders ORDER BY id DESC";

/// Order persistence through a driver connection
pub struct SqlOrderRepository {
    conn: Connection,
}

impl SqlOrderRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl OrderRepository for SqlOrderRepository {
    fn save(&mut self, ctx: &Context, order: NewOrder) -> Result<Order> {
        let items = serde_json::to_string(&order.items)?;
        let bread = serde_json::to_string(&order.bread_schedule)?;
        let croissants = serde_json::to_string(&order.croissant_schedule)?;

        let args = [
            Value::from(order.customer_name.as_str()),
            Value::from(order.address.as_str()),
            Value::from(order.phone.as_str()),
            Value::from(items),
            Value::from(bread),
            Value::from(croissants),
            Value::from(order.comment.as_str()),
        ];
        let result = self.conn.exec(ctx, INSERT, &args)?;

        let created_at = result.created_at.unwrap_or_else(Utc::now);
        Ok(Order::from_new(order, result.last_insert_id, created_at))
    }

    fn list(&mut self, ctx: &Context) -> Result<Vec<Order>> {
        let rows = self.conn.query(ctx, LIST, &[])?;
        rows.into_iter().map(|row| decode(&row)).collect()
    }
}

fn decode(row: &Row) -> Result<Order> {
    Ok(Order {
        id: row.int(0)?,
        customer_name: row.text(1)?,
        address: row.text(2)?,
        phone: row.text(3)?,
        items: serde_json::from_str(&row.text(4)?)?,
        bread_schedule: serde_json::from_str(&row.text(5)?)?,
        croissant_schedule: serde_json::from_str(&row.text(6)?)?,
        comment: row.text(7)?,
        created_at: row.time(8)?,
    })
}
