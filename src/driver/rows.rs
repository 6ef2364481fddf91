//! Statement results

use chrono::{DateTime, Utc};

use crate::error::{BakeryError, Result};
use crate::store::{InventoryRecord, Inserted, OrderRecord};

use super::Value;

/// Projection returned by `SELECT ... FROM orders`
pub const ORDER_COLUMNS: [&str; 9] = [
    "id",
    "name",
    "address",
    "phone",
    "items",
    "bread_schedule",
    "croissant_schedule",
    "comment",
    "created_at",
];

/// Projection returned by `SELECT ... FROM inventory`
pub const INVENTORY_COLUMNS: [&str; 7] = [
    "id",
    "name",
    "category",
    "available_count",
    "price_cents",
    "baked_at",
    "created_at",
];

// =============================================================================
// Exec Result
// =============================================================================

/// Outcome of a mutating statement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Id assigned by an insert, 0 otherwise
    pub last_insert_id: i64,

    /// Records touched
    pub rows_affected: u64,

    /// Creation time assigned by an insert
    pub created_at: Option<DateTime<Utc>>,
}

impl ExecResult {
    pub(crate) fn inserted(inserted: Inserted) -> Self {
        Self {
            last_insert_id: inserted.id,
            rows_affected: 1,
            created_at: Some(inserted.created_at),
        }
    }

    pub(crate) fn affected(rows: u64) -> Self {
        Self {
            rows_affected: rows,
            ..Self::default()
        }
    }
}

// =============================================================================
// Rows
// =============================================================================

/// One result row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Column as text (NULL = empty)
    pub fn text(&self, index: usize) -> Result<String> {
        Ok(self.cell(index)?.to_text())
    }

    /// Column as a non-NULL integer
    pub fn int(&self, index: usize) -> Result<i64> {
        self.cell(index)?
            .to_int()?
            .ok_or_else(|| BakeryError::InvalidArgument(format!("column {} is NULL", index)))
    }

    /// Column as a non-NULL timestamp
    pub fn time(&self, index: usize) -> Result<DateTime<Utc>> {
        self.cell(index)?
            .to_time()?
            .ok_or_else(|| BakeryError::InvalidArgument(format!("column {} is NULL", index)))
    }

    fn cell(&self, index: usize) -> Result<&Value> {
        self.values
            .get(index)
            .ok_or_else(|| BakeryError::InvalidArgument(format!("no column {}", index)))
    }
}

impl From<OrderRecord> for Row {
    fn from(record: OrderRecord) -> Self {
        Row::new(vec![
            Value::Int(record.id),
            Value::Text(record.name),
            Value::Text(record.address),
            Value::Text(record.phone),
            Value::Text(record.items_json),
            Value::Text(record.bread_json),
            Value::Text(record.croissant_json),
            Value::Text(record.comment),
            Value::Time(record.created_at),
        ])
    }
}

impl From<InventoryRecord> for Row {
    fn from(record: InventoryRecord) -> Self {
        Row::new(vec![
            Value::Int(record.id),
            Value::Text(record.name),
            Value::Text(record.category),
            Value::Int(record.available_count),
            Value::Int(record.price_cents),
            Value::Time(record.baked_at),
            Value::Time(record.created_at),
        ])
    }
}

/// Result set of a list statement
#[derive(Debug, Clone)]
pub struct Rows {
    columns: &'static [&'static str],
    rows: Vec<Row>,
}

impl Rows {
    pub(crate) fn orders(records: Vec<OrderRecord>) -> Self {
        Self {
            columns: &ORDER_COLUMNS,
            rows: records.into_iter().map(Row::from).collect(),
        }
    }

    pub(crate) fn inventory(records: Vec<InventoryRecord>) -> Self {
        Self {
            columns: &INVENTORY_COLUMNS,
            rows: records.into_iter().map(Row::from).collect(),
        }
    }

    pub fn columns(&self) -> &[&'static str] {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl IntoIterator for Rows {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
