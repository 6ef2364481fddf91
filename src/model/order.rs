//! Order types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single product and the quantity requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: i64,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Recurring morning bread delivery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadSchedule {
    /// Weekdays, e.g. "mon", "thu"
    pub days: Vec<String>,
    /// Frequency label, e.g. "weekly"
    pub frequency: String,
    pub start_date: String,
    pub notes: String,
}

/// One croissant drop: weekday, amount and which croissant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CroissantSlot {
    pub day: String,
    pub quantity: i64,
    #[serde(default)]
    pub item: String,
}

impl CroissantSlot {
    pub fn new(day: impl Into<String>, quantity: i64, item: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            quantity,
            item: item.into(),
        }
    }
}

/// An order as submitted, before the store assigns identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewOrder {
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub items: Vec<OrderItem>,
    pub bread_schedule: BreadSchedule,
    pub croissant_schedule: Vec<CroissantSlot>,
    pub comment: String,
}

/// A stored order. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub items: Vec<OrderItem>,
    pub bread_schedule: BreadSchedule,
    pub croissant_schedule: Vec<CroissantSlot>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Attach store-assigned identity to a submission
    pub fn from_new(order: NewOrder, id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_name: order.customer_name,
            address: order.address,
            phone: order.phone,
            items: order.items,
            bread_schedule: order.bread_schedule,
            croissant_schedule: order.croissant_schedule,
            comment: order.comment,
            created_at,
        }
    }
}
