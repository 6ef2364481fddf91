//! Store records
//!
//! The raw persisted representation. Order line items and schedules stay as
//! JSON text here, exactly as they travel through the statement columns.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A stored order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderRecord {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(rename = "items")]
    pub items_json: String,
    #[serde(rename = "bread_schedule")]
    pub bread_json: String,
    #[serde(rename = "croissant_schedule")]
    pub croissant_json: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A stored inventory batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryRecord {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub available_count: i64,
    pub price_cents: i64,
    pub baked_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Fields an inventory update may overwrite. `None` leaves the stored value alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryPatch {
    pub available_count: Option<i64>,
    pub price_cents: Option<i64>,
    pub baked_at: Option<DateTime<Utc>>,
}

impl InventoryPatch {
    /// Build a patch from sentinel-encoded statement arguments.
    ///
    /// A negative count or price means "not supplied", as does a missing or
    /// zero (Unix epoch or `0001-01-01`) baked-at. Zero count and zero price
    /// are real values.
    pub fn from_sentinels(
        available_count: Option<i64>,
        price_cents: Option<i64>,
        baked_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            available_count: available_count.filter(|count| *count >= 0),
            price_cents: price_cents.filter(|price| *price >= 0),
            baked_at: baked_at.filter(|time| !is_zero_time(time)),
        }
    }

    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.available_count.is_none() && self.price_cents.is_none() && self.baked_at.is_none()
    }

    pub(crate) fn apply(&self, record: &mut InventoryRecord) {
        if let Some(count) = self.available_count {
            record.available_count = count;
        }
        if let Some(price) = self.price_cents {
            record.price_cents = price;
        }
        if let Some(baked_at) = self.baked_at {
            record.baked_at = baked_at;
        }
    }
}

/// The unset timestamp: the serde default or the year-1 zero value
fn is_zero_time(time: &DateTime<Utc>) -> bool {
    *time == DateTime::<Utc>::default() || time.year() <= 1
}

/// Identity assigned by the store worker on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inserted {
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

/// Full on-disk state: both sequences and both counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub orders: Vec<OrderRecord>,
    pub inventory: Vec<InventoryRecord>,
    pub order_counter: i64,
    pub inventory_counter: i64,
}
