//! Inventory types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A batch to add, before the store assigns identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub available_count: i64,
    /// Minor currency units
    pub price_cents: i64,
    pub baked_at: DateTime<Utc>,
}

/// A stored batch the admin console tracks for freshness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub available_count: i64,
    pub price_cents: i64,
    pub baked_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Attach store-assigned identity to a new batch
    pub fn from_new(item: NewItem, id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: item.name,
            category: item.category,
            available_count: item.available_count,
            price_cents: item.price_cents,
            baked_at: item.baked_at,
            created_at,
        }
    }
}

/// Partial update of a batch. `None` fields stay as stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub id: i64,
    #[serde(default)]
    pub available_count: Option<i64>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub baked_at: Option<DateTime<Utc>>,
}

impl ItemUpdate {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn available_count(mut self, count: i64) -> Self {
        self.available_count = Some(count);
        self
    }

    pub fn price_cents(mut self, price: i64) -> Self {
        self.price_cents = Some(price);
        self
    }

    pub fn baked_at(mut self, baked_at: DateTime<Utc>) -> Self {
        self.baked_at = Some(baked_at);
        self
    }
}
