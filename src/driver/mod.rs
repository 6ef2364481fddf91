//! Storage-Engine Adapter
//!
//! Lets the rest of the crate address the store through a small, fixed
//! vocabulary of SQL-shaped statements instead of a bespoke API, so the
//! repositories stay storage-agnostic.
//!
//! ## Responsibilities
//! - Classify statement text into one of seven shapes
//! - Map positional arguments onto store fields
//! - Impose list ordering (orders by id desc, inventory by baked_at desc)
//! - Refuse transactions
//!
//! ## Positional Arguments
//! ```text
//! insert orders:    name, address, phone, items_json, bread_json, croissant_json, comment
//! insert inventory: name, category, count, price_cents, baked_at
//! update inventory: count, price_cents, baked_at, id
//! delete inventory: id
//! ```

mod connection;
mod rows;
mod statement;
mod value;

pub use connection::{Connection, DbType, Driver};
pub use rows::{ExecResult, Row, Rows, INVENTORY_COLUMNS, ORDER_COLUMNS};
pub use statement::{Statement, StatementKind};
pub use value::Value;
