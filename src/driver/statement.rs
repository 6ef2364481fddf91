//! Statement classification and execution
//!
//! ## Accepted Shapes (trimmed, case-insensitive)
//! | Text                                     | Kind            | Args |
//! |------------------------------------------|-----------------|------|
//! | `insert into orders ...`                 | InsertOrder     | 7    |
//! | `select ... from orders ...`             | ListOrders      | 0    |
//! | `insert into inventory ...`              | InsertInventory | 5    |
//! | `select ... from inventory ...`          | ListInventory   | 0    |
//! | `update inventory ...`                   | UpdateInventory | 4    |
//! | `delete from inventory ...`              | DeleteInventory | 1    |
//! | `create table ...`                       | SchemaBootstrap | 0    |
//!
//! Column lists, `WHERE` and `ORDER BY` clauses are not interpreted: the
//! argument order is fixed per shape, and list ordering is fixed per table.

use crate::context::Context;
use crate::error::{BakeryError, Result};
use crate::store::{InventoryPatch, InventoryRecord, OrderRecord, StoreHandle};

use super::{ExecResult, Rows, Value};

/// The statement shapes the driver understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    InsertOrder,
    ListOrders,
    InsertInventory,
    ListInventory,
    UpdateInventory,
    DeleteInventory,
    SchemaBootstrap,
}

impl StatementKind {
    /// Match statement text against the known shapes
    pub fn classify(query: &str) -> Result<Self> {
        let trimmed = query.trim().to_lowercase();

        let kind = if trimmed.starts_with("insert into orders") {
            StatementKind::InsertOrder
        } else if trimmed.starts_with("select") && trimmed.contains("from orders") {
            StatementKind::ListOrders
        } else if trimmed.starts_with("insert into inventory") {
            StatementKind::InsertInventory
        } else if trimmed.starts_with("select") && trimmed.contains("from inventory") {
            StatementKind::ListInventory
        } else if trimmed.starts_with("update inventory") {
            StatementKind::UpdateInventory
        } else if trimmed.starts_with("delete from inventory") {
            StatementKind::DeleteInventory
        } else if trimmed.starts_with("create table") {
            StatementKind::SchemaBootstrap
        } else {
            return Err(BakeryError::UnsupportedStatement(query.to_string()));
        };

        Ok(kind)
    }

    /// Minimum number of positional arguments
    pub fn arity(&self) -> usize {
        match self {
            StatementKind::InsertOrder => 7,
            StatementKind::InsertInventory => 5,
            StatementKind::UpdateInventory => 4,
            StatementKind::DeleteInventory => 1,
            StatementKind::ListOrders
            | StatementKind::ListInventory
            | StatementKind::SchemaBootstrap => 0,
        }
    }

    /// True for the list shapes, which go through `query`
    pub fn is_query(&self) -> bool {
        matches!(self, StatementKind::ListOrders | StatementKind::ListInventory)
    }
}

/// A prepared statement bound to a store
#[derive(Clone)]
pub struct Statement {
    kind: StatementKind,
    store: StoreHandle,
}

impl Statement {
    pub(crate) fn new(kind: StatementKind, store: StoreHandle) -> Self {
        Self { kind, store }
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Run a mutating statement (or the schema no-op)
    pub fn exec(&self, ctx: &Context, args: &[Value]) -> Result<ExecResult> {
        self.check_arity(args)?;

        match self.kind {
            // Nothing to create: the store has no schema
            StatementKind::SchemaBootstrap => Ok(ExecResult::default()),

            StatementKind::InsertOrder => {
                let record = OrderRecord {
                    name: args[0].to_text(),
                    address: args[1].to_text(),
                    phone: args[2].to_text(),
                    items_json: args[3].to_text(),
                    bread_json: args[4].to_text(),
                    croissant_json: args[5].to_text(),
                    comment: args[6].to_text(),
                    ..OrderRecord::default()
                };
                let inserted = self.store.insert_order(ctx, record)?;
                Ok(ExecResult::inserted(inserted))
            }

            StatementKind::InsertInventory => {
                let baked_at = args[4].to_time()?.ok_or_else(|| {
                    BakeryError::InvalidArgument("baked_at is required".to_string())
                })?;
                let record = InventoryRecord {
                    name: args[0].to_text(),
                    category: args[1].to_text(),
                    available_count: args[2].to_int()?.unwrap_or(0),
                    price_cents: args[3].to_int()?.unwrap_or(0),
                    baked_at,
                    ..InventoryRecord::default()
                };
                let inserted = self.store.insert_inventory(ctx, record)?;
                Ok(ExecResult::inserted(inserted))
            }

            StatementKind::UpdateInventory => {
                let patch = InventoryPatch::from_sentinels(
                    args[0].to_int()?,
                    args[1].to_int()?,
                    args[2].to_time()?,
                );
                let id = require_id(&args[3])?;
                self.store.update_inventory(ctx, id, patch)?;
                Ok(ExecResult::affected(1))
            }

            StatementKind::DeleteInventory => {
                let id = require_id(&args[0])?;
                self.store.delete_inventory(ctx, id)?;
                Ok(ExecResult::affected(1))
            }

            StatementKind::ListOrders | StatementKind::ListInventory => Err(
                BakeryError::InvalidArgument("list statements must be run with query".to_string()),
            ),
        }
    }

    /// Run a list statement
    ///
    /// Ordering: orders newest id first; inventory most recently baked first,
    /// ties keep insertion order.
    pub fn query(&self, ctx: &Context, args: &[Value]) -> Result<Rows> {
        self.check_arity(args)?;

        match self.kind {
            StatementKind::ListOrders => {
                let mut records = self.store.list_orders(ctx)?;
                records.sort_by(|a, b| b.id.cmp(&a.id));
                Ok(Rows::orders(records))
            }
            StatementKind::ListInventory => {
                let mut records = self.store.list_inventory(ctx)?;
                records.sort_by(|a, b| b.baked_at.cmp(&a.baked_at));
                Ok(Rows::inventory(records))
            }
            _ => Err(BakeryError::InvalidArgument(
                "query only supports listing".to_string(),
            )),
        }
    }

    fn check_arity(&self, args: &[Value]) -> Result<()> {
        let expected = self.kind.arity();
        if args.len() < expected {
            return Err(BakeryError::InvalidArgument(format!(
                "expected {} arguments, got {}",
                expected,
                args.len()
            )));
        }
        Ok(())
    }
}

fn require_id(value: &Value) -> Result<i64> {
    value
        .to_int()?
        .ok_or_else(|| BakeryError::InvalidArgument("id is required".to_string()))
}
