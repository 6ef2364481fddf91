//! Inventory actor
//!
//! Tracks fresh batches for the admin console. Updates are partial: fields
//! left as `None` keep their stored value.

use crate::config::Timeouts;
use crate::context::Context;
use crate::error::{BakeryError, Result};
use crate::mailbox::Reply;
use crate::model::{Item, ItemUpdate, NewItem};
use crate::repository::InventoryRepository;

use super::Actor;

enum InventoryCommand {
    Add { item: NewItem, reply: Reply<Item> },
    Update { update: ItemUpdate, reply: Reply<()> },
    Delete { id: i64, reply: Reply<()> },
    List { reply: Reply<Vec<Item>> },
}

/// Inventory operations, serialized through a single worker
pub struct InventoryService {
    actor: Actor<InventoryCommand>,
}

impl InventoryService {
    /// Start the worker over `repo`
    pub fn start<R: InventoryRepository>(repo: R, timeouts: Timeouts) -> Result<Self> {
        let mut worker = InventoryWorker { repo };
        let actor = Actor::spawn("inventory", timeouts, move |command| {
            worker.handle(command)
        })?;
        Ok(Self { actor })
    }

    /// Add a batch; returns it with id and creation time
    pub fn add(&self, ctx: &Context, item: NewItem) -> Result<Item> {
        self.actor.call(ctx, |reply| InventoryCommand::Add { item, reply })
    }

    /// Apply the fields set on `update`
    pub fn update(&self, ctx: &Context, update: ItemUpdate) -> Result<()> {
        self.actor
            .call(ctx, |reply| InventoryCommand::Update { update, reply })
    }

    /// Remove a batch; a second delete of the same id is `NotFound`
    pub fn delete(&self, ctx: &Context, id: i64) -> Result<()> {
        self.actor
            .call(ctx, |reply| InventoryCommand::Delete { id, reply })
    }

    /// All batches, most recently baked first
    pub fn list(&self, ctx: &Context) -> Result<Vec<Item>> {
        self.actor.call(ctx, |reply| InventoryCommand::List { reply })
    }

    /// Stop accepting requests
    pub fn close(&self) {
        self.actor.close();
    }

    pub fn is_closed(&self) -> bool {
        self.actor.is_closed()
    }

    /// Close and wait for the worker to exit
    pub fn shutdown(mut self) -> Result<()> {
        self.actor.shutdown()
    }
}

// =============================================================================
// Worker
// =============================================================================

struct InventoryWorker<R> {
    repo: R,
}

impl<R: InventoryRepository> InventoryWorker<R> {
    fn handle(&mut self, command: InventoryCommand) {
        let ctx = Context::background();

        match command {
            InventoryCommand::Add { item, reply } => {
                let result = validate_new_item(&item).and_then(|()| self.repo.save(&ctx, item));
                log_outcome("add", &result);
                let _ = reply.send(result);
            }
            InventoryCommand::Update { update, reply } => {
                let result =
                    validate_update(&update).and_then(|()| self.repo.update(&ctx, update));
                log_outcome("update", &result);
                let _ = reply.send(result);
            }
            InventoryCommand::Delete { id, reply } => {
                let result = validate_id(id).and_then(|()| self.repo.delete(&ctx, id));
                log_outcome("delete", &result);
                let _ = reply.send(result);
            }
            InventoryCommand::List { reply } => {
                let _ = reply.send(self.repo.list(&ctx));
            }
        }
    }
}

fn log_outcome<T>(op: &'static str, result: &Result<T>) {
    match result {
        Ok(_) => tracing::debug!(op, "inventory request done"),
        Err(e) => tracing::debug!(op, error = %e, "inventory request rejected"),
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Rules for a new batch
pub fn validate_new_item(item: &NewItem) -> Result<()> {
    if item.name.trim().is_empty() {
        return Err(BakeryError::validation("item name is required"));
    }
    if item.category.trim().is_empty() {
        return Err(BakeryError::validation("category is required"));
    }
    if item.available_count < 0 {
        return Err(BakeryError::validation("available count cannot be negative"));
    }
    if item.price_cents < 0 {
        return Err(BakeryError::validation("price cannot be negative"));
    }
    Ok(())
}

/// Rules for a partial update. Only supplied fields are checked.
pub fn validate_update(update: &ItemUpdate) -> Result<()> {
    validate_id(update.id)?;
    if matches!(update.available_count, Some(count) if count < 0) {
        return Err(BakeryError::validation("available count cannot be negative"));
    }
    if matches!(update.price_cents, Some(price) if price < 0) {
        return Err(BakeryError::validation("price cannot be negative"));
    }
    Ok(())
}

fn validate_id(id: i64) -> Result<()> {
    if id <= 0 {
        return Err(BakeryError::validation("item id must be positive"));
    }
    Ok(())
}
