//! Order actor

use crate::config::Timeouts;
use crate::context::Context;
use crate::error::{BakeryError, Result};
use crate::mailbox::Reply;
use crate::model::{NewOrder, Order};
use crate::repository::OrderRepository;

use super::Actor;

enum OrderCommand {
    Submit { order: NewOrder, reply: Reply<Order> },
    List { reply: Reply<Vec<Order>> },
}

/// Accepts and lists customer orders through a single worker
pub struct OrderService {
    actor: Actor<OrderCommand>,
}

impl OrderService {
    /// Start the worker over `repo`
    pub fn start<R: OrderRepository>(mut repo: R, timeouts: Timeouts) -> Result<Self> {
        let actor = Actor::spawn("orders", timeouts, move |command| match command {
            OrderCommand::Submit { order, reply } => {
                let _ = reply.send(submit(&mut repo, order));
            }
            OrderCommand::List { reply } => {
                let _ = reply.send(repo.list(&Context::background()));
            }
        })?;
        Ok(Self { actor })
    }

    /// Validate and persist an order; returns it with id and creation time
    pub fn submit(&self, ctx: &Context, order: NewOrder) -> Result<Order> {
        self.actor
            .call(ctx, |reply| OrderCommand::Submit { order, reply })
    }

    /// All orders, newest first
    pub fn list(&self, ctx: &Context) -> Result<Vec<Order>> {
        self.actor.call(ctx, |reply| OrderCommand::List { reply })
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

fn submit<R: OrderRepository>(repo: &mut R, order: NewOrder) -> Result<Order> {
    if let Err(e) = validate_order(&order) {
        tracing::debug!(error = %e, "order rejected");
        return Err(e);
    }

    let saved = repo.save(&Context::background(), order)?;
    tracing::debug!(id = saved.id, customer = %saved.customer_name, "order accepted");
    Ok(saved)
}

/// Business rules an order must pass before it is stored
pub fn validate_order(order: &NewOrder) -> Result<()> {
    let fail = |message: &str| Err(BakeryError::validation(message));

    if is_blank(&order.customer_name) {
        return fail("name is required");
    }
    if is_blank(&order.address) {
        return fail("address is required");
    }
    if is_blank(&order.phone) {
        return fail("phone is required");
    }
    if order.items.is_empty() {
        return fail("at least one item is required");
    }
    for item in &order.items {
        if is_blank(&item.name) {
            return fail("item name is required");
        }
        if item.quantity <= 0 {
            return fail("item quantity must be positive");
        }
    }

    let bread = &order.bread_schedule;
    if bread.days.is_empty() {
        return fail("select at least one bread delivery day");
    }
    if is_blank(&bread.frequency) {
        return fail("select a bread delivery frequency");
    }
    if is_blank(&bread.start_date) {
        return fail("select a bread start date");
    }

    if order.croissant_schedule.is_empty() {
        return fail("select croissant days");
    }
    for slot in &order.croissant_schedule {
        if is_blank(&slot.day) {
            return fail("croissant day is required");
        }
        if slot.quantity <= 0 {
            return fail("croissant quantity must be positive");
        }
    }

    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
