//! Request/Reply Plumbing
//!
//! Every worker in the crate (store, order actor, inventory actor) is reached
//! the same way: the caller builds a message that carries a private reply
//! sender, pushes it onto the worker's inbox, then waits on the reply.
//!
//! ```text
//!   caller ──send(inbox)──► worker ──reply.send──► caller
//!          │ enqueue wait │          │ reply wait │
//!          └ ctx / Busy ──┘          └ ctx / Timeout
//! ```
//!
//! Both waits are bounded by the caller's [`Context`] and by a fixed ceiling.

use crossbeam::channel::{self, select, Sender};

use crate::config::Timeouts;
use crate::context::Context;
use crate::error::{BakeryError, Result};

/// Single-use reply slot carried inside a request.
///
/// Capacity 1 so the worker never blocks on a caller that already gave up.
pub(crate) type Reply<T> = Sender<Result<T>>;

/// Send a request built by `build` and wait for its reply.
///
/// `worker` names the worker in Busy/Timeout/Closed errors.
pub(crate) fn call<M, T>(
    inbox: &Sender<M>,
    build: impl FnOnce(Reply<T>) -> M,
    ctx: &Context,
    timeouts: Timeouts,
    worker: &'static str,
) -> Result<T> {
    if let Some(err) = ctx.err() {
        return Err(err);
    }

    let (reply, replies) = channel::bounded(1);
    let message = build(reply);
    let expired = ctx.expired();

    // Enqueue wait
    let ceiling = channel::after(timeouts.enqueue);
    select! {
        send(inbox, message) -> sent => {
            if sent.is_err() {
                return Err(BakeryError::Closed(worker));
            }
        }
        recv(ctx.done()) -> _ => return Err(BakeryError::Cancelled),
        recv(expired) -> _ => return Err(BakeryError::DeadlineExceeded),
        recv(ceiling) -> _ => {
            tracing::warn!(worker, "request not accepted within {:?}", timeouts.enqueue);
            return Err(BakeryError::Busy(worker));
        }
    }

    // Reply wait. From here on the request may complete even if we give up.
    let ceiling = channel::after(timeouts.reply);
    select! {
        recv(replies) -> result => result.unwrap_or(Err(BakeryError::Closed(worker))),
        recv(ctx.done()) -> _ => Err(BakeryError::Cancelled),
        recv(expired) -> _ => Err(BakeryError::DeadlineExceeded),
        recv(ceiling) -> _ => {
            tracing::warn!(worker, "no reply within {:?}", timeouts.reply);
            Err(BakeryError::Timeout(worker))
        }
    }
}
