//! Command Actors
//!
//! One actor per domain. Each owns its repository on a dedicated thread and is
//! reached only through a rendezvous inbox, so a request is accepted only when
//! the worker is ready for it.
//!
//! ## Responsibilities
//! - Serialize every operation of a domain through a single worker
//! - Validate requests inside the worker, before the repository is touched
//! - Bound each call by the caller's context and by fixed ceilings
//!
//! ## Lifecycle
//! ```text
//!   start() ──► Running ──close()/shutdown()/drop──► Closed
//! ```
//! `Closed` is terminal: every later call fails with `Closed`. A request that
//! was accepted but not yet answered may go unanswered.

mod inventory;
mod orders;

pub use inventory::{validate_new_item, validate_update, InventoryService};
pub use orders::{validate_order, OrderService};

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, select, Receiver, Sender};

use crate::config::Timeouts;
use crate::context::Context;
use crate::error::{BakeryError, Result};
use crate::mailbox::{self, Reply};

// =============================================================================
// Actor Shell
// =============================================================================

/// Caller-side half of an actor: inbox, quit signal and the worker thread
pub(crate) struct Actor<C> {
    name: &'static str,
    inbox: Sender<C>,
    quit: Sender<()>,
    closed: AtomicBool,
    timeouts: Timeouts,
    worker: Option<JoinHandle<()>>,
}

impl<C: Send + 'static> Actor<C> {
    /// Start a worker thread that feeds every command to `handle`
    pub(crate) fn spawn<H>(
        name: &'static str,
        timeouts: Timeouts,
        mut handle: H,
    ) -> Result<Self>
    where
        H: FnMut(C) + Send + 'static,
    {
        // Rendezvous: a send completes only when the worker takes it
        let (inbox, commands) = channel::bounded(0);
        let (quit, quit_rx) = channel::bounded(1);

        let worker = thread::Builder::new()
            .name(format!("bakery-{}", name))
            .spawn(move || run(name, commands, quit_rx, &mut handle))?;

        tracing::info!(actor = name, "actor started");

        Ok(Self {
            name,
            inbox,
            quit,
            closed: AtomicBool::new(false),
            timeouts,
            worker: Some(worker),
        })
    }

    /// Request/reply round trip; fails fast once closed
    pub(crate) fn call<T>(&self, ctx: &Context, build: impl FnOnce(Reply<T>) -> C) -> Result<T> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BakeryError::Closed(self.name));
        }
        mailbox::call(&self.inbox, build, ctx, self.timeouts, self.name)
    }

    /// Signal the worker to stop. Idempotent.
    pub(crate) fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            let _ = self.quit.try_send(());
            tracing::info!(actor = self.name, "actor closing");
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Close and wait for the worker to exit
    pub(crate) fn shutdown(&mut self) -> Result<()> {
        self.close();
        match self.worker.take().map(JoinHandle::join) {
            Some(Err(_)) => Err(BakeryError::Io(std::io::Error::other(format!(
                "{} worker panicked",
                self.name
            )))),
            _ => Ok(()),
        }
    }
}

impl<C> Drop for Actor<C> {
    fn drop(&mut self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            let _ = self.quit.try_send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!(actor = self.name, "worker panicked");
            }
        }
    }
}

fn run<C>(
    name: &'static str,
    commands: Receiver<C>,
    quit: Receiver<()>,
    handle: &mut impl FnMut(C),
) {
    tracing::debug!(actor = name, "worker running");

    loop {
        select! {
            recv(commands) -> command => match command {
                Ok(command) => handle(command),
                Err(_) => break,
            },
            recv(quit) -> _ => break,
        }
    }

    tracing::debug!(actor = name, "worker stopped");
}
