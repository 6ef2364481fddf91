//! Caller Context
//!
//! A cancellation signal plus an optional deadline that every public call
//! accepts. Workers never look at it; only the calling side does, while it
//! waits for the request to be accepted and for the reply.
//!
//! Cancellation is modelled as a channel whose only sender lives in a
//! [`CancelHandle`]. Dropping the handle disconnects the channel, which wakes
//! every `select!` that is waiting on [`Context::done`].

use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};

use crate::error::BakeryError;

/// Cancellation + deadline carried by a caller
#[derive(Debug, Clone)]
pub struct Context {
    /// Disconnected once the owning CancelHandle is dropped
    done: Receiver<()>,

    /// Absolute deadline, if any
    deadline: Option<Instant>,
}

/// Cancels the contexts derived from it when dropped (or on `cancel()`)
#[derive(Debug)]
pub struct CancelHandle {
    _signal: Sender<()>,
}

impl CancelHandle {
    /// Cancel now
    pub fn cancel(self) {}
}

impl Context {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self {
            done: channel::never(),
            deadline: None,
        }
    }

    /// A cancellable context and the handle that cancels it
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (signal, done) = channel::bounded(0);
        let ctx = Self {
            done,
            deadline: None,
        };
        (ctx, CancelHandle { _signal: signal })
    }

    /// Derive a context that also expires after `timeout`
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derive a context that also expires at `deadline`; the earlier deadline wins
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(existing) if existing <= deadline => existing,
            _ => deadline,
        };
        Self {
            done: self.done.clone(),
            deadline: Some(deadline),
        }
    }

    /// The deadline, if one was set
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Channel that becomes ready (disconnected) once the context is cancelled
    pub fn done(&self) -> &Receiver<()> {
        &self.done
    }

    /// Channel that fires at the deadline, or never
    pub fn expired(&self) -> Receiver<Instant> {
        match self.deadline {
            Some(deadline) => channel::at(deadline),
            None => channel::never(),
        }
    }

    /// Why the context is no longer usable, if it isn't
    pub fn err(&self) -> Option<BakeryError> {
        if let Err(TryRecvError::Disconnected) = self.done.try_recv() {
            return Some(BakeryError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(BakeryError::DeadlineExceeded),
            _ => None,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}
