//! Persistence Writer
//!
//! Background thread that writes snapshots so the store worker never waits on
//! disk. The two are connected by a [`SnapshotSlot`]: a one-element conduit
//! where a newer snapshot replaces a pending one instead of queuing behind it.

use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender, TrySendError};

use crate::error::Result;

use super::{write_snapshot, Snapshot};

// =============================================================================
// Coalescing Slot
// =============================================================================

/// Single-slot overwrite queue feeding the writer
///
/// Owned by the store worker (the only producer). Dropping it tells the
/// writer there is nothing more to come.
pub struct SnapshotSlot {
    tx: Sender<Snapshot>,
    /// Kept so the producer can evict a stale pending snapshot
    rx: Receiver<Snapshot>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        let (tx, rx) = channel::bounded(1);
        Self { tx, rx }
    }

    /// Consumer side for the writer thread
    pub fn subscribe(&self) -> Receiver<Snapshot> {
        self.rx.clone()
    }

    /// Offer the latest snapshot without blocking
    ///
    /// Returns true if a pending, not yet written snapshot was replaced.
    pub fn offer(&self, snapshot: Snapshot) -> bool {
        let mut pending = snapshot;
        let mut replaced = false;
        loop {
            match self.tx.try_send(pending) {
                Ok(()) => return replaced,
                Err(TrySendError::Full(snapshot)) => {
                    // The writer may grab it first; either way the slot frees up
                    if self.rx.try_recv().is_ok() {
                        replaced = true;
                    }
                    pending = snapshot;
                }
                Err(TrySendError::Disconnected(_)) => return replaced,
            }
        }
    }

    /// Take the pending snapshot, if any
    pub fn take(&self) -> Option<Snapshot> {
        self.rx.try_recv().ok()
    }

    /// True when a snapshot is waiting to be written
    pub fn is_pending(&self) -> bool {
        !self.rx.is_empty()
    }
}

impl Default for SnapshotSlot {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Writer Thread
// =============================================================================

/// Counters reported when the writer stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Snapshots that reached disk
    pub written: u64,

    /// Snapshots whose write failed (logged, then dropped)
    pub failed: u64,
}

/// Handle to the background snapshot writer
pub struct PersistenceWriter {
    path: PathBuf,
    handle: Option<JoinHandle<WriterStats>>,
}

impl PersistenceWriter {
    /// Start writing every snapshot received on `snapshots` to `path`
    ///
    /// The thread exits once the producing [`SnapshotSlot`] is dropped and
    /// the last pending snapshot has been written.
    pub fn spawn(path: PathBuf, snapshots: Receiver<Snapshot>) -> Result<Self> {
        let thread_path = path.clone();
        let handle = thread::Builder::new()
            .name("bakery-persist".to_string())
            .spawn(move || Self::run(thread_path, snapshots))?;

        Ok(Self {
            path,
            handle: Some(handle),
        })
    }

    /// Snapshot file this writer targets
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Wait for the writer to drain and stop
    pub fn join(mut self) -> WriterStats {
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(stats)) => stats,
            Some(Err(_)) => {
                tracing::error!(path = %self.path.display(), "persistence writer panicked");
                WriterStats::default()
            }
            None => WriterStats::default(),
        }
    }

    fn run(path: PathBuf, snapshots: Receiver<Snapshot>) -> WriterStats {
        let mut stats = WriterStats::default();

        for snapshot in snapshots.iter() {
            match write_snapshot(&path, &snapshot) {
                Ok(()) => {
                    stats.written += 1;
                    tracing::trace!(
                        path = %path.display(),
                        orders = snapshot.orders.len(),
                        inventory = snapshot.inventory.len(),
                        "snapshot written"
                    );
                }
                Err(e) => {
                    // Best effort: the in-memory state stays authoritative
                    stats.failed += 1;
                    tracing::warn!(path = %path.display(), error = %e, "snapshot write failed");
                }
            }
        }

        tracing::debug!(
            written = stats.written,
            failed = stats.failed,
            "persistence writer stopped"
        );
        stats
    }
}
