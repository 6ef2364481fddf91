//! Store worker
//!
//! Spins the single thread that owns a [`StoreState`] and hands out
//! [`StoreHandle`]s that reach it only through a channel.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, select, Receiver, Sender};

use crate::config::Timeouts;
use crate::context::Context;
use crate::error::{BakeryError, Result};
use crate::mailbox::{self, Reply};

use super::{
    read_snapshot, InventoryPatch, InventoryRecord, Inserted, OrderRecord, PersistenceWriter,
    SnapshotSlot, StoreState, WriterStats,
};

const WORKER: &str = "store";

/// Every operation the store worker executes
pub(crate) enum StoreCommand {
    InsertOrder {
        record: OrderRecord,
        reply: Reply<Inserted>,
    },
    ListOrders {
        reply: Reply<Vec<OrderRecord>>,
    },
    InsertInventory {
        record: InventoryRecord,
        reply: Reply<Inserted>,
    },
    ListInventory {
        reply: Reply<Vec<InventoryRecord>>,
    },
    UpdateInventory {
        id: i64,
        patch: InventoryPatch,
        reply: Reply<()>,
    },
    DeleteInventory {
        id: i64,
        reply: Reply<()>,
    },
    Noop {
        reply: Reply<()>,
    },
}

// =============================================================================
// Store (owner)
// =============================================================================

/// Durable store: one worker thread, one optional persistence writer
///
/// ## Threads
/// - `bakery-store`: owns the state, drains the command inbox one at a time
/// - `bakery-persist`: writes snapshots offered by the worker (only when a
///   snapshot path is configured)
///
/// Dropping the store shuts it down; use [`Store::shutdown`] to observe errors.
pub struct Store {
    handle: StoreHandle,
    quit: Sender<()>,
    worker: Option<JoinHandle<()>>,
    writer: Option<PersistenceWriter>,
    snapshot_path: Option<PathBuf>,
}

impl Store {
    /// Open a store, loading `snapshot_path` if it exists
    ///
    /// On startup:
    /// 1. Read the snapshot (missing or empty file = empty state)
    /// 2. Start the persistence writer, if persisting
    /// 3. Start the worker
    pub fn open(
        snapshot_path: Option<PathBuf>,
        inbox_capacity: usize,
        timeouts: Timeouts,
    ) -> Result<Self> {
        // Step 1: Load persisted state; any read/parse failure is fatal
        let state = match &snapshot_path {
            Some(path) => match read_snapshot(path)? {
                Some(snapshot) => {
                    let state = StoreState::from_snapshot(snapshot);
                    tracing::info!(
                        path = %path.display(),
                        orders = state.order_count(),
                        inventory = state.inventory_count(),
                        order_counter = state.order_counter(),
                        inventory_counter = state.inventory_counter(),
                        "snapshot loaded"
                    );
                    state
                }
                None => {
                    tracing::info!(path = %path.display(), "no snapshot found, starting empty");
                    StoreState::new()
                }
            },
            None => StoreState::new(),
        };

        // Step 2: Persistence writer behind a coalescing slot
        let (slot, writer) = match &snapshot_path {
            Some(path) => {
                let slot = SnapshotSlot::new();
                let writer = PersistenceWriter::spawn(path.clone(), slot.subscribe())?;
                (Some(slot), Some(writer))
            }
            None => (None, None),
        };

        // Step 3: Worker
        let (commands_tx, commands) = channel::bounded(inbox_capacity);
        let (quit, quit_rx) = channel::bounded(1);
        let worker = StoreWorker { state, slot };
        let handle = thread::Builder::new()
            .name("bakery-store".to_string())
            .spawn(move || worker.run(commands, quit_rx))?;

        Ok(Self {
            handle: StoreHandle {
                commands: commands_tx,
                timeouts,
            },
            quit,
            worker: Some(handle),
            writer,
            snapshot_path,
        })
    }

    /// Open a persisting store with default capacity and timeouts
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Some(path.to_path_buf()), 32, Timeouts::default())
    }

    /// Open a store that never touches disk
    pub fn in_memory() -> Result<Self> {
        Self::open(None, 32, Timeouts::default())
    }

    /// A cloneable sender-side handle
    pub fn handle(&self) -> StoreHandle {
        self.handle.clone()
    }

    /// Snapshot file, if persisting
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Stop the worker, write the final snapshot, and wait for both threads
    pub fn shutdown(mut self) -> Result<WriterStats> {
        self.stop()
    }

    fn stop(&mut self) -> Result<WriterStats> {
        let _ = self.quit.try_send(());

        let worker_result = match self.worker.take().map(JoinHandle::join) {
            Some(Err(_)) => Err(BakeryError::Io(std::io::Error::other(
                "store worker panicked",
            ))),
            _ => Ok(()),
        };

        // The worker dropped its slot on exit, so the writer drains and stops
        let stats = self
            .writer
            .take()
            .map(PersistenceWriter::join)
            .unwrap_or_default();

        worker_result.map(|()| stats)
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        if self.worker.is_some() {
            if let Err(e) = self.stop() {
                tracing::error!(error = %e, "store shutdown failed");
            }
        }
    }
}

// =============================================================================
// Store Handle (callers)
// =============================================================================

/// Sender side of the store; every call is a bounded request/reply round trip
#[derive(Clone)]
pub struct StoreHandle {
    commands: Sender<StoreCommand>,
    timeouts: Timeouts,
}

impl StoreHandle {
    /// Insert an order; returns its id and creation time
    pub fn insert_order(&self, ctx: &Context, record: OrderRecord) -> Result<Inserted> {
        self.call(ctx, |reply| StoreCommand::InsertOrder { record, reply })
    }

    /// Copy of every stored order
    pub fn list_orders(&self, ctx: &Context) -> Result<Vec<OrderRecord>> {
        self.call(ctx, |reply| StoreCommand::ListOrders { reply })
    }

    /// Insert an inventory batch; returns its id and creation time
    pub fn insert_inventory(&self, ctx: &Context, record: InventoryRecord) -> Result<Inserted> {
        self.call(ctx, |reply| StoreCommand::InsertInventory { record, reply })
    }

    /// Copy of every stored inventory batch
    pub fn list_inventory(&self, ctx: &Context) -> Result<Vec<InventoryRecord>> {
        self.call(ctx, |reply| StoreCommand::ListInventory { reply })
    }

    /// Patch a batch in place; `NotFound` if the id is unknown
    pub fn update_inventory(&self, ctx: &Context, id: i64, patch: InventoryPatch) -> Result<()> {
        self.call(ctx, |reply| StoreCommand::UpdateInventory { id, patch, reply })
    }

    /// Remove a batch; `NotFound` if the id is unknown
    pub fn delete_inventory(&self, ctx: &Context, id: i64) -> Result<()> {
        self.call(ctx, |reply| StoreCommand::DeleteInventory { id, reply })
    }

    /// Round trip through the worker without touching state
    pub fn noop(&self, ctx: &Context) -> Result<()> {
        self.call(ctx, |reply| StoreCommand::Noop { reply })
    }

    fn call<T>(&self, ctx: &Context, build: impl FnOnce(Reply<T>) -> StoreCommand) -> Result<T> {
        mailbox::call(&self.commands, build, ctx, self.timeouts, WORKER)
    }
}

// =============================================================================
// Worker Loop
// =============================================================================

struct StoreWorker {
    state: StoreState,
    slot: Option<SnapshotSlot>,
}

impl StoreWorker {
    fn run(mut self, commands: Receiver<StoreCommand>, quit: Receiver<()>) {
        tracing::debug!("store worker running");

        loop {
            select! {
                recv(commands) -> command => match command {
                    Ok(command) => self.handle(command),
                    Err(_) => break,
                },
                recv(quit) -> _ => break,
            }
        }

        // Final snapshot; dropping `self` afterwards releases the writer
        self.queue_persist();
        tracing::debug!("store worker stopped");
    }

    fn handle(&mut self, command: StoreCommand) {
        match command {
            StoreCommand::InsertOrder { record, reply } => {
                let inserted = self.state.insert_order(record);
                tracing::debug!(id = inserted.id, "order inserted");
                self.queue_persist();
                let _ = reply.send(Ok(inserted));
            }
            StoreCommand::ListOrders { reply } => {
                let _ = reply.send(Ok(self.state.list_orders()));
            }
            StoreCommand::InsertInventory { record, reply } => {
                let inserted = self.state.insert_inventory(record);
                tracing::debug!(id = inserted.id, "inventory inserted");
                self.queue_persist();
                let _ = reply.send(Ok(inserted));
            }
            StoreCommand::ListInventory { reply } => {
                let _ = reply.send(Ok(self.state.list_inventory()));
            }
            StoreCommand::UpdateInventory { id, patch, reply } => {
                let result = self.state.update_inventory(id, patch);
                if result.is_ok() {
                    tracing::debug!(id, "inventory updated");
                    self.queue_persist();
                }
                let _ = reply.send(result);
            }
            StoreCommand::DeleteInventory { id, reply } => {
                let result = self.state.delete_inventory(id);
                if result.is_ok() {
                    tracing::debug!(id, "inventory deleted");
                    self.queue_persist();
                }
                let _ = reply.send(result);
            }
            StoreCommand::Noop { reply } => {
                let _ = reply.send(Ok(()));
            }
        }
    }

    /// Hand the current full state to the writer without waiting
    fn queue_persist(&self) {
        if let Some(slot) = &self.slot {
            if slot.offer(self.state.snapshot()) {
                tracing::trace!("pending snapshot replaced by a newer one");
            }
        }
    }
}
