//! Durable Store Module
//!
//! In-memory sequences of orders and inventory, owned by a single worker
//! thread, with full-state JSON snapshots written in the background.
//!
//! ## Responsibilities
//! - Assign monotonically increasing ids and UTC creation times
//! - Serve independent copies of both sequences
//! - Patch and delete inventory by id (`NotFound` otherwise)
//! - Offer a snapshot to the persistence writer after every mutation
//! - Reload the last snapshot on startup
//!
//! ## Threads
//! ```text
//!   StoreHandle ──commands──► bakery-store ──SnapshotSlot──► bakery-persist
//!   (any thread)             (owns StoreState)   (size 1,       (temp file +
//!                                                  overwrite)     rename)
//! ```
//!
//! ## Snapshot File
//! ```json
//! {
//!   "orders": [ { "id": 1, "name": "...", "items": "[...]", ... } ],
//!   "inventory": [ { "id": 1, "name": "...", "baked_at": "...", ... } ],
//!   "order_counter": 1,
//!   "inventory_counter": 1
//! }
//! ```

mod record;
mod snapshot;
mod state;
mod worker;
mod writer;

pub use record::{InventoryPatch, InventoryRecord, Inserted, OrderRecord, Snapshot};
pub use snapshot::{read_snapshot, write_snapshot};
pub use state::StoreState;
pub use worker::{Store, StoreHandle};
pub use writer::{PersistenceWriter, SnapshotSlot, WriterStats};
