//! # Bakery Store
//!
//! Order and inventory core for a small bakery:
//! - Serialized command actors for orders and inventory
//! - Business validation inside the actor, before anything is stored
//! - An in-process store with crash-safe JSON snapshots
//! - A SQL-shaped statement vocabulary in front of the store
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │     OrderService     │      │   InventoryService   │
//! │   (actor, 1 thread)  │      │   (actor, 1 thread)  │
//! └──────────┬───────────┘      └──────────┬───────────┘
//!            │ repository                  │ repository
//!            └──────────────┬──────────────┘
//!                           ▼
//!              ┌────────────────────────┐
//!              │   Driver / Connection  │
//!              │ (statement vocabulary) │
//!              └────────────┬───────────┘
//!                           ▼
//!              ┌────────────────────────┐
//!              │      Store worker      │
//!              │  (owns all the state)  │
//!              └────────────┬───────────┘
//!                           │ coalescing slot
//!                           ▼
//!              ┌────────────────────────┐
//!              │   Persistence writer   │
//!              │ (temp file + rename)   │
//!              └────────────────────────┘
//! ```
//!
//! Every call carries a [`Context`] and is bounded twice: once while the
//! request waits to be accepted (`Busy`) and once while it waits for the
//! reply (`Timeout`).

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod context;

mod mailbox;

pub mod model;
pub mod store;
pub mod driver;
pub mod repository;
pub mod service;
pub mod app;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use app::Bakery;
pub use config::{Config, ConfigBuilder, Timeouts};
pub use context::{CancelHandle, Context};
pub use error::{BakeryError, Result};
pub use service::{InventoryService, OrderService};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the bakery store
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
