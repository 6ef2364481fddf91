//! Application wiring
//!
//! Registers the driver, bootstraps the schema, and starts both actors over
//! SQL-vocabulary repositories that share the driver's store.
//!
//! ```text
//!   OrderService ─────► SqlOrderRepository ─────┐
//!                                               ├──► Connection ──► Store ──► snapshot
//!   InventoryService ─► SqlInventoryRepository ─┘
//! ```

use crate::config::Config;
use crate::context::Context;
use crate::driver::Driver;
use crate::error::Result;
use crate::repository::{SqlInventoryRepository, SqlOrderRepository};
use crate::service::{InventoryService, OrderService};

/// A running bakery: both actors plus the store behind them
pub struct Bakery {
    orders: OrderService,
    inventory: InventoryService,
    driver: Driver,
}

impl Bakery {
    /// Open the store described by `config` and start both actors
    pub fn open(config: Config) -> Result<Self> {
        let driver = Driver::register(&config)?;
        Self::with_driver(driver, &config)
    }

    /// Start both actors over a store that never touches disk
    pub fn in_memory() -> Result<Self> {
        Self::with_driver(Driver::in_memory()?, &Config::default())
    }

    fn with_driver(driver: Driver, config: &Config) -> Result<Self> {
        driver.ensure_schema(&Context::background())?;

        let orders =
            OrderService::start(SqlOrderRepository::new(driver.connect()), config.timeouts)?;
        let inventory = InventoryService::start(
            SqlInventoryRepository::new(driver.connect()),
            config.timeouts,
        )?;

        tracing::info!(driver = driver.name(), "bakery ready");

        Ok(Self {
            orders,
            inventory,
            driver,
        })
    }

    pub fn orders(&self) -> &OrderService {
        &self.orders
    }

    pub fn inventory(&self) -> &InventoryService {
        &self.inventory
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Stop both actors, then flush and close the store
    pub fn shutdown(self) -> Result<()> {
        let Self {
            orders,
            inventory,
            driver,
        } = self;

        let orders = orders.shutdown();
        let inventory = inventory.shutdown();
        let stats = driver.shutdown()?;

        tracing::info!(
            snapshots_written = stats.written,
            snapshots_failed = stats.failed,
            "bakery stopped"
        );

        orders.and(inventory)
    }
}
