//! Driver and connections
//!
//! `Driver` owns the store; `Connection`s are cheap handles that forward every
//! statement to the store worker.

use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::config::Config;
use crate::context::Context;
use crate::error::{BakeryError, Result};
use crate::store::{Store, WriterStats};

use super::{ExecResult, Rows, Statement, StatementKind, Value};

/// Schema bootstrap issued by [`Driver::ensure_schema`]
const SCHEMA: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY,
        name TEXT,
        address TEXT,
        phone TEXT,
        items TEXT,
        bread_schedule TEXT,
        croissant_schedule TEXT,
        comment TEXT
    )",
    "CREATE TABLE IF NOT EXISTS inventory (
        id INTEGER PRIMARY KEY,
        name TEXT,
        category TEXT,
        available_count INTEGER,
        price_cents INTEGER,
        baked_at TIMESTAMP
    )",
];

// =============================================================================
// DbType
// =============================================================================

/// Labels the driver can be registered under. All of them are backed by the
/// same snapshot store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbType {
    Chai,
    Sqlite,
    DuckDb,
    Pgx,
    ClickHouse,
}

impl DbType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbType::Chai => "chai",
            DbType::Sqlite => "sqlite",
            DbType::DuckDb => "duckdb",
            DbType::Pgx => "pgx",
            DbType::ClickHouse => "clickhouse",
        }
    }

    /// "bakery-{label}"
    pub fn driver_name(&self) -> String {
        format!("bakery-{}", self.as_str())
    }
}

impl FromStr for DbType {
    type Err = BakeryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chai" => Ok(DbType::Chai),
            "sqlite" => Ok(DbType::Sqlite),
            "duckdb" => Ok(DbType::DuckDb),
            "pgx" => Ok(DbType::Pgx),
            "clickhouse" => Ok(DbType::ClickHouse),
            other => Err(BakeryError::Config(format!("unsupported db type {}", other))),
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Driver
// =============================================================================

/// The registered storage engine
pub struct Driver {
    name: String,
    store: Store,
}

impl Driver {
    /// Open the store for `config.db_type`
    ///
    /// Without an explicit snapshot path the file is `{cwd}/bakery-{db_type}.json`.
    pub fn register(config: &Config) -> Result<Self> {
        let db_type: DbType = config.db_type.parse()?;
        let name = db_type.driver_name();

        let path = match &config.snapshot_path {
            Some(path) => path.clone(),
            None => std::env::current_dir()?.join(format!("{}.json", name)),
        };

        let store = Store::open(Some(path), config.store_inbox_capacity, config.timeouts)?;
        tracing::info!(driver = %name, "driver registered");

        Ok(Self { name, store })
    }

    /// A driver over a store that never touches disk
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            name: "bakery-memory".to_string(),
            store: Store::in_memory()?,
        })
    }

    /// Driver name, e.g. "bakery-sqlite"
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.store.snapshot_path()
    }

    /// New connection to the shared store
    pub fn connect(&self) -> Connection {
        Connection {
            store: self.store.handle(),
        }
    }

    /// Run the CREATE TABLE bootstrap; unsupported-statement errors are skipped
    pub fn ensure_schema(&self, ctx: &Context) -> Result<()> {
        let conn = self.connect();
        for statement in SCHEMA {
            match conn.exec(ctx, statement, &[]) {
                Ok(_) | Err(BakeryError::UnsupportedStatement(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Stop the store and wait for the final snapshot to reach disk
    pub fn shutdown(self) -> Result<WriterStats> {
        self.store.shutdown()
    }
}

// =============================================================================
// Connection
// =============================================================================

/// Statement front end; every call travels through the store worker's channel
#[derive(Clone)]
pub struct Connection {
    store: crate::store::StoreHandle,
}

impl Connection {
    /// Classify `query` into a reusable statement
    pub fn prepare(&self, query: &str) -> Result<Statement> {
        let kind = StatementKind::classify(query)?;
        Ok(Statement::new(kind, self.store.clone()))
    }

    /// Prepare and run a mutating statement
    pub fn exec(&self, ctx: &Context, query: &str, args: &[Value]) -> Result<ExecResult> {
        self.prepare(query)?.exec(ctx, args)
    }

    /// Prepare and run a list statement
    pub fn query(&self, ctx: &Context, query: &str, args: &[Value]) -> Result<Rows> {
        self.prepare(query)?.query(ctx, args)
    }

    /// Transactions are not supported; this always fails
    pub fn begin(&self) -> Result<Infallible> {
        Err(BakeryError::TransactionsUnsupported)
    }

    /// Liveness round trip through the store worker
    pub fn ping(&self, ctx: &Context) -> Result<()> {
        self.store.noop(ctx)
    }
}
