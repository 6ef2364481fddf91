//! Bakery CLI
//!
//! Opens the store, runs one command through the actors, prints the result
//! as JSON and shuts down cleanly so the final snapshot reaches disk.

use std::path::PathBuf;
use std::time::Duration;

use bakery_store::model::{ItemUpdate, NewItem, NewOrder};
use bakery_store::{Bakery, Config, Context, Result, Timeouts};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Bakery order and inventory store
#[derive(Parser, Debug)]
#[command(name = "bakery")]
#[command(about = "Order intake and inventory for a small bakery")]
#[command(version)]
struct Args {
    /// Driver label: chai, sqlite, duckdb, pgx or clickhouse
    #[arg(long, default_value = "sqlite")]
    db_type: String,

    /// Snapshot file (default: ./bakery-<db-type>.json)
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Ceiling for each wait of a call, in milliseconds
    #[arg(long, default_value = "2000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Customer orders
    #[command(subcommand)]
    Orders(OrderCommands),

    /// Fresh batches on the shelf
    #[command(subcommand)]
    Inventory(InventoryCommands),
}

#[derive(Subcommand, Debug)]
enum OrderCommands {
    /// Submit an order read from a JSON file
    Submit {
        #[arg(long)]
        file: PathBuf,
    },

    /// List orders, newest first
    List,
}

#[derive(Subcommand, Debug)]
enum InventoryCommands {
    /// Add a batch
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        count: i64,

        #[arg(long)]
        price_cents: i64,

        /// RFC 3339 timestamp
        #[arg(long)]
        baked_at: DateTime<Utc>,
    },

    /// Change the fields given; the rest stay as stored
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        count: Option<i64>,

        #[arg(long)]
        price_cents: Option<i64>,

        #[arg(long)]
        baked_at: Option<DateTime<Utc>>,
    },

    /// Remove a batch
    Delete {
        #[arg(long)]
        id: i64,
    },

    /// List batches, most recently baked first
    List,
}

fn main() {
    // Logs go to stderr so stdout stays pure JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bakery_store=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("bakery v{}", bakery_store::VERSION);

    let mut builder = Config::builder()
        .db_type(&args.db_type)
        .timeouts(Timeouts::uniform(Duration::from_millis(args.timeout_ms)));
    if let Some(path) = &args.db_path {
        builder = builder.snapshot_path(path);
    }

    let bakery = match Bakery::open(builder.build()) {
        Ok(bakery) => bakery,
        Err(e) => {
            tracing::error!("failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = run(&bakery, args.command);

    if let Err(e) = bakery.shutdown() {
        tracing::error!("shutdown failed: {}", e);
    }

    match outcome {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(bakery: &Bakery, command: Commands) -> Result<String> {
    let ctx = Context::background();

    match command {
        Commands::Orders(OrderCommands::Submit { file }) => {
            let raw = std::fs::read_to_string(&file)?;
            let order: NewOrder = serde_json::from_str(&raw)?;
            to_json(&bakery.orders().submit(&ctx, order)?)
        }
        Commands::Orders(OrderCommands::List) => to_json(&bakery.orders().list(&ctx)?),

        Commands::Inventory(InventoryCommands::Add {
            name,
            category,
            count,
            price_cents,
            baked_at,
        }) => {
            let item = NewItem {
                name,
                category,
                available_count: count,
                price_cents,
                baked_at,
            };
            to_json(&bakery.inventory().add(&ctx, item)?)
        }
        Commands::Inventory(InventoryCommands::Update {
            id,
            count,
            price_cents,
            baked_at,
        }) => {
            let update = ItemUpdate {
                id,
                available_count: count,
                price_cents,
                baked_at,
            };
            bakery.inventory().update(&ctx, update)?;
            to_json(&serde_json::json!({ "updated": id }))
        }
        Commands::Inventory(InventoryCommands::Delete { id }) => {
            bakery.inventory().delete(&ctx, id)?;
            to_json(&serde_json::json!({ "deleted": id }))
        }
        Commands::Inventory(InventoryCommands::List) => to_json(&bakery.inventory().list(&ctx)?),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
