//! Creates the demo shop database used by shopdb-mcp
//!
//! Offline utility. Existing rows in users/products/orders are replaced.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;
use std::path::PathBuf;

use shopdb_mcp::seed::{self, SeedOptions};

#[derive(Parser, Debug)]
#[command(name = "shopdb-seed", about = "Create and populate the demo shop database")]
struct Args {
    /// SQLite file to create or overwrite
    #[arg(long, env = "SHOPDB_PATH", default_value = "shop.db")]
    db: PathBuf,

    /// Number of users to insert
    #[arg(long, default_value_t = 50)]
    users: usize,

    /// Number of products to insert
    #[arg(long, default_value_t = 50)]
    products: usize,

    /// Number of orders to insert
    #[arg(long, default_value_t = 100)]
    orders: usize,

    /// RNG seed for reproducible data
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    mcp_common::init_tracing("shopdb_seed")?;

    let args = Args::parse();

    let mut conn = Connection::open(&args.db)
        .with_context(|| format!("Failed to open database at {:?}", args.db))?;

    tracing::info!("Creating tables in {:?}", args.db);
    seed::create_schema(&conn).context("Failed to create schema")?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let options = SeedOptions {
        users: args.users,
        products: args.products,
        orders: args.orders,
    };

    let summary = seed::populate(&mut conn, &options, &mut rng).context("Failed to seed data")?;

    tracing::info!(
        users = summary.users,
        products = summary.products,
        orders = summary.orders,
        "Database created successfully"
    );

    Ok(())
}
