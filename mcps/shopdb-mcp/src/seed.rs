//! Demo data for the shop database
//!
//! Used by the `shopdb-seed` binary and by tests. The MCP server itself
//! never calls into this module.

use chrono::{Duration, Local};
use rand::seq::IndexedRandom;
use rand::Rng;
use rusqlite::{params, Connection};

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Alice", "Bob", "Charlie", "David", "Eve", "Frank", "Grace", "Hank", "Emma",
    "Liam", "Olivia", "Noah", "Ava",
];
const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];
const COUNTRIES: &[&str] = &["USA", "Thailand", "Japan", "UK", "Germany", "Singapore", "Canada"];

const ADJECTIVES: &[&str] = &[
    "Pro", "Ultra", "Max", "Lite", "Gaming", "Wireless", "Smart", "Ergonomic", "Portable",
    "Mechanical",
];
const NOUNS: &[&str] = &[
    "Mouse", "Keyboard", "Monitor", "Headset", "Laptop", "Desk", "Chair", "Webcam", "Speaker",
    "Stand",
];
const CATEGORIES: &[&str] = &["Electronics", "Furniture", "Accessories"];
const STATUSES: &[&str] = &["Pending", "Shipped", "Delivered", "Cancelled"];

/// How many rows of each kind to generate
#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub users: usize,
    pub products: usize,
    pub orders: usize,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            users: 50,
            products: 50,
            orders: 100,
        }
    }
}

/// Rows written by [`populate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub products: usize,
    pub orders: usize,
}

/// Create the shop tables if missing and clear any existing rows
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            country TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            price REAL NOT NULL,
            stock INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            product_id INTEGER,
            quantity INTEGER NOT NULL,
            total_price REAL NOT NULL,
            status TEXT NOT NULL,
            order_date DATETIME NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users (id),
            FOREIGN KEY (product_id) REFERENCES products (id)
        );

        DELETE FROM orders;
        DELETE FROM products;
        DELETE FROM users;
        "#,
    )
}

/// Fill the shop tables with random rows in a single transaction
pub fn populate<R: Rng>(
    conn: &mut Connection,
    options: &SeedOptions,
    rng: &mut R,
) -> rusqlite::Result<SeedSummary> {
    let tx = conn.transaction()?;

    let mut user_ids = Vec::with_capacity(options.users);
    {
        let mut insert =
            tx.prepare("INSERT INTO users (name, email, country) VALUES (?1, ?2, ?3)")?;
        for _ in 0..options.users {
            let first = pick(FIRST_NAMES, rng);
            let last = pick(LAST_NAMES, rng);
            // The suffix keeps emails unique once the name pool is exhausted
            let email = format!(
                "{}.{}{}@example.com",
                first.to_lowercase(),
                last.to_lowercase(),
                user_ids.len() * 1000 + rng.random_range(1..=999)
            );
            insert.execute(params![format!("{} {}", first, last), email, pick(COUNTRIES, rng)])?;
            user_ids.push(tx.last_insert_rowid());
        }
    }

    let mut products = Vec::with_capacity(options.products);
    {
        let mut insert = tx.prepare(
            "INSERT INTO products (name, category, price, stock) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for _ in 0..options.products {
            let name = format!(
                "{} {} {}",
                pick(ADJECTIVES, rng),
                pick(NOUNS, rng),
                rng.random_range(100..=900)
            );
            let price = round_cents(rng.random_range(500.0..50_000.0));
            let stock: i64 = rng.random_range(0..=100);
            insert.execute(params![name, pick(CATEGORIES, rng), price, stock])?;
            products.push((tx.last_insert_rowid(), price));
        }
    }

    let mut orders = 0;
    if !user_ids.is_empty() && !products.is_empty() {
        let mut insert = tx.prepare(
            "INSERT INTO orders (user_id, product_id, quantity, total_price, status, order_date) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        let now = Local::now();
        for _ in 0..options.orders {
            let user_id = user_ids[rng.random_range(0..user_ids.len())];
            let (product_id, unit_price) = products[rng.random_range(0..products.len())];
            let quantity: i64 = rng.random_range(1..=5);
            let order_date = (now - Duration::days(rng.random_range(0..=30)))
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
            insert.execute(params![
                user_id,
                product_id,
                quantity,
                round_cents(unit_price * quantity as f64),
                pick(STATUSES, rng),
                order_date,
            ])?;
            orders += 1;
        }
    }

    tx.commit()?;

    Ok(SeedSummary {
        users: user_ids.len(),
        products: products.len(),
        orders,
    })
}

fn pick<'a, R: Rng>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
