//! ShopDB MCP Library
//!
//! Read-only access to a SQLite shop database for agents: table listing,
//! schema introspection and guarded SELECT execution with bounded output.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use shopdb_mcp::{ConnectionProvider, QueryExecutor, ShopDbConfig};
//!
//! let config = ShopDbConfig::with_database("shop.db".into());
//! let executor = QueryExecutor::new(ConnectionProvider::new(&config.database), 100);
//! println!("{}", executor.read_query("SELECT * FROM users LIMIT 5"));
//! ```

pub mod catalog;
pub mod config;
pub mod guard;
pub mod handlers;
pub mod params;
pub mod query;
pub mod seed;
pub mod server;
pub mod store;

// Re-export main server type
pub use server::ShopDbMcpServer;

pub use config::ShopDbConfig;
pub use params::ReadQueryParams;
pub use query::{QueryError, QueryExecutor, QueryOutput};
pub use store::ConnectionProvider;
