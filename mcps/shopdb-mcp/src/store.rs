//! Per-call SQLite connection acquisition
//!
//! Every operation opens its own connection and drops it on return, so no
//! handle is shared between concurrent tool calls.

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::DatabaseConfig;

/// Opens connections to the shop database on demand
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    path: PathBuf,
    read_only: bool,
    busy_timeout: Duration,
}

impl ConnectionProvider {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            path: config.path.clone(),
            read_only: config.read_only,
            busy_timeout: Duration::from_secs(config.busy_timeout_secs),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Open a fresh connection. It is closed when the returned value drops.
    pub fn acquire(&self) -> rusqlite::Result<Connection> {
        let flags = if self.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::default()
        };

        let conn = Connection::open_with_flags(&self.path, flags)?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }
}
