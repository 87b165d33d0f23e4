//! Catalog reader - table names and CREATE statements from sqlite_master

use crate::store::ConnectionProvider;

/// List table names in the store's enumeration order
pub fn list_tables(provider: &ConnectionProvider) -> rusqlite::Result<Vec<String>> {
    let conn = provider.acquire()?;
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table'")?;
    let tables = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(tables)
}

/// Every table definition, separated by a blank line
pub fn schema_text(provider: &ConnectionProvider) -> rusqlite::Result<String> {
    let conn = provider.acquire()?;
    let mut stmt =
        conn.prepare("SELECT sql FROM sqlite_master WHERE type='table' AND sql IS NOT NULL")?;
    let definitions = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(definitions.join("\n\n"))
}

/// Like [`schema_text`], but failures come back as readable text.
///
/// The output is advisory context for an agent, so a broken store should
/// not abort the caller.
pub fn get_schema(provider: &ConnectionProvider) -> String {
    match schema_text(provider) {
        Ok(schema) => schema,
        Err(e) => {
            tracing::warn!("Failed to read schema from {:?}: {}", provider.path(), e);
            format!("Error reading schema: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use rusqlite::Connection;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn provider_for(path: PathBuf) -> ConnectionProvider {
        ConnectionProvider::new(&DatabaseConfig {
            path,
            read_only: true,
            busy_timeout_secs: 1,
        })
    }

    fn create_db(sql: &str) -> (TempDir, ConnectionProvider) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.db");
        Connection::open(&path).unwrap().execute_batch(sql).unwrap();
        (dir, provider_for(path))
    }

    #[test]
    fn test_list_tables_in_creation_order() {
        let (_dir, provider) = create_db(
            "CREATE TABLE users (id INTEGER PRIMARY KEY);
             CREATE TABLE products (id INTEGER PRIMARY KEY);
             CREATE INDEX idx_products ON products(id);
             CREATE TABLE orders (id INTEGER PRIMARY KEY);",
        );

        let tables = list_tables(&provider).unwrap();
        assert_eq!(tables, vec!["users", "products", "orders"]);
    }

    #[test]
    fn test_list_tables_propagates_open_failure() {
        let dir = tempdir().unwrap();
        let provider = provider_for(dir.path().join("missing.db"));
        assert!(list_tables(&provider).is_err());
    }

    #[test]
    fn test_schema_joined_with_blank_line() {
        let (_dir, provider) = create_db(
            "CREATE TABLE a (id INTEGER);
             CREATE TABLE b (name TEXT);",
        );

        let schema = get_schema(&provider);
        assert_eq!(
            schema,
            "CREATE TABLE a (id INTEGER)\n\nCREATE TABLE b (name TEXT)"
        );
    }

    #[test]
    fn test_schema_empty_database() {
        let (_dir, provider) = create_db("PRAGMA user_version = 1;");
        assert_eq!(get_schema(&provider), "");
    }

    #[test]
    fn test_schema_error_is_text() {
        let dir = tempdir().unwrap();
        let provider = provider_for(dir.path().join("missing.db"));

        let schema = get_schema(&provider);
        assert!(schema.starts_with("Error reading schema: "));
    }
}
