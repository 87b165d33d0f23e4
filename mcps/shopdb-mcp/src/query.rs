//! Guarded query executor
//!
//! `read_query` is the single gateway for ad-hoc SQL:
//!
//! 1. the guardrail rejects anything that does not start with `SELECT`
//!    before a connection is opened
//! 2. the unmodified text runs once on a fresh connection
//! 3. rows are shaped into JSON objects, truncated past `max_rows`
//!
//! Every outcome, including failures, is flattened into one string for the
//! calling agent. Internally the outcome stays a `Result<QueryOutput, QueryError>`.

use rusqlite::types::{Type, ValueRef};
use rusqlite::{Batch, Connection};
use serde_json::{Map, Number, Value};

use crate::guard::is_read_only_query;
use crate::store::ConnectionProvider;

/// Returned instead of `[]` when a query matches nothing
pub const NO_DATA: &str = "Result: [] (No data found matching the query)";

/// One result row, keyed by column name in statement order
pub type Row = Map<String, Value>;

/// Why a query produced no rows for the caller
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The text failed the read-only prefix check. The store was not touched.
    #[error("Error: Security Violation. Only SELECT queries are allowed via this tool.")]
    PolicyViolation,

    /// The store could not be opened or rejected the statement
    #[error("SQL Execution Error: {0}")]
    Execution(#[from] rusqlite::Error),
}

/// Shaped result of a successful query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// The statement ran and matched nothing
    Empty,
    /// The first rows in store order; `truncated` is set when more existed
    Rows { rows: Vec<Row>, truncated: bool },
}

impl QueryOutput {
    /// Caller-facing text for this output
    pub fn to_text(&self) -> serde_json::Result<String> {
        match self {
            QueryOutput::Empty => Ok(NO_DATA.to_string()),
            QueryOutput::Rows {
                rows,
                truncated: false,
            } => serde_json::to_string_pretty(rows),
            QueryOutput::Rows {
                rows,
                truncated: true,
            } => Ok(format!(
                "{}\n...(truncated to first {} rows)",
                serde_json::to_string(rows)?,
                rows.len()
            )),
        }
    }
}

/// Flatten a query outcome into the single string returned to the agent
pub fn render(result: &Result<QueryOutput, QueryError>) -> String {
    match result {
        Ok(output) => output
            .to_text()
            .unwrap_or_else(|e| format!("Serialization Error: {}", e)),
        Err(e) => e.to_string(),
    }
}

/// Runs guarded read-only queries against the shop database
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    provider: ConnectionProvider,
    max_rows: usize,
}

impl QueryExecutor {
    pub fn new(provider: ConnectionProvider, max_rows: usize) -> Self {
        Self { provider, max_rows }
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Check, run and shape `query`, keeping the outcome structured
    pub fn execute(&self, query: &str) -> Result<QueryOutput, QueryError> {
        if !is_read_only_query(query) {
            tracing::warn!("Rejected non-SELECT query: {}", query);
            return Err(QueryError::PolicyViolation);
        }

        tracing::info!("Executing Query: {}", query);

        let conn = self.provider.acquire()?;
        let output = fetch(&conn, query, self.max_rows).map_err(|e| {
            tracing::warn!("Query failed: {}", e);
            e
        })?;
        Ok(output)
    }

    /// Check, run and shape `query`, returning caller-facing text
    pub fn read_query(&self, query: &str) -> String {
        render(&self.execute(query))
    }
}

fn fetch(conn: &Connection, query: &str, max_rows: usize) -> rusqlite::Result<QueryOutput> {
    let mut batch = Batch::new(conn, query);
    let Some(mut stmt) = batch.next()? else {
        return Ok(QueryOutput::Empty);
    };
    // Only whitespace, comments or `;` may follow the statement
    if !matches!(batch.next(), Ok(None)) {
        return Err(rusqlite::Error::MultipleStatement);
    }

    let columns: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = stmt.query([])?;
    let mut kept = Vec::new();
    let mut truncated = false;

    // Drain every row so errors raised late in the scan still surface
    while let Some(row) = rows.next()? {
        if kept.len() < max_rows {
            kept.push(row_to_object(row, &columns)?);
        } else {
            truncated = true;
        }
    }

    if kept.is_empty() && !truncated {
        return Ok(QueryOutput::Empty);
    }

    Ok(QueryOutput::Rows {
        rows: kept,
        truncated,
    })
}

fn row_to_object(row: &rusqlite::Row<'_>, columns: &[String]) -> rusqlite::Result<Row> {
    let mut object = Map::with_capacity(columns.len());
    for (i, name) in columns.iter().enumerate() {
        let value = to_json(i, row.get_ref(i)?)?;
        // First column wins when a statement repeats a name
        object.entry(name.clone()).or_insert(value);
    }
    Ok(object)
}

/// Map a SQLite value to JSON, falling back to a string form
///
/// TEXT that is not valid UTF-8 is an error rather than a lossy rewrite.
fn to_json(index: usize, value: ValueRef<'_>) -> rusqlite::Result<Value> {
    let value = match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(non_finite_name(f).to_string())),
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Value::String(text.to_string()),
            Err(e) => {
                return Err(rusqlite::Error::FromSqlConversionFailure(
                    index,
                    Type::Text,
                    Box::new(e),
                ))
            }
        },
        ValueRef::Blob(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Value::String(text.to_string()),
            Err(_) => Value::String(format!("<blob {} bytes>", bytes.len())),
        },
    };
    Ok(value)
}

fn non_finite_name(f: f64) -> &'static str {
    if f.is_nan() {
        "NaN"
    } else if f.is_sign_positive() {
        "Infinity"
    } else {
        "-Infinity"
    }
}
