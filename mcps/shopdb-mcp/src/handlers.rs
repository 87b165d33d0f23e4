//! Handler implementations for shopdb-mcp tools
//!
//! SQLite calls block, so each handler moves its work onto the blocking pool
//! and converts the outcome to a CallToolResult.

use mcp_common::{internal_error, json_success, text_success, CallToolResult, McpResult};
use rmcp::model::{LoggingLevel, LoggingMessageNotificationParam};
use rmcp::service::Peer;
use rmcp::RoleServer;
use serde_json::json;

use crate::catalog;
use crate::guard::is_read_only_query;
use crate::params::ReadQueryParams;
use crate::query::QueryExecutor;
use crate::store::ConnectionProvider;

pub(crate) async fn run_blocking<T, F>(task: F) -> McpResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| internal_error(format!("Database task failed: {}", e)))
}

pub async fn list_tables(provider: &ConnectionProvider) -> McpResult<CallToolResult> {
    let provider = provider.clone();
    let tables = run_blocking(move || catalog::list_tables(&provider))
        .await?
        .map_err(|e| internal_error(e.to_string()))?;

    json_success(&tables)
}

pub async fn get_schema(provider: &ConnectionProvider) -> McpResult<CallToolResult> {
    let provider = provider.clone();
    let schema = run_blocking(move || catalog::get_schema(&provider)).await?;

    Ok(text_success(schema))
}

/// Log message for the client before a query that passed the guardrail
pub fn audit_notification(query: &str) -> Option<LoggingMessageNotificationParam> {
    is_read_only_query(query).then(|| LoggingMessageNotificationParam {
        level: LoggingLevel::Info,
        logger: Some("shopdb_mcp".to_string()),
        data: json!(format!("Executing Query: {}", query)),
    })
}

/// Send the audit line to the client. Delivery failures never affect the query.
pub async fn announce_query(peer: &Peer<RoleServer>, query: &str) {
    if let Some(param) = audit_notification(query) {
        if let Err(e) = peer.notify_logging_message(param).await {
            tracing::debug!("Failed to send query audit notification: {}", e);
        }
    }
}

/// Policy failures and store errors are part of the text, not MCP errors
pub async fn read_query(
    executor: &QueryExecutor,
    params: ReadQueryParams,
) -> McpResult<CallToolResult> {
    let executor = executor.clone();
    let text = run_blocking(move || executor.read_query(&params.sql_query)).await?;

    Ok(text_success(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use rmcp::model::RawContent;
    use rusqlite::Connection;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn provider_for(path: PathBuf) -> ConnectionProvider {
        ConnectionProvider::new(&DatabaseConfig {
            path,
            read_only: true,
            busy_timeout_secs: 1,
        })
    }

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_tables_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("h.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE users (id INTEGER); CREATE TABLE orders (id INTEGER);")
            .unwrap();

        let result = list_tables(&provider_for(path)).await.unwrap();
        let tables: Vec<String> = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(tables, vec!["users", "orders"]);
    }

    #[tokio::test]
    async fn test_list_tables_failure_is_mcp_error() {
        let dir = tempdir().unwrap();
        let result = list_tables(&provider_for(dir.path().join("missing.db"))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_schema_failure_is_text() {
        let dir = tempdir().unwrap();
        let result = get_schema(&provider_for(dir.path().join("missing.db")))
            .await
            .unwrap();
        assert!(text_of(&result).starts_with("Error reading schema: "));
    }

    #[test]
    fn test_audit_notification_only_for_admitted_queries() {
        assert!(audit_notification("DELETE FROM users").is_none());

        let param = audit_notification("select name from users").unwrap();
        assert!(matches!(param.level, LoggingLevel::Info));
        assert_eq!(param.logger.as_deref(), Some("shopdb_mcp"));
        assert_eq!(param.data, "Executing Query: select name from users");
    }

    #[tokio::test]
    async fn test_read_query_violation_is_success_text() {
        let dir = tempdir().unwrap();
        let executor = QueryExecutor::new(provider_for(dir.path().join("missing.db")), 100);

        let result = read_query(
            &executor,
            ReadQueryParams {
                sql_query: "DROP TABLE users".to_string(),
            },
        )
        .await
        .unwrap();

        assert!(!result.is_error.unwrap_or(false));
        assert!(text_of(&result).contains("Security Violation"));
    }
}
