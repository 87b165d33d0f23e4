//! ShopDB MCP Server implementation

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, ListResourcesResult, PaginatedRequestParam, RawResource,
        ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities,
        ServerInfo,
    },
    service::{Peer, RequestContext},
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer,
};
use serde_json::json;

use crate::catalog;
use crate::config::ShopDbConfig;
use crate::handlers;
use crate::params::ReadQueryParams;
use crate::query::QueryExecutor;
use crate::store::ConnectionProvider;

/// URI of the schema resource
pub const SCHEMA_URI: &str = "sqlite://schema";

/// ShopDB MCP Server
#[derive(Clone)]
pub struct ShopDbMcpServer {
    provider: ConnectionProvider,
    executor: QueryExecutor,
    tool_router: ToolRouter<Self>,
}

impl ShopDbMcpServer {
    /// Create a server from the config file, falling back to defaults
    pub fn new() -> Self {
        Self::with_config(ShopDbConfig::load_or_default())
    }

    /// Create a server for an explicit configuration
    pub fn with_config(config: ShopDbConfig) -> Self {
        if !config.database.path.exists() {
            tracing::warn!(
                "Database {:?} does not exist yet; queries will fail until it is created",
                config.database.path
            );
        }

        let provider = ConnectionProvider::new(&config.database);
        let executor = QueryExecutor::new(provider.clone(), config.query.max_rows);

        Self {
            provider,
            executor,
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for ShopDbMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ShopDbMcpServer {
    #[tool(
        description = "List all available table names in the database. Useful for a quick overview before querying specific tables."
    )]
    async fn list_tables(&self) -> Result<CallToolResult, McpError> {
        handlers::list_tables(&self.provider).await
    }

    #[tool(
        description = "Return the full SQL schema of the database (every CREATE TABLE statement). Use this to understand table structures, column names, and relationships."
    )]
    async fn get_schema(&self) -> Result<CallToolResult, McpError> {
        handlers::get_schema(&self.provider).await
    }

    #[tool(
        description = "Execute a SELECT SQL query to retrieve data. Only read-only SELECT statements are allowed. Returns JSON rows (at most 100; larger results are truncated with a notice) or an error message."
    )]
    async fn read_query(
        &self,
        Parameters(params): Parameters<ReadQueryParams>,
        peer: Peer<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        handlers::announce_query(&peer, &params.sql_query).await;
        handlers::read_query(&self.executor, params).await
    }
}

#[tool_handler]
impl rmcp::ServerHandler for ShopDbMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mode = if self.provider.is_read_only() {
            "read-only connection"
        } else {
            "SELECT-only queries"
        };
        ServerInfo {
            instructions: Some(format!(
                "Shop database MCP server ({}). Use list_tables for an overview, \
                get_schema (or the {} resource) for table structure, and read_query \
                to run SELECT statements (results capped at {} rows).",
                mode,
                SCHEMA_URI,
                self.executor.max_rows()
            )),
            capabilities: ServerCapabilities::builder()
                .enable_logging()
                .enable_resources()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let mut schema = RawResource::new(SCHEMA_URI, "schema");
        schema.description = Some("Full SQL schema of the shop database".to_string());
        schema.mime_type = Some("text/plain".to_string());

        Ok(ListResourcesResult::with_all_items(vec![schema.no_annotation()]))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        if request.uri != SCHEMA_URI {
            return Err(McpError::resource_not_found(
                "Unknown resource",
                Some(json!({ "uri": request.uri })),
            ));
        }

        let provider = self.provider.clone();
        let schema = handlers::run_blocking(move || catalog::get_schema(&provider)).await?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(schema, SCHEMA_URI)],
        })
    }
}
