//! ShopDB MCP Server
//!
//! Exposes a SQLite shop database to agents over stdio.
//! Only SELECT statements are executed; results are capped at 100 rows.

use shopdb_mcp::ShopDbMcpServer;

mcp_common::serve_stdio!(ShopDbMcpServer, "shopdb_mcp");
