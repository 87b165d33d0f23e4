//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: [`init_tracing`] and the `serve_stdio!` macro
//! - **Results**: [`json_success`] / [`text_success`] for `CallToolResult`s
//! - **Errors**: [`internal_error`] and the [`McpResult`] alias
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{serve_stdio, json_success};
//!
//! // In main.rs
//! serve_stdio!(MyServer, "my_mcp");
//!
//! // In a tool
//! async fn my_tool(&self) -> McpResult<CallToolResult> {
//!     json_success(&load_rows()?)
//! }
//! ```

pub mod error;
pub mod init;
pub mod result;

pub use error::{internal_error, McpResult};
pub use init::{init_tracing, LogFormat};
pub use result::{json_success, text_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
