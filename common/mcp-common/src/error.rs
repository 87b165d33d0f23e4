//! Error helpers for MCP tool handlers

use rmcp::ErrorData as McpError;

/// Type alias for MCP tool results
pub type McpResult<T> = Result<T, McpError>;

/// Create an internal error with a message
///
/// Use for failures the caller cannot fix by changing its arguments,
/// such as an unreachable database.
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error() {
        let err = internal_error("unable to open database file");
        assert!(err.message.contains("unable to open database file"));
        assert_eq!(err.code.0, -32603);
    }

    #[test]
    fn test_mcp_result_alias() {
        let result: McpResult<u8> = Err(internal_error("boom"));
        assert!(result.is_err());
    }
}
