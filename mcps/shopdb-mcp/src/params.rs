//! Parameter definitions for shopdb-mcp tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadQueryParams {
    /// The SQL SELECT statement to execute. MUST be a read-only query (SELECT only).
    pub sql_query: String,
}
