//! Parameters shared by the `session_stats` and `session_export` MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identifies the session to read. Unknown ids are created on first read.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SessionParams {
    #[schemars(description = "Session identifier")]
    pub session_id: String,
}
