//! MCP `debugging_approach` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use thinkwell::session::service::DebuggingRequest;

/// Parameters for the `debugging_approach` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DebuggingApproachParams {
    #[schemars(description = "Session identifier")]
    pub session_id: String,

    #[schemars(
        description = "Name of the debugging approach (e.g. 'binary_search', 'divide_and_conquer', 'backtracking')"
    )]
    pub approach_name: String,

    #[schemars(description = "Issue description to debug")]
    pub issue: String,

    #[schemars(description = "Debugging steps followed")]
    pub steps: Option<Vec<String>>,

    #[schemars(description = "What the investigation found")]
    pub findings: Option<String>,

    #[schemars(description = "How the issue was resolved")]
    pub resolution: Option<String>,
}

impl From<DebuggingApproachParams> for DebuggingRequest {
    fn from(p: DebuggingApproachParams) -> Self {
        Self {
            session_id: p.session_id,
            approach_name: p.approach_name,
            issue: p.issue,
            steps: p.steps,
            findings: p.findings,
            resolution: p.resolution,
        }
    }
}
