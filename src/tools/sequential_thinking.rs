//! MCP `sequential_thinking` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use thinkwell::session::service::ThoughtRequest;

/// Parameters for the `sequential_thinking` MCP tool.
///
/// `thought_number` is advisory: numbers may repeat, skip, or exceed
/// `total_thoughts`.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SequentialThinkingParams {
    #[schemars(description = "Session identifier")]
    pub session_id: String,

    #[schemars(description = "Current thought content")]
    pub thought: String,

    #[schemars(description = "Current thought number in sequence (1-based)")]
    pub thought_number: u32,

    #[schemars(description = "Total number of thoughts planned")]
    pub total_thoughts: u32,

    #[schemars(description = "Whether another thought is needed")]
    pub next_thought_needed: bool,

    #[schemars(description = "Whether this thought revises an earlier one")]
    pub is_revision: Option<bool>,

    #[schemars(description = "Number of the thought being revised")]
    pub revises_thought: Option<u32>,

    #[schemars(description = "Number of the thought this branch starts from")]
    pub branch_from_thought: Option<u32>,

    #[schemars(description = "Label for the current branch")]
    pub branch_id: Option<String>,

    #[schemars(description = "Whether more thoughts are needed than originally planned")]
    pub needs_more_thoughts: Option<bool>,
}

impl From<SequentialThinkingParams> for ThoughtRequest {
    fn from(p: SequentialThinkingParams) -> Self {
        Self {
            session_id: p.session_id,
            thought: p.thought,
            thought_number: p.thought_number,
            total_thoughts: p.total_thoughts,
            next_thought_needed: p.next_thought_needed,
            is_revision: p.is_revision.unwrap_or(false),
            revises_thought: p.revises_thought,
            branch_from_thought: p.branch_from_thought,
            branch_id: p.branch_id,
            needs_more_thoughts: p.needs_more_thoughts.unwrap_or(false),
        }
    }
}
