pub mod debugging_approach;
pub mod mental_model;
pub mod sequential_thinking;
pub mod session;

use debugging_approach::DebuggingApproachParams;
use mental_model::MentalModelParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use sequential_thinking::SequentialThinkingParams;
use serde::Serialize;
use session::SessionParams;

use thinkwell::error::CoreError;
use thinkwell::session::service::ThinkingService;

/// The Thinkwell MCP tool handler. Wraps the shared [`ThinkingService`] and
/// exposes every operation via the `#[tool_router]` macro.
///
/// Tool failures come back as error results whose text is the JSON object
/// `{"isError": true, "code": ..., "message": ..., "details": ...}`.
#[derive(Clone)]
pub struct ThinkTools {
    tool_router: ToolRouter<Self>,
    service: ThinkingService,
}

#[tool_router]
impl ThinkTools {
    pub fn new(service: ThinkingService) -> Self {
        Self {
            tool_router: Self::tool_router(),
            service,
        }
    }

    /// Record one step of a sequential reasoning chain.
    #[tool(description = "Perform sequential thinking with structured thought progression. Supports revisions (is_revision, revises_thought) and branches (branch_from_thought, branch_id).")]
    async fn sequential_thinking(
        &self,
        Parameters(params): Parameters<SequentialThinkingParams>,
    ) -> Result<String, String> {
        tracing::info!(
            session_id = %params.session_id,
            thought_number = params.thought_number,
            total_thoughts = params.total_thoughts,
            "sequential_thinking called"
        );

        let response = self
            .service
            .submit_thought(params.into())
            .map_err(|e| tool_error("sequential_thinking", e))?;

        tracing::info!(thought_id = %response.thought_id, "thought stored");
        to_json(&response)
    }

    /// Apply a catalog mental model to a problem.
    #[tool(description = "Apply a mental model to a problem using a structured thinking framework. Omit steps to use the model's own steps.")]
    async fn mental_model(
        &self,
        Parameters(params): Parameters<MentalModelParams>,
    ) -> Result<String, String> {
        tracing::info!(
            session_id = %params.session_id,
            model_name = %params.model_name,
            "mental_model called"
        );

        let response = self
            .service
            .apply_mental_model(params.into())
            .map_err(|e| tool_error("mental_model", e))?;
        to_json(&response)
    }

    /// Record a systematic debugging approach.
    #[tool(description = "Apply a systematic debugging approach to identify and resolve an issue.")]
    async fn debugging_approach(
        &self,
        Parameters(params): Parameters<DebuggingApproachParams>,
    ) -> Result<String, String> {
        tracing::info!(
            session_id = %params.session_id,
            approach_name = %params.approach_name,
            "debugging_approach called"
        );

        let response = self
            .service
            .apply_debugging_approach(params.into())
            .map_err(|e| tool_error("debugging_approach", e))?;
        to_json(&response)
    }

    /// List the mental-model catalog.
    #[tool(description = "List all available mental models, by priority and by category.")]
    async fn list_mental_models(&self) -> Result<String, String> {
        tracing::info!("list_mental_models called");
        to_json(&self.service.list_mental_models())
    }

    /// Session statistics.
    #[tool(description = "Get statistics for a session: thought count, tools used, total operations, remaining thoughts.")]
    async fn session_stats(
        &self,
        Parameters(params): Parameters<SessionParams>,
    ) -> Result<String, String> {
        tracing::info!(session_id = %params.session_id, "session_stats called");
        let stats = self
            .service
            .session_stats(&params.session_id)
            .map_err(|e| tool_error("session_stats", e))?;
        to_json(&stats)
    }

    /// Session export.
    #[tool(description = "Export every thought and mental-model application recorded for a session.")]
    async fn session_export(
        &self,
        Parameters(params): Parameters<SessionParams>,
    ) -> Result<String, String> {
        tracing::info!(session_id = %params.session_id, "session_export called");
        let export = self
            .service
            .export_session(&params.session_id)
            .map_err(|e| tool_error("session_export", e))?;
        to_json(&export)
    }
}

fn tool_error(tool: &str, err: CoreError) -> String {
    tracing::warn!(tool, code = err.code(), error = %err, "tool call failed");
    err.to_payload().to_string()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("serialization failed: {e}"))
}

#[tool_handler]
impl ServerHandler for ThinkTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(format!(
                "Thinkwell records structured reasoning per session. Use sequential_thinking \
                 for step-by-step thoughts (up to {} per session), mental_model or \
                 debugging_approach for framework applications, and session_stats / \
                 session_export to review a session.",
                self.service.state().registry().thought_cap()
            )),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
