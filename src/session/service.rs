//! Caller-facing operations: submit thoughts, apply mental models and debugging
//! approaches, read statistics, export sessions, and list the catalog.
//!
//! Each operation validates its input, applies one write (if any) to the core,
//! and reads statistics back for the response's session context.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::{KeyedModel, ModelCatalog};
use crate::error::{CoreError, CoreResult};
use crate::session::types::{
    MentalModelApplication, Session, SessionExport, SessionStatistics, Thought,
};
use crate::session::SessionState;

const STATUS_SUCCESS: &str = "success";

/// A thought submission. Optional markers default to unset.
#[derive(Debug, Clone, Default)]
pub struct ThoughtRequest {
    pub session_id: String,
    pub thought: String,
    pub thought_number: u32,
    pub total_thoughts: u32,
    pub next_thought_needed: bool,
    pub is_revision: bool,
    pub revises_thought: Option<u32>,
    pub branch_from_thought: Option<u32>,
    pub branch_id: Option<String>,
    pub needs_more_thoughts: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MentalModelRequest {
    pub session_id: String,
    pub model_name: String,
    pub problem: String,
    /// Falls back to the catalog's steps when absent or empty.
    pub steps: Option<Vec<String>>,
    pub reasoning: Option<String>,
    pub conclusion: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct DebuggingRequest {
    pub session_id: String,
    pub approach_name: String,
    pub issue: String,
    pub steps: Option<Vec<String>>,
    pub findings: Option<String>,
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThoughtContext {
    pub session_id: String,
    pub total_thoughts: usize,
    pub remaining_thoughts: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThoughtResponse {
    pub status: &'static str,
    pub thought_id: String,
    pub session_context: ThoughtContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub description: String,
    pub category: String,
    pub priority: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MentalModelContext {
    pub session_id: String,
    pub total_mental_models: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MentalModelResponse {
    pub status: &'static str,
    pub model_id: String,
    pub model_info: ModelInfo,
    pub steps_used: Vec<String>,
    pub has_steps: bool,
    pub has_conclusion: bool,
    pub session_context: MentalModelContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebuggingResponse {
    pub status: &'static str,
    pub approach_id: String,
    pub has_steps: bool,
    pub has_findings: bool,
    pub has_resolution: bool,
    pub session_context: MentalModelContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelListing {
    pub status: &'static str,
    pub total_models: usize,
    pub models_by_priority: Vec<KeyedModel>,
    pub models_by_category: BTreeMap<String, Vec<KeyedModel>>,
    pub available_models: Vec<String>,
}

/// The six session operations over shared state and a model catalog.
#[derive(Clone)]
pub struct ThinkingService {
    state: Arc<SessionState>,
    catalog: Arc<dyn ModelCatalog>,
}

impl ThinkingService {
    pub fn new(state: Arc<SessionState>, catalog: Arc<dyn ModelCatalog>) -> Self {
        Self { state, catalog }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn catalog(&self) -> &dyn ModelCatalog {
        self.catalog.as_ref()
    }

    /// Store one reasoning step. Sequence numbers are not checked against
    /// insertion order or against `total_thoughts`.
    pub fn submit_thought(&self, request: ThoughtRequest) -> CoreResult<ThoughtResponse> {
        require_session_id(&request.session_id)?;
        require_non_empty("thought", &request.thought)?;
        if request.thought_number < 1 {
            return Err(CoreError::InvalidInput("thought_number must be at least 1".into()));
        }
        if request.total_thoughts < 1 {
            return Err(CoreError::InvalidInput("total_thoughts must be at least 1".into()));
        }

        let session_id = request.session_id;
        let mut thought = Thought::new(
            session_id.as_str(),
            request.thought,
            request.thought_number,
            request.total_thoughts,
            request.next_thought_needed,
        );
        thought.is_revision = request.is_revision;
        thought.revises_thought = request.revises_thought;
        thought.branch_from_thought = request.branch_from_thought;
        thought.branch_id = request.branch_id.filter(|b| !b.is_empty());
        thought.needs_more_thoughts = request.needs_more_thoughts;

        let thought_id = self.state.thoughts().append(&session_id, thought)?;
        let stats = self.state.stats(&session_id)?;

        Ok(ThoughtResponse {
            status: STATUS_SUCCESS,
            thought_id,
            session_context: ThoughtContext {
                session_id,
                total_thoughts: stats.thought_count,
                remaining_thoughts: stats.remaining_thoughts,
            },
        })
    }

    /// Record an application of a catalog model.
    pub fn apply_mental_model(&self, request: MentalModelRequest) -> CoreResult<MentalModelResponse> {
        require_session_id(&request.session_id)?;
        require_non_empty("model_name", &request.model_name)?;
        require_non_empty("problem", &request.problem)?;
        if let Some(c) = request.confidence {
            if !(0.0..=1.0).contains(&c) {
                return Err(CoreError::InvalidInput(
                    "confidence must be between 0.0 and 1.0".into(),
                ));
            }
        }

        let model = self
            .catalog
            .resolve(&request.model_name)
            .ok_or_else(|| CoreError::ModelNotFound {
                name: request.model_name.clone(),
                available: self.catalog.keys(),
            })?;

        let steps = match request.steps {
            Some(steps) if !steps.is_empty() => steps,
            _ => model.steps.clone(),
        };
        let conclusion = request.conclusion.unwrap_or_default();
        let has_conclusion = !conclusion.is_empty();

        let session_id = request.session_id;
        let mut application = MentalModelApplication::new(
            session_id.as_str(),
            request.model_name,
            request.problem,
            steps.clone(),
        );
        application.reasoning = request.reasoning.unwrap_or_default();
        application.conclusion = conclusion;
        application.confidence = request.confidence;

        let model_id = self.state.applications().append(&session_id, application)?;
        let stats = self.state.stats(&session_id)?;

        Ok(MentalModelResponse {
            status: STATUS_SUCCESS,
            model_id,
            model_info: ModelInfo {
                name: model.name,
                description: model.description,
                category: model.category,
                priority: model.priority,
            },
            has_steps: !steps.is_empty(),
            steps_used: steps,
            has_conclusion,
            session_context: MentalModelContext {
                session_id,
                total_mental_models: stats.mental_model_count,
            },
        })
    }

    /// Record a debugging approach as a `debugging_<approach>` application.
    pub fn apply_debugging_approach(&self, request: DebuggingRequest) -> CoreResult<DebuggingResponse> {
        require_session_id(&request.session_id)?;
        require_non_empty("approach_name", &request.approach_name)?;
        require_non_empty("issue", &request.issue)?;

        let steps = request.steps.unwrap_or_default();
        let findings = request.findings.unwrap_or_default();
        let resolution = request.resolution.unwrap_or_default();
        let has_steps = !steps.is_empty();

        let approach_id = self.state.applications().append_debugging(
            &request.session_id,
            &request.approach_name,
            &request.issue,
            steps,
            &findings,
            &resolution,
        )?;
        let stats = self.state.stats(&request.session_id)?;

        Ok(DebuggingResponse {
            status: STATUS_SUCCESS,
            approach_id,
            has_steps,
            has_findings: !findings.is_empty(),
            has_resolution: !resolution.is_empty(),
            session_context: MentalModelContext {
                session_id: request.session_id,
                total_mental_models: stats.mental_model_count,
            },
        })
    }

    /// Statistics for the session, creating it if unseen.
    pub fn session_stats(&self, session_id: &str) -> CoreResult<SessionStatistics> {
        require_session_id(session_id)?;
        self.state.stats(session_id)
    }

    /// Full snapshot of the session, creating it if unseen.
    pub fn export_session(&self, session_id: &str) -> CoreResult<SessionExport> {
        require_session_id(session_id)?;
        self.state.export(session_id)
    }

    /// Strict session lookup; fails with `SessionNotFound` for unseen ids.
    pub fn session(&self, session_id: &str) -> CoreResult<Session> {
        self.state.registry().get(session_id)
    }

    pub fn list_mental_models(&self) -> ModelListing {
        let models_by_priority = self.catalog.list_all();
        ModelListing {
            status: STATUS_SUCCESS,
            total_models: models_by_priority.len(),
            models_by_category: self.catalog.group_by_category(),
            available_models: self.catalog.available(),
            models_by_priority,
        }
    }
}

fn require_session_id(session_id: &str) -> CoreResult<()> {
    require_non_empty("session_id", session_id)
}

fn require_non_empty(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TieredCatalog;

    fn service(cap: usize) -> ThinkingService {
        ThinkingService::new(
            Arc::new(SessionState::new(cap)),
            Arc::new(TieredCatalog::builtin()),
        )
    }

    fn thought(session_id: &str, number: u32, total: u32) -> ThoughtRequest {
        ThoughtRequest {
            session_id: session_id.into(),
            thought: format!("step {number}"),
            thought_number: number,
            total_thoughts: total,
            next_thought_needed: number < total,
            ..Default::default()
        }
    }

    #[test]
    fn submit_thought_reports_session_context() {
        let svc = service(3);
        let response = svc.submit_thought(thought("s1", 1, 3)).unwrap();
        assert_eq!(response.status, "success");
        assert_eq!(response.session_context.total_thoughts, 1);
        assert_eq!(response.session_context.remaining_thoughts, 2);
    }

    #[test]
    fn submit_thought_validates_input() {
        let svc = service(3);
        let err = svc.submit_thought(thought("", 1, 1)).unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");

        let mut empty = thought("s1", 1, 1);
        empty.thought = "   ".into();
        assert_eq!(svc.submit_thought(empty).unwrap_err().code(), "INVALID_INPUT");

        assert_eq!(svc.submit_thought(thought("s1", 0, 1)).unwrap_err().code(), "INVALID_INPUT");
        assert!(svc.session("s1").is_err(), "rejected input must not create the session");
    }

    #[test]
    fn submit_thought_keeps_markers() {
        let svc = service(3);
        let mut request = thought("s1", 2, 3);
        request.is_revision = true;
        request.revises_thought = Some(1);
        request.branch_from_thought = Some(1);
        request.branch_id = Some("alt".into());
        request.needs_more_thoughts = true;
        let id = svc.submit_thought(request).unwrap().thought_id;

        let stored = svc.state().thoughts().get(&id).unwrap().unwrap();
        assert!(stored.is_revision);
        assert_eq!(stored.revises_thought, Some(1));
        assert_eq!(stored.branch_from_thought, Some(1));
        assert_eq!(stored.branch_id.as_deref(), Some("alt"));
        assert!(stored.needs_more_thoughts);
    }

    #[test]
    fn explicit_steps_win_over_catalog_steps() {
        let svc = service(3);
        let response = svc
            .apply_mental_model(MentalModelRequest {
                session_id: "s1".into(),
                model_name: "opportunity_cost".into(),
                problem: "rewrite or refactor".into(),
                steps: Some(vec!["list options".into()]),
                conclusion: Some("refactor".into()),
                confidence: Some(0.7),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(response.steps_used, vec!["list options"]);
        assert!(response.has_conclusion);
        assert_eq!(response.model_info.category, "decision-making");

        let stored = svc.state().applications().get(&response.model_id).unwrap().unwrap();
        assert_eq!(stored.confidence, Some(0.7));
        assert_eq!(stored.conclusion, "refactor");
    }

    #[test]
    fn confidence_out_of_range_is_rejected() {
        let svc = service(3);
        let err = svc
            .apply_mental_model(MentalModelRequest {
                session_id: "s1".into(),
                model_name: "first_principles".into(),
                problem: "X".into(),
                confidence: Some(1.5),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn debugging_approach_counts_as_mental_model() {
        let svc = service(3);
        let response = svc
            .apply_debugging_approach(DebuggingRequest {
                session_id: "s1".into(),
                approach_name: "divide_and_conquer".into(),
                issue: "timeouts under load".into(),
                findings: Some("pool exhausted".into()),
                ..Default::default()
            })
            .unwrap();
        assert!(response.has_findings);
        assert!(!response.has_resolution);
        assert!(!response.has_steps);
        assert_eq!(response.session_context.total_mental_models, 1);

        let stats = svc.session_stats("s1").unwrap();
        assert_eq!(stats.tools_used, vec!["mental-model"]);
    }

    #[test]
    fn list_mental_models_covers_catalog() {
        let listing = service(3).list_mental_models();
        assert_eq!(listing.total_models, 4);
        assert_eq!(listing.models_by_priority.len(), 4);
        assert_eq!(listing.models_by_category.len(), 4);
        assert!(listing
            .available_models
            .contains(&"first_principles: First Principles Thinking".to_string()));
    }
}
