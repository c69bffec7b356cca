#![allow(dead_code)]

use std::sync::Arc;

use thinkwell::catalog::TieredCatalog;
use thinkwell::session::service::{MentalModelRequest, ThinkingService, ThoughtRequest};
use thinkwell::session::SessionState;

/// Fresh service with the built-in catalog and the given per-session thought cap.
pub fn test_service(thought_cap: usize) -> ThinkingService {
    ThinkingService::new(
        Arc::new(SessionState::new(thought_cap)),
        Arc::new(TieredCatalog::builtin()),
    )
}

/// A plain thought submission for `session_id`.
pub fn thought(session_id: &str, number: u32, total: u32) -> ThoughtRequest {
    ThoughtRequest {
        session_id: session_id.to_string(),
        thought: format!("thought #{number} of {total}"),
        thought_number: number,
        total_thoughts: total,
        next_thought_needed: number < total,
        ..Default::default()
    }
}

/// A mental-model submission using the catalog's default steps.
pub fn model(session_id: &str, model_name: &str, problem: &str) -> MentalModelRequest {
    MentalModelRequest {
        session_id: session_id.to_string(),
        model_name: model_name.to_string(),
        problem: problem.to_string(),
        ..Default::default()
    }
}
