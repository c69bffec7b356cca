//! Core record definitions.
//!
//! [`Session`] is the per-session ledger entry, [`Thought`] and
//! [`MentalModelApplication`] are the two append-only record kinds, and
//! [`SessionStatistics`] / [`SessionExport`] are the read-side views built by
//! the aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tool label reported in `tools_used` once a session holds a thought.
pub const TOOL_SEQUENTIAL_THINKING: &str = "sequential-thinking";
/// Tool label reported in `tools_used` once a session holds a mental-model application.
pub const TOOL_MENTAL_MODEL: &str = "mental-model";

/// Export envelope format version.
pub const EXPORT_VERSION: &str = "1.0.0";
/// Sessions may mix thoughts and mental-model applications.
pub const SESSION_TYPE_HYBRID: &str = "hybrid";

/// Prefix for the model name of a debugging-approach application.
pub const DEBUGGING_PREFIX: &str = "debugging_";

/// Per-session metadata held by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque caller-supplied identifier.
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Never moves backwards.
    pub last_accessed_at: DateTime<Utc>,
    /// Never exceeds `thought_cap`.
    pub thought_count: usize,
    /// Thoughts plus mental-model applications appended to this session.
    pub total_operations: usize,
    /// Cleared by the idle reaper, set again by the next write.
    pub is_active: bool,
    /// Copied from configuration when the session is created.
    pub thought_cap: usize,
}

impl Session {
    pub fn new(id: impl Into<String>, thought_cap: usize, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at: now,
            last_accessed_at: now,
            thought_count: 0,
            total_operations: 0,
            is_active: true,
            thought_cap,
        }
    }

    /// Advance `last_accessed_at` without ever moving it backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_accessed_at {
            self.last_accessed_at = now;
        }
        self.is_active = true;
    }

    pub fn at_cap(&self) -> bool {
        self.thought_count >= self.thought_cap
    }
}

/// A single step in a sequential reasoning chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    /// Assigned by the store when empty.
    pub id: String,
    pub session_id: String,
    pub thought: String,
    /// Caller-declared 1-based position. Advisory only, never validated.
    pub thought_number: u32,
    pub total_thoughts: u32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_revision: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revises_thought: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_from_thought: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub needs_more_thoughts: bool,
    pub next_thought_needed: bool,
    pub created_at: DateTime<Utc>,
}

impl Thought {
    /// A fresh, unstored thought. Id and timestamp are stamped on append.
    pub fn new(
        session_id: impl Into<String>,
        thought: impl Into<String>,
        thought_number: u32,
        total_thoughts: u32,
        next_thought_needed: bool,
    ) -> Self {
        Self {
            id: String::new(),
            session_id: session_id.into(),
            thought: thought.into(),
            thought_number,
            total_thoughts,
            is_revision: false,
            revises_thought: None,
            branch_from_thought: None,
            branch_id: None,
            needs_more_thoughts: false,
            next_thought_needed,
            created_at: Utc::now(),
        }
    }
}

/// One use of a mental model (or debugging approach) against a problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentalModelApplication {
    pub id: String,
    pub session_id: String,
    /// Catalog key, or `debugging_<approach>` for debugging applications.
    pub model_name: String,
    pub problem: String,
    pub steps: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub conclusion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl MentalModelApplication {
    pub fn new(
        session_id: impl Into<String>,
        model_name: impl Into<String>,
        problem: impl Into<String>,
        steps: Vec<String>,
    ) -> Self {
        Self {
            id: String::new(),
            session_id: session_id.into(),
            model_name: model_name.into(),
            problem: problem.into(),
            steps,
            reasoning: String::new(),
            conclusion: String::new(),
            confidence: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_debugging(&self) -> bool {
        self.model_name.starts_with(DEBUGGING_PREFIX)
    }
}

/// Count of records in one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCount {
    pub count: usize,
}

/// Point-in-time statistics for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub thought_count: usize,
    pub mental_model_count: usize,
    /// Sorted, so repeated reads compare equal.
    pub tools_used: Vec<String>,
    pub total_operations: usize,
    pub is_active: bool,
    /// `cap - thought_count`.
    pub remaining_thoughts: i64,
    /// Keys: `thoughts`, `mental_models`.
    pub stores: BTreeMap<String, StoreCount>,
}

/// Records carried by a session export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportData {
    pub thoughts: Vec<Thought>,
    pub mental_models: Vec<MentalModelApplication>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub exported_at: DateTime<Utc>,
    pub thought_count: usize,
    pub mental_model_count: usize,
}

/// Versioned snapshot of everything a session holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExport {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub session_type: String,
    pub data: ExportData,
    pub metadata: ExportMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn touch_never_moves_backwards() {
        let now = Utc::now();
        let mut session = Session::new("s1", 10, now);
        session.touch(now - Duration::seconds(30));
        assert_eq!(session.last_accessed_at, now);
        session.touch(now + Duration::seconds(5));
        assert_eq!(session.last_accessed_at, now + Duration::seconds(5));
    }

    #[test]
    fn touch_reactivates_idle_session() {
        let now = Utc::now();
        let mut session = Session::new("s1", 10, now);
        session.is_active = false;
        session.touch(now);
        assert!(session.is_active);
    }

    #[test]
    fn thought_omits_unset_markers_when_serialized() {
        let thought = Thought::new("s1", "first step", 1, 3, true);
        let json = serde_json::to_value(&thought).unwrap();
        assert!(json.get("is_revision").is_none());
        assert!(json.get("revises_thought").is_none());
        assert!(json.get("branch_id").is_none());
        assert_eq!(json["next_thought_needed"], true);
    }

    #[test]
    fn debugging_applications_are_tagged() {
        let app = MentalModelApplication::new("s1", "debugging_binary_search", "flaky test", vec![]);
        assert!(app.is_debugging());
        let app = MentalModelApplication::new("s1", "first_principles", "X", vec![]);
        assert!(!app.is_debugging());
    }
}
