//! Session/storage core.
//!
//! [`SessionState`] owns the three stores. Locks are always taken in the order
//! thoughts, mental models, sessions; no code path takes them in reverse.
//! [`service::ThinkingService`] layers the caller-facing operations on top.

pub mod applications;
pub mod ledger;
pub mod registry;
pub mod service;
pub mod stats;
pub mod thoughts;
pub mod types;

use std::sync::Arc;

use crate::error::CoreResult;
use applications::MentalModelStore;
use registry::SessionRegistry;
use thoughts::ThoughtStore;
use types::{SessionExport, SessionStatistics};

/// All in-memory session state for the lifetime of the process.
pub struct SessionState {
    registry: Arc<SessionRegistry>,
    thoughts: ThoughtStore,
    applications: MentalModelStore,
}

impl SessionState {
    /// Empty state whose sessions are created with `thought_cap`.
    pub fn new(thought_cap: usize) -> Self {
        let registry = Arc::new(SessionRegistry::new(thought_cap));
        Self {
            thoughts: ThoughtStore::new(Arc::clone(&registry)),
            applications: MentalModelStore::new(Arc::clone(&registry)),
            registry,
        }
    }

    /// Assemble state from stores that share `registry`.
    pub fn from_parts(
        registry: Arc<SessionRegistry>,
        thoughts: ThoughtStore,
        applications: MentalModelStore,
    ) -> Self {
        Self {
            registry,
            thoughts,
            applications,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn thoughts(&self) -> &ThoughtStore {
        &self.thoughts
    }

    pub fn applications(&self) -> &MentalModelStore {
        &self.applications
    }

    pub fn stats(&self, session_id: &str) -> CoreResult<SessionStatistics> {
        stats::session_stats(&self.registry, &self.thoughts, &self.applications, session_id)
    }

    pub fn export(&self, session_id: &str) -> CoreResult<SessionExport> {
        stats::export_session(&self.registry, &self.thoughts, &self.applications, session_id)
    }
}
