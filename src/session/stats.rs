//! Statistics & Export Aggregator: read-only views over the three stores.
//!
//! Both reads take the thought lock, then the mental-model lock, then the
//! session lock, matching the order writers use. A concurrent append is
//! therefore seen completely or not at all.
//!
//! Both reads also create the session if it has never been seen. Callers
//! rely on first-call statistics working for a fresh session id.

use chrono::Utc;
use std::collections::BTreeMap;

use crate::error::CoreResult;
use crate::session::applications::MentalModelStore;
use crate::session::registry::SessionRegistry;
use crate::session::thoughts::ThoughtStore;
use crate::session::types::{
    ExportData, ExportMetadata, SessionExport, SessionStatistics, StoreCount, EXPORT_VERSION,
    SESSION_TYPE_HYBRID, TOOL_MENTAL_MODEL, TOOL_SEQUENTIAL_THINKING,
};

/// Compute statistics for one session. Does not bump last-access.
pub fn session_stats(
    registry: &SessionRegistry,
    thoughts: &ThoughtStore,
    applications: &MentalModelStore,
    session_id: &str,
) -> CoreResult<SessionStatistics> {
    let thought_guard = thoughts.read()?;
    let app_guard = applications.read()?;
    let session = registry.get_or_create(session_id)?;

    let thought_count = thought_guard.count_for_session(session_id);
    let mental_model_count = app_guard.count_for_session(session_id);
    drop(app_guard);
    drop(thought_guard);

    let mut tools_used = Vec::new();
    if mental_model_count > 0 {
        tools_used.push(TOOL_MENTAL_MODEL.to_string());
    }
    if thought_count > 0 {
        tools_used.push(TOOL_SEQUENTIAL_THINKING.to_string());
    }

    let mut stores = BTreeMap::new();
    stores.insert("thoughts".to_string(), StoreCount { count: thought_count });
    stores.insert("mental_models".to_string(), StoreCount { count: mental_model_count });

    Ok(SessionStatistics {
        session_id: session_id.to_string(),
        created_at: session.created_at,
        last_accessed_at: session.last_accessed_at,
        thought_count,
        mental_model_count,
        tools_used,
        total_operations: thought_count + mental_model_count,
        is_active: session.is_active,
        remaining_thoughts: session.thought_cap as i64 - thought_count as i64,
        stores,
    })
}

/// Snapshot every record the session holds into a versioned envelope.
pub fn export_session(
    registry: &SessionRegistry,
    thoughts: &ThoughtStore,
    applications: &MentalModelStore,
    session_id: &str,
) -> CoreResult<SessionExport> {
    let thought_guard = thoughts.read()?;
    let app_guard = applications.read()?;
    registry.get_or_create(session_id)?;

    let data = ExportData {
        thoughts: thought_guard.list_for_session(session_id),
        mental_models: app_guard.list_for_session(session_id),
    };
    drop(app_guard);
    drop(thought_guard);

    let now = Utc::now();
    let metadata = ExportMetadata {
        exported_at: now,
        thought_count: data.thoughts.len(),
        mental_model_count: data.mental_models.len(),
    };

    tracing::debug!(
        session_id,
        thoughts = metadata.thought_count,
        mental_models = metadata.mental_model_count,
        "exported session"
    );

    Ok(SessionExport {
        version: EXPORT_VERSION.to_string(),
        timestamp: now,
        session_id: session_id.to_string(),
        session_type: SESSION_TYPE_HYBRID.to_string(),
        data,
        metadata,
    })
}
