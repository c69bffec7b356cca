//! Thought Store: append-only sequential-thinking steps with a per-session cap.

use chrono::Utc;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use crate::error::{CoreError, CoreResult};
use crate::session::ledger::{new_record_id, read_lock, write_lock, Ledger, RecordMap};
use crate::session::registry::SessionRegistry;
use crate::session::types::Thought;

const LOCK_NAME: &str = "thoughts";

pub struct ThoughtStore {
    entries: RwLock<Box<dyn RecordMap<Thought>>>,
    registry: Arc<SessionRegistry>,
}

impl ThoughtStore {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self::with_backing(registry, Box::new(Ledger::default()))
    }

    pub fn with_backing(registry: Arc<SessionRegistry>, backing: Box<dyn RecordMap<Thought>>) -> Self {
        Self {
            entries: RwLock::new(backing),
            registry,
        }
    }

    /// Append a thought to `session_id` and return its id.
    ///
    /// The insert and the session counter update happen under the thought
    /// lock and the session lock together, so statistics never see one
    /// without the other. `thought_number` is stored as given.
    pub fn append(&self, session_id: &str, mut thought: Thought) -> CoreResult<String> {
        let mut entries = write_lock(&self.entries, LOCK_NAME)?;
        let now = Utc::now();

        self.registry.update(session_id, |session| {
            if session.at_cap() {
                return Err(CoreError::ThoughtLimitExceeded {
                    session_id: session_id.to_string(),
                    limit: session.thought_cap,
                });
            }

            if thought.id.is_empty() {
                thought.id = new_record_id();
            } else if entries.contains(&thought.id) {
                return Err(CoreError::DuplicateId(thought.id));
            }
            thought.session_id = session_id.to_string();
            thought.created_at = now;

            let id = thought.id.clone();
            let number = thought.thought_number;
            entries.insert(thought)?;

            session.thought_count += 1;
            session.total_operations += 1;
            session.touch(now);

            tracing::debug!(
                session_id,
                thought_id = %id,
                thought_number = number,
                "added thought"
            );
            Ok(id)
        })
    }

    /// Thoughts owned by `session_id`, in submission order.
    pub fn list_for_session(&self, session_id: &str) -> CoreResult<Vec<Thought>> {
        Ok(read_lock(&self.entries, LOCK_NAME)?.list_for_session(session_id))
    }

    pub fn get(&self, id: &str) -> CoreResult<Option<Thought>> {
        Ok(read_lock(&self.entries, LOCK_NAME)?.get(id).cloned())
    }

    /// Shared read access for the aggregator, taken before the session lock.
    pub(crate) fn read(&self) -> CoreResult<RwLockReadGuard<'_, Box<dyn RecordMap<Thought>>>> {
        read_lock(&self.entries, LOCK_NAME)
    }
}
