//! Mental-Model Application Store.
//!
//! Debugging approaches are stored here too, as applications whose model name
//! carries the `debugging_` prefix. Unlike thoughts, applications are uncapped.

use chrono::Utc;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use crate::error::{CoreError, CoreResult};
use crate::session::ledger::{new_record_id, read_lock, write_lock, Ledger, RecordMap};
use crate::session::registry::SessionRegistry;
use crate::session::types::{MentalModelApplication, DEBUGGING_PREFIX};

const LOCK_NAME: &str = "mental_models";

pub struct MentalModelStore {
    entries: RwLock<Box<dyn RecordMap<MentalModelApplication>>>,
    registry: Arc<SessionRegistry>,
}

impl MentalModelStore {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self::with_backing(registry, Box::new(Ledger::default()))
    }

    pub fn with_backing(
        registry: Arc<SessionRegistry>,
        backing: Box<dyn RecordMap<MentalModelApplication>>,
    ) -> Self {
        Self {
            entries: RwLock::new(backing),
            registry,
        }
    }

    /// Append an application to `session_id` and return its id.
    pub fn append(
        &self,
        session_id: &str,
        mut application: MentalModelApplication,
    ) -> CoreResult<String> {
        let mut entries = write_lock(&self.entries, LOCK_NAME)?;
        let now = Utc::now();

        self.registry.update(session_id, |session| {
            if application.id.is_empty() {
                application.id = new_record_id();
            } else if entries.contains(&application.id) {
                return Err(CoreError::DuplicateId(application.id));
            }
            application.session_id = session_id.to_string();
            application.created_at = now;

            let id = application.id.clone();
            let model_name = application.model_name.clone();
            let debugging = application.is_debugging();
            entries.insert(application)?;

            session.total_operations += 1;
            session.touch(now);

            tracing::debug!(
                session_id,
                application_id = %id,
                model_name = %model_name,
                debugging,
                "added mental model application"
            );
            Ok(id)
        })
    }

    /// Package a debugging approach as a `debugging_<approach>` application.
    pub fn append_debugging(
        &self,
        session_id: &str,
        approach_name: &str,
        issue: &str,
        steps: Vec<String>,
        findings: &str,
        resolution: &str,
    ) -> CoreResult<String> {
        let mut application = MentalModelApplication::new(
            session_id,
            format!("{DEBUGGING_PREFIX}{approach_name}"),
            issue,
            steps,
        );
        application.reasoning = findings.to_string();
        application.conclusion = resolution.to_string();
        self.append(session_id, application)
    }

    /// Applications owned by `session_id`, in submission order.
    pub fn list_for_session(&self, session_id: &str) -> CoreResult<Vec<MentalModelApplication>> {
        Ok(read_lock(&self.entries, LOCK_NAME)?.list_for_session(session_id))
    }

    pub fn get(&self, id: &str) -> CoreResult<Option<MentalModelApplication>> {
        Ok(read_lock(&self.entries, LOCK_NAME)?.get(id).cloned())
    }

    pub(crate) fn read(
        &self,
    ) -> CoreResult<RwLockReadGuard<'_, Box<dyn RecordMap<MentalModelApplication>>>> {
        read_lock(&self.entries, LOCK_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (Arc<SessionRegistry>, MentalModelStore) {
        let registry = Arc::new(SessionRegistry::new(1));
        let store = MentalModelStore::new(Arc::clone(&registry));
        (registry, store)
    }

    #[test]
    fn append_updates_operations_but_not_thought_count() {
        let (registry, store) = store();
        let app = MentalModelApplication::new("s1", "first_principles", "X", vec!["a".into()]);
        let id = store.append("s1", app).unwrap();

        let stored = store.get(&id).unwrap().unwrap();
        assert_eq!(stored.model_name, "first_principles");
        assert_eq!(stored.steps, vec!["a"]);

        let session = registry.get("s1").unwrap();
        assert_eq!(session.thought_count, 0);
        assert_eq!(session.total_operations, 1);
    }

    #[test]
    fn applications_are_not_capped() {
        let (_, store) = store();
        for i in 0..5 {
            let app = MentalModelApplication::new("s1", "systems_thinking", format!("p{i}"), vec![]);
            store.append("s1", app).unwrap();
        }
        assert_eq!(store.list_for_session("s1").unwrap().len(), 5);
    }

    #[test]
    fn debugging_approach_is_a_tagged_application() {
        let (_, store) = store();
        let id = store
            .append_debugging(
                "s1",
                "binary_search",
                "build broke after merge",
                vec!["bisect commits".into()],
                "commit abc introduced it",
                "",
            )
            .unwrap();

        let stored = store.get(&id).unwrap().unwrap();
        assert_eq!(stored.model_name, "debugging_binary_search");
        assert!(stored.is_debugging());
        assert_eq!(stored.problem, "build broke after merge");
        assert_eq!(stored.reasoning, "commit abc introduced it");
        assert_eq!(stored.conclusion, "");
    }
}
