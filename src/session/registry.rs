//! Session Registry: lifecycle ledger for per-session metadata.
//!
//! Sessions are created lazily on first reference and live for the whole
//! process. The only lifecycle transition besides creation is the idle flag
//! flipped by [`SessionRegistry::mark_idle`].

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::session::ledger::{read_lock, write_lock};
use crate::session::types::Session;

const LOCK_NAME: &str = "sessions";

#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Session>>,
    thought_cap: usize,
}

impl SessionRegistry {
    /// `thought_cap` is copied into every session this registry creates.
    pub fn new(thought_cap: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            thought_cap,
        }
    }

    pub fn thought_cap(&self) -> usize {
        self.thought_cap
    }

    /// Return the session, creating it with zero counters if it does not exist.
    /// An existing session is returned as-is; its last-access time is not bumped.
    pub fn get_or_create(&self, session_id: &str) -> CoreResult<Session> {
        self.update(session_id, |session| Ok(session.clone()))
    }

    /// Strict lookup.
    pub fn get(&self, session_id: &str) -> CoreResult<Session> {
        read_lock(&self.sessions, LOCK_NAME)?
            .get(session_id)
            .cloned()
            .ok_or_else(|| CoreError::SessionNotFound(session_id.to_string()))
    }

    /// Bump last-access, creating the session if absent.
    pub fn touch(&self, session_id: &str) -> CoreResult<()> {
        let now = Utc::now();
        self.update(session_id, |session| {
            session.touch(now);
            Ok(())
        })
    }

    /// Run `f` against the session under the write lock, creating it first if needed.
    ///
    /// Stores call this while already holding their own entity lock, so the
    /// lock order is always entity map, then sessions.
    pub(crate) fn update<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut Session) -> CoreResult<R>,
    ) -> CoreResult<R> {
        let mut sessions = write_lock(&self.sessions, LOCK_NAME)?;
        let session = sessions.entry(session_id.to_string()).or_insert_with(|| {
            tracing::debug!(session_id, "created session");
            Session::new(session_id, self.thought_cap, Utc::now())
        });
        f(session)
    }

    /// Flag sessions whose last access is older than `timeout` as inactive.
    /// Returns how many sessions were newly flagged.
    pub fn mark_idle(&self, timeout: Duration, now: DateTime<Utc>) -> CoreResult<usize> {
        let mut sessions = write_lock(&self.sessions, LOCK_NAME)?;
        let mut flagged = 0;
        for session in sessions.values_mut() {
            if session.is_active && now - session.last_accessed_at > timeout {
                session.is_active = false;
                flagged += 1;
            }
        }
        Ok(flagged)
    }

    pub fn len(&self) -> CoreResult<usize> {
        Ok(read_lock(&self.sessions, LOCK_NAME)?.len())
    }

    pub fn is_empty(&self) -> CoreResult<bool> {
        Ok(self.len()? == 0)
    }
}
