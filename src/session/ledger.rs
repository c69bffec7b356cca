//! Backing storage for append-only records.
//!
//! [`RecordMap`] is the seam the thought and mental-model stores are built on:
//! any backing that can insert, look up by id, and list by owning session in
//! insertion order will do. [`Ledger`] is the default in-memory backing.
//! Locking is the stores' job, not the backing's.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{CoreError, CoreResult};
use crate::session::types::{MentalModelApplication, Thought};

/// A record owned by exactly one session, identified by a store-unique id.
pub trait Record: Clone + Send + Sync {
    fn id(&self) -> &str;
    fn session_id(&self) -> &str;
}

impl Record for Thought {
    fn id(&self) -> &str {
        &self.id
    }
    fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl Record for MentalModelApplication {
    fn id(&self) -> &str {
        &self.id
    }
    fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Storage contract for one record kind.
pub trait RecordMap<T: Record>: Send + Sync {
    /// Insert a record whose id is already assigned. Fails on a duplicate id.
    fn insert(&mut self, record: T) -> CoreResult<()>;

    fn contains(&self, id: &str) -> bool;

    fn get(&self, id: &str) -> Option<&T>;

    /// Records owned by `session_id`, in insertion order.
    fn list_for_session(&self, session_id: &str) -> Vec<T>;

    fn count_for_session(&self, session_id: &str) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Insertion-ordered records with an id index and a per-session index.
#[derive(Debug, Clone)]
pub struct Ledger<T: Record> {
    entries: Vec<T>,
    by_id: HashMap<String, usize>,
    by_session: HashMap<String, Vec<usize>>,
}

impl<T: Record> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            by_id: HashMap::new(),
            by_session: HashMap::new(),
        }
    }
}

impl<T: Record> RecordMap<T> for Ledger<T> {
    fn insert(&mut self, record: T) -> CoreResult<()> {
        if self.by_id.contains_key(record.id()) {
            return Err(CoreError::DuplicateId(record.id().to_string()));
        }
        let pos = self.entries.len();
        self.by_id.insert(record.id().to_string(), pos);
        self.by_session
            .entry(record.session_id().to_string())
            .or_default()
            .push(pos);
        self.entries.push(record);
        Ok(())
    }

    fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.by_id.get(id).map(|&pos| &self.entries[pos])
    }

    fn list_for_session(&self, session_id: &str) -> Vec<T> {
        self.by_session
            .get(session_id)
            .map(|positions| positions.iter().map(|&pos| self.entries[pos].clone()).collect())
            .unwrap_or_default()
    }

    fn count_for_session(&self, session_id: &str) -> usize {
        self.by_session.get(session_id).map_or(0, Vec::len)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Fresh globally unique record id (UUID v7, time-sortable).
pub fn new_record_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

pub(crate) fn read_lock<'a, T: ?Sized>(
    lock: &'a RwLock<T>,
    name: &'static str,
) -> CoreResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| CoreError::LockPoisoned(name))
}

pub(crate) fn write_lock<'a, T: ?Sized>(
    lock: &'a RwLock<T>,
    name: &'static str,
) -> CoreResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| CoreError::LockPoisoned(name))
}
