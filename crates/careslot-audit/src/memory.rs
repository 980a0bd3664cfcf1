//! In-memory activity trail.
//!
//! All entries live in a `Vec` behind a `Mutex`, so the trail can be shared
//! between the session manager and the booking desk through an `Arc`.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info};

use careslot_contracts::{
    activity::{ActionKind, ActivityRecord},
    error::{CareError, CareResult},
};
use careslot_core::traits::AuditWriter;

use crate::{
    chain::{entry_hash, verify_chain},
    event::{SessionSeal, TrailEntry, TrailExport},
};

pub(crate) struct TrailState {
    pub(crate) entries: Vec<TrailEntry>,
    pub(crate) seals: Vec<SessionSeal>,
    pub(crate) last_hash: String,
}

/// An append-only activity trail backed by a SHA-256 hash chain.
pub struct InMemoryActivityTrail {
    trail_id: String,
    pub(crate) state: Arc<Mutex<TrailState>>,
}

impl InMemoryActivityTrail {
    pub fn new(trail_id: impl Into<String>) -> Self {
        Self {
            trail_id: trail_id.into(),
            state: Arc::new(Mutex::new(TrailState {
                entries: Vec::new(),
                seals: Vec::new(),
                last_hash: TrailEntry::GENESIS_HASH.to_string(),
            })),
        }
    }

    pub fn trail_id(&self) -> &str {
        &self.trail_id
    }

    fn lock(&self) -> CareResult<MutexGuard<'_, TrailState>> {
        self.state.lock().map_err(|e| CareError::AuditWriteFailed {
            reason: format!("activity trail lock poisoned: {}", e),
        })
    }

    pub fn len(&self) -> CareResult<usize> {
        Ok(self.lock()?.entries.len())
    }

    pub fn is_empty(&self) -> CareResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Every record, oldest first.
    pub fn records(&self) -> CareResult<Vec<ActivityRecord>> {
        Ok(self.lock()?.entries.iter().map(|e| e.record.clone()).collect())
    }

    /// The `limit` most recent records, newest first.
    pub fn recent(&self, limit: usize) -> CareResult<Vec<ActivityRecord>> {
        Ok(self
            .lock()?
            .entries
            .iter()
            .rev()
            .take(limit)
            .map(|e| e.record.clone())
            .collect())
    }

    /// Records for one actor id, oldest first.
    pub fn by_actor(&self, actor: &str) -> CareResult<Vec<ActivityRecord>> {
        Ok(self
            .lock()?
            .entries
            .iter()
            .filter(|e| e.record.actor == actor)
            .map(|e| e.record.clone())
            .collect())
    }

    pub fn count(&self, action: ActionKind) -> CareResult<usize> {
        Ok(self.lock()?.entries.iter().filter(|e| e.record.action == action).count())
    }

    pub fn seals(&self) -> CareResult<Vec<SessionSeal>> {
        Ok(self.lock()?.seals.clone())
    }

    pub fn export(&self) -> CareResult<TrailExport> {
        let state = self.lock()?;
        Ok(TrailExport {
            trail_id: self.trail_id.clone(),
            entries: state.entries.clone(),
            seals: state.seals.clone(),
            exported_at: Utc::now(),
            terminal_hash: state.entries.last().map(|e| e.this_hash.clone()).unwrap_or_default(),
        })
    }

    /// False if any stored entry has been altered. A poisoned lock counts
    /// as a broken trail.
    pub fn verify_integrity(&self) -> bool {
        match self.lock() {
            Ok(state) => verify_chain(&state.entries),
            Err(_) => false,
        }
    }
}

impl AuditWriter for InMemoryActivityTrail {
    fn write(&self, record: &ActivityRecord) -> CareResult<()> {
        let mut state = self.lock()?;

        let sequence = state.entries.len() as u64;
        let prev_hash = state.last_hash.clone();
        let this_hash = entry_hash(&self.trail_id, sequence, record, &prev_hash)?;

        debug!(
            sequence,
            action = %record.action,
            actor = %record.actor,
            "activity recorded"
        );

        state.entries.push(TrailEntry {
            sequence,
            trail_id: self.trail_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;

        Ok(())
    }

    fn finalize(&self, session_id: &str) -> CareResult<()> {
        let mut state = self.lock()?;

        let seal = SessionSeal {
            session_id: session_id.to_string(),
            entry_count: state.entries.len(),
            head_hash: state.last_hash.clone(),
            sealed_at: Utc::now(),
        };
        info!(
            session_id = %session_id,
            entry_count = seal.entry_count,
            head_hash = %seal.head_hash,
            "session trail sealed"
        );
        state.seals.push(seal);

        Ok(())
    }
}
