//! Trail entry and export types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use careslot_contracts::activity::ActivityRecord;

/// One link of the hash chain.
///
/// Changing any field, the embedded record included, invalidates
/// `this_hash` and every later `prev_hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailEntry {
    /// Position in the chain, starting at 0.
    pub sequence: u64,
    pub trail_id: String,
    pub record: ActivityRecord,
    /// `this_hash` of the previous entry, or `GENESIS_HASH`.
    pub prev_hash: String,
    pub this_hash: String,
}

impl TrailEntry {
    /// `prev_hash` of the first entry: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// Written when a session ends: how far the chain had grown and its head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSeal {
    pub session_id: String,
    /// Number of entries in the chain at sealing time.
    pub entry_count: usize,
    /// `this_hash` of the last entry, or `GENESIS_HASH` for an empty chain.
    pub head_hash: String,
    pub sealed_at: DateTime<Utc>,
}

/// A snapshot of the whole trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailExport {
    pub trail_id: String,
    pub entries: Vec<TrailEntry>,
    pub seals: Vec<SessionSeal>,
    pub exported_at: DateTime<Utc>,
    /// `this_hash` of the last entry. Empty when there are no entries.
    pub terminal_hash: String,
}
