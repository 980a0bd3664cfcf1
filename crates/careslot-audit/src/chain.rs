//! Hashing and chain verification for the activity trail.
//!
//! Hash input layout (bytes, in order):
//!   1. trail id as UTF-8
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 (64 ASCII hex chars)
//!   4. compact JSON of the activity record

use sha2::{Digest, Sha256};

use careslot_contracts::{
    activity::ActivityRecord,
    error::{CareError, CareResult},
};

use crate::event::TrailEntry;

/// SHA-256 over one entry's position, link, and record, as lowercase hex.
pub fn entry_hash(
    trail_id: &str,
    sequence: u64,
    record: &ActivityRecord,
    prev_hash: &str,
) -> CareResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| CareError::AuditWriteFailed {
        reason: format!("activity record is not serializable: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(trail_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Check that every entry links to its predecessor and that every stored
/// hash matches its recomputed value. An empty chain is valid.
pub fn verify_chain(entries: &[TrailEntry]) -> bool {
    let mut expected_prev = TrailEntry::GENESIS_HASH;

    for (position, entry) in entries.iter().enumerate() {
        if entry.sequence != position as u64 || entry.prev_hash != expected_prev {
            return false;
        }
        match entry_hash(&entry.trail_id, entry.sequence, &entry.record, &entry.prev_hash) {
            Ok(recomputed) if recomputed == entry.this_hash => {}
            _ => return false,
        }
        expected_prev = entry.this_hash.as_str();
    }

    true
}
