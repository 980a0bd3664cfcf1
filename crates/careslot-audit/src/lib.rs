//! # careslot-audit
//!
//! Append-only activity trail for CARESLOT.
//!
//! Every login, logout, booking, cancellation, reschedule, calendar
//! connection and access denial is wrapped in a `TrailEntry` that links to
//! the previous entry by SHA-256 hash. Editing any stored entry breaks the
//! chain, which `verify_chain` detects.
//!
//! ```rust,ignore
//! use careslot_audit::InMemoryActivityTrail;
//! use careslot_core::traits::AuditWriter;
//!
//! let trail = InMemoryActivityTrail::new("clinic-main");
//! trail.write(&record)?;
//! trail.finalize("u1")?;
//! assert!(trail.verify_integrity());
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{entry_hash, verify_chain};
pub use event::{SessionSeal, TrailEntry, TrailExport};
pub use memory::InMemoryActivityTrail;

// ── Tests ─────────────────────────────────────────────────────────────────────
