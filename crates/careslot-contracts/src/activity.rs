//! Activity records written to the audit trail.
//!
//! Every completed action and every access denial produces exactly one
//! `ActivityRecord`. Input that fails validation produces none. Records are
//! appended and never modified.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{role::Role, session::Session};

/// The user-facing actions CARESLOT knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Login,
    Logout,
    Book,
    Cancel,
    Reschedule,
    ConnectCalendar,
    AccessDenied,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Login => "login",
            ActionKind::Logout => "logout",
            ActionKind::Book => "book",
            ActionKind::Cancel => "cancel",
            ActionKind::Reschedule => "reschedule",
            ActionKind::ConnectCalendar => "connect-calendar",
            ActionKind::AccessDenied => "access-denied",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who performed an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// User id, or "anonymous".
    pub id: String,
    pub role: Option<Role>,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self {
            id: "anonymous".to_string(),
            role: None,
        }
    }

    pub fn from_session(session: &Session) -> Self {
        Self {
            id: session.user.id.0.clone(),
            role: Some(session.user.role),
        }
    }
}

/// An immutable record of one action, written to the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Id of the acting user, or "anonymous".
    pub actor: String,
    /// The actor's role at the time, when known.
    pub role: Option<Role>,
    pub action: ActionKind,
    /// What the action targeted: an appointment id, a route, an email.
    pub subject: String,
    /// Free-form outcome text.
    pub detail: String,
    /// Wall-clock time the record was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl ActivityRecord {
    /// Build a record for `actor` stamped with the current time.
    pub fn now(
        actor: &Actor,
        action: ActionKind,
        subject: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            actor: actor.id.clone(),
            role: actor.role,
            action,
            subject: subject.into(),
            detail: detail.into(),
            timestamp: Utc::now(),
        }
    }
}
