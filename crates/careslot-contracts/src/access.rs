//! Route access request and decision types.
//!
//! The access policy consumes an `AccessRequest` and produces a
//! `RouteDecision`. Denials are not errors: they are redirects.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Everything the access policy needs to decide on a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    /// The requested path, e.g. "/admin/patients".
    pub path: String,
    /// Role of the logged-in user; `None` when nobody is logged in.
    pub role: Option<Role>,
}

impl AccessRequest {
    pub fn new(path: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            path: path.into(),
            role,
        }
    }
}

/// The outcome of evaluating a navigation against the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteDecision {
    /// Render the requested view.
    Allow,

    /// Authentication required. The caller shows the login page at `to` and
    /// returns to `from` afterwards.
    Login { to: String, from: String },

    /// The path is a static alias of `to`.
    Redirect { to: String },

    /// The user's role may not open the path; send them to `to` instead.
    /// This is the only outcome recorded as an access denial.
    Denied {
        to: String,
        /// Human-readable explanation, written to the activity trail.
        reason: String,
    },

    /// No route matches the path.
    NotFound { path: String },
}

impl RouteDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteDecision::Allow)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, RouteDecision::Denied { .. })
    }

    /// The path the user ends up on, given the one they asked for.
    pub fn destination<'a>(&'a self, requested: &'a str) -> &'a str {
        match self {
            RouteDecision::Allow | RouteDecision::NotFound { .. } => requested,
            RouteDecision::Login { to, .. }
            | RouteDecision::Redirect { to }
            | RouteDecision::Denied { to, .. } => to,
        }
    }
}
