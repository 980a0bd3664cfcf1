//! Route table types and configuration schema.
//!
//! A `RouteConfig` is deserialized from TOML and holds an ordered list of
//! `RouteRule`s plus the redirect targets used when access is refused.
//! The first rule whose `path` matches wins. A path no rule matches is not
//! found.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use careslot_contracts::role::Role;

/// One entry of the route table.
///
/// Example in TOML:
/// ```toml
/// [[routes]]
/// path = "/patient-billing"
/// allowed_roles = ["admin", "backOffice", "patient"]
///
/// [[routes]]
/// path = "/patients"
/// redirect_to = "/patient-dashboard"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRule {
    /// Exact path, or `"*"` to match any path.
    pub path: String,

    #[serde(default)]
    pub description: String,

    /// Reachable without logging in.
    #[serde(default)]
    pub public: bool,

    /// Roles that may open this route. Ignored for public routes.
    #[serde(default)]
    pub allowed_roles: Vec<Role>,

    /// Static alias: every request is sent here, whoever asks.
    pub redirect_to: Option<String>,
}

impl RouteRule {
    pub fn matches(&self, path: &str) -> bool {
        self.path == "*" || self.path == path
    }

    pub fn permits(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}

/// Where refused navigations end up.
///
/// ```toml
/// [redirects]
/// login = "/login"
/// denied = "/unauthorized"
///
/// [redirects.by_role]
/// patient = "/patient-dashboard"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redirects {
    /// Login page for anonymous visitors.
    #[serde(default = "default_login")]
    pub login: String,

    /// Fallback for a logged-in role without access.
    #[serde(default = "default_denied")]
    pub denied: String,

    /// Per-role override of `denied`, keyed by role wire name.
    #[serde(default)]
    pub by_role: BTreeMap<String, String>,
}

fn default_login() -> String {
    "/login".to_string()
}

fn default_denied() -> String {
    "/unauthorized".to_string()
}

impl Default for Redirects {
    fn default() -> Self {
        Self {
            login: default_login(),
            denied: default_denied(),
            by_role: BTreeMap::new(),
        }
    }
}

impl Redirects {
    /// The page a refused `role` is sent to.
    pub fn for_role(&self, role: Role) -> &str {
        self.by_role.get(role.as_str()).unwrap_or(&self.denied)
    }
}

/// The top-level structure deserialized from a route policy file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default)]
    pub redirects: Redirects,

    /// Ordered list of routes. First match wins.
    pub routes: Vec<RouteRule>,
}
