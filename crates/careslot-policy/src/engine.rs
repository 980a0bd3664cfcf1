//! TOML-driven route guard.
//!
//! `TomlAccessPolicy` loads a `RouteConfig` and implements `AccessPolicy`.
//!
//! Decision order for a request:
//!
//! 1. Find the first route whose path matches. None → `NotFound`.
//! 2. Alias routes redirect unconditionally.
//! 3. Public routes allow everyone.
//! 4. No logged-in user → `Login`, remembering the requested path.
//! 5. Role listed in `allowed_roles` → `Allow`.
//! 6. Otherwise `Denied`, sending the role to its page from `[redirects]`.
//!
//! There is no role that bypasses step 5.

use std::path::Path;

use tracing::{debug, warn};

use careslot_contracts::{
    access::{AccessRequest, RouteDecision},
    error::{CareError, CareResult},
    role::Role,
};
use careslot_core::traits::AccessPolicy;

use crate::rule::{RouteConfig, RouteRule};

/// An `AccessPolicy` backed by a TOML route table.
///
/// ```rust,ignore
/// use careslot_policy::TomlAccessPolicy;
///
/// let policy = TomlAccessPolicy::from_file(Path::new("policies/clinic.toml"))?;
/// ```
#[derive(Debug)]
pub struct TomlAccessPolicy {
    config: RouteConfig,
}

impl TomlAccessPolicy {
    /// Returns `CareError::ConfigError` if the TOML is malformed, does not
    /// match `RouteConfig`, or names a redirect target with no route.
    pub fn from_toml_str(s: &str) -> CareResult<Self> {
        let config: RouteConfig = toml::from_str(s).map_err(|e| CareError::ConfigError {
            reason: format!("failed to parse route policy TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    pub fn from_file(path: &Path) -> CareResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CareError::ConfigError {
            reason: format!("failed to read route policy file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_config(config: RouteConfig) -> CareResult<Self> {
        let policy = Self { config };
        let redirects = &policy.config.redirects;
        let targets = [&redirects.login, &redirects.denied]
            .into_iter()
            .chain(redirects.by_role.values())
            .chain(policy.config.routes.iter().filter_map(|r| r.redirect_to.as_ref()));
        for target in targets {
            if policy.route(target).is_none() {
                return Err(CareError::ConfigError {
                    reason: format!("redirect target '{}' has no route", target),
                });
            }
        }
        for key in redirects.by_role.keys() {
            if !Role::ALL.iter().any(|r| r.as_str() == key) {
                return Err(CareError::ConfigError {
                    reason: format!("unknown role '{}' in [redirects.by_role]", key),
                });
            }
        }
        Ok(policy)
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    fn route(&self, path: &str) -> Option<&RouteRule> {
        self.config.routes.iter().find(|r| r.matches(path))
    }
}

/// Drop the query string and any trailing slash ("/" itself stays).
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

impl AccessPolicy for TomlAccessPolicy {
    fn decide(&self, request: &AccessRequest) -> CareResult<RouteDecision> {
        let path = normalize(&request.path);
        debug!(path = %path, role = ?request.role, "evaluating route access");

        let Some(rule) = self.route(path) else {
            warn!(path = %path, "no route matched");
            return Ok(RouteDecision::NotFound { path: path.to_string() });
        };

        if let Some(to) = &rule.redirect_to {
            debug!(path = %path, to = %to, "route is an alias");
            return Ok(RouteDecision::Redirect { to: to.clone() });
        }

        if rule.public {
            return Ok(RouteDecision::Allow);
        }

        let Some(role) = request.role else {
            debug!(path = %path, "anonymous visitor sent to login");
            return Ok(RouteDecision::Login {
                to: self.config.redirects.login.clone(),
                from: path.to_string(),
            });
        };

        if rule.permits(role) {
            return Ok(RouteDecision::Allow);
        }

        let to = self.config.redirects.for_role(role);
        warn!(path = %path, role = %role, to = %to, "role not permitted on route");
        Ok(RouteDecision::Denied {
            to: to.to_string(),
            reason: format!("role '{}' is not permitted on '{}'", role, path),
        })
    }
}
