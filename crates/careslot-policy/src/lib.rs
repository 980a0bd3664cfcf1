//! # careslot-policy
//!
//! A TOML-driven route guard for CARESLOT.
//!
//! [`TomlAccessPolicy`] implements the
//! [`AccessPolicy`](careslot_core::traits::AccessPolicy) trait. Routes are
//! declared in a TOML file and matched in order; an unmatched path is not
//! found. Authorization is plain membership of the user's role in the
//! route's `allowed_roles`.
//!
//! ```rust,ignore
//! use std::path::Path;
//! use careslot_policy::TomlAccessPolicy;
//!
//! let policy = TomlAccessPolicy::from_file(Path::new("policies/clinic.toml"))?;
//! ```

pub mod engine;
pub mod rule;

pub use engine::TomlAccessPolicy;
pub use rule::{Redirects, RouteConfig, RouteRule};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use careslot_contracts::{
        access::{AccessRequest, RouteDecision},
        error::CareError,
        role::Role,
    };
    use careslot_core::traits::AccessPolicy;

    use crate::TomlAccessPolicy;

    // ── Helpers ───────────────────────────────────────────────────────────────

    const TABLE: &str = r#"
        [redirects]
        login = "/login"
        denied = "/unauthorized"

        [redirects.by_role]
        patient = "/patient-dashboard"

        [[routes]]
        path = "/login"
        public = true

        [[routes]]
        path = "/unauthorized"
        public = true

        [[routes]]
        path = "/dashboard"
        allowed_roles = ["admin"]

        [[routes]]
        path = "/provider-dashboard"
        allowed_roles = ["doctor"]

        [[routes]]
        path = "/patient-dashboard"
        allowed_roles = ["patient"]

        [[routes]]
        path = "/admin/patients"
        allowed_roles = ["admin"]

        [[routes]]
        path = "/patients"
        redirect_to = "/patient-dashboard"
    "#;

    fn decide(path: &str, role: Option<Role>) -> RouteDecision {
        let policy = TomlAccessPolicy::from_toml_str(TABLE).unwrap();
        policy.decide(&AccessRequest::new(path, role)).unwrap()
    }

    fn denied_target(decision: RouteDecision) -> String {
        match decision {
            RouteDecision::Denied { to, .. } => to,
            other => panic!("expected Denied, got {:?}", other),
        }
    }

    fn alias_target(decision: RouteDecision) -> String {
        match decision {
            RouteDecision::Redirect { to } => to,
            other => panic!("expected Redirect, got {:?}", other),
        }
    }

    // ── 1. membership ─────────────────────────────────────────────────────────

    #[test]
    fn test_listed_role_is_allowed() {
        assert_eq!(decide("/dashboard", Some(Role::Admin)), RouteDecision::Allow);
        assert_eq!(decide("/patient-dashboard", Some(Role::Patient)), RouteDecision::Allow);
    }

    /// The legacy "doctor" role name still loads as clinical staff.
    #[test]
    fn test_doctor_alias_in_table() {
        assert_eq!(
            decide("/provider-dashboard", Some(Role::ClinicalStaff)),
            RouteDecision::Allow
        );
    }

    // ── 2. role-specific redirects ────────────────────────────────────────────

    #[test]
    fn test_patient_is_sent_to_own_dashboard() {
        assert_eq!(
            denied_target(decide("/admin/patients", Some(Role::Patient))),
            "/patient-dashboard"
        );
    }

    /// Admin has no blanket access: routes that do not list admin refuse it.
    #[test]
    fn test_admin_is_not_privileged() {
        assert_eq!(
            denied_target(decide("/patient-dashboard", Some(Role::Admin))),
            "/unauthorized"
        );
        assert_eq!(
            denied_target(decide("/provider-dashboard", Some(Role::Admin))),
            "/unauthorized"
        );
    }

    // ── 3. anonymous visitors ─────────────────────────────────────────────────

    #[test]
    fn test_anonymous_goes_to_login() {
        assert_eq!(
            decide("/dashboard", None),
            RouteDecision::Login {
                to: "/login".to_string(),
                from: "/dashboard".to_string(),
            }
        );
        assert_eq!(decide("/login", None), RouteDecision::Allow);
    }

    // ── 4. aliases and unknown paths ──────────────────────────────────────────

    #[test]
    fn test_alias_redirects_everyone() {
        assert_eq!(alias_target(decide("/patients", None)), "/patient-dashboard");
        assert_eq!(
            alias_target(decide("/patients", Some(Role::Admin))),
            "/patient-dashboard"
        );
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(
            decide("/billing/export", Some(Role::Admin)),
            RouteDecision::NotFound { path: "/billing/export".to_string() }
        );
    }

    #[test]
    fn test_trailing_slash_and_query_are_ignored() {
        assert_eq!(decide("/dashboard/", Some(Role::Admin)), RouteDecision::Allow);
        assert_eq!(decide("/dashboard?tab=list", Some(Role::Admin)), RouteDecision::Allow);
    }

    // ── 5. configuration errors ───────────────────────────────────────────────

    #[test]
    fn test_toml_parse_error() {
        match TomlAccessPolicy::from_toml_str("this is not valid toml ][[[") {
            Err(CareError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse route policy TOML"), "got: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_dangling_redirect_is_rejected() {
        let toml = r#"
            [[routes]]
            path = "/login"
            public = true

            [[routes]]
            path = "/unauthorized"
            public = true

            [[routes]]
            path = "/patients"
            redirect_to = "/nowhere"
        "#;
        match TomlAccessPolicy::from_toml_str(toml) {
            Err(CareError::ConfigError { reason }) => assert!(reason.contains("/nowhere")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_role_key_is_rejected() {
        let toml = r#"
            [redirects.by_role]
            janitor = "/login"

            [[routes]]
            path = "/login"
            public = true

            [[routes]]
            path = "/unauthorized"
            public = true
        "#;
        assert!(matches!(
            TomlAccessPolicy::from_toml_str(toml),
            Err(CareError::ConfigError { .. })
        ));
    }
}
