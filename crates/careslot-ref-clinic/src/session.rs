//! Session handling for the reference clinic.
//!
//! `SessionManager` owns the logged-in user. Every component that needs the
//! current user receives the manager (or its `Actor`) explicitly; there is no
//! ambient global.
//!
//! Two `SessionStore` backends are provided:
//!
//! - `MemorySessionStore` keeps the record in process memory (tests, TUI)
//! - `FileSessionStore` writes one JSON document named after the storage key

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use careslot_contracts::{
    activity::{ActionKind, ActivityRecord, Actor},
    error::{CareError, CareResult},
    role::Role,
    session::{Session, User},
};
use careslot_core::{
    traits::{AuditWriter, SessionStore},
    visibility::landing_route,
};

// ── Stores ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CareResult<std::sync::MutexGuard<'_, Option<Session>>> {
        self.slot.lock().map_err(|e| CareError::SessionStoreFailed {
            reason: format!("session lock poisoned: {}", e),
        })
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> CareResult<Option<Session>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, session: &Session) -> CareResult<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> CareResult<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Stores the session as `{directory}/{storage_key}.json`.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(directory: &Path, storage_key: &str) -> Self {
        Self {
            path: directory.join(format!("{}.json", storage_key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn failed(&self, what: &str, e: impl std::fmt::Display) -> CareError {
        CareError::SessionStoreFailed {
            reason: format!("failed to {} '{}': {}", what, self.path.display(), e),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> CareResult<Option<Session>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.failed("read", e)),
        };
        let session = serde_json::from_str(&contents).map_err(|e| self.failed("parse", e))?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> CareResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.failed("create directory for", e))?;
        }
        let json = serde_json::to_string_pretty(session).map_err(|e| self.failed("serialize", e))?;
        fs::write(&self.path, json).map_err(|e| self.failed("write", e))
    }

    fn clear(&self) -> CareResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.failed("remove", e)),
        }
    }
}

// ── Manager ───────────────────────────────────────────────────────────────────

pub struct SessionManager {
    store: Box<dyn SessionStore>,
    audit: Box<dyn AuditWriter>,
    directory: Vec<User>,
    current: Option<Session>,
}

impl SessionManager {
    pub fn new(
        store: Box<dyn SessionStore>,
        audit: Box<dyn AuditWriter>,
        directory: Vec<User>,
    ) -> Self {
        Self {
            store,
            audit,
            directory,
            current: None,
        }
    }

    /// Pick up a session persisted by an earlier run.
    ///
    /// An unreadable record is discarded and the user starts logged out.
    pub fn restore(&mut self) -> CareResult<Option<&Session>> {
        self.current = match self.store.load() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "discarding unreadable session record");
                self.store.clear()?;
                None
            }
        };
        if let Some(session) = &self.current {
            debug!(user_id = %session.user.id, role = %session.role(), "session restored");
        }
        Ok(self.current.as_ref())
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(Session::role)
    }

    pub fn actor(&self) -> Actor {
        self.current.as_ref().map(Actor::from_session).unwrap_or_else(Actor::anonymous)
    }

    /// False when nobody is logged in.
    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.current.as_ref().is_some_and(|s| s.has_role(roles))
    }

    /// Log in by email. Any non-empty password is accepted.
    ///
    /// Returns the landing route for the user's role.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> CareResult<&'static str> {
        let email = email.trim();
        let mut missing = Vec::new();
        if email.is_empty() {
            missing.push("email");
        }
        if password.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(CareError::missing(ActionKind::Login, missing));
        }

        let user = self
            .directory
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or_else(|| {
                warn!(email = %email, "login rejected: unknown email");
                CareError::InvalidCredentials { email: email.to_string() }
            })?;

        let session = Session::start(user, now);
        self.store.save(&session)?;

        let actor = Actor::from_session(&session);
        let route = landing_route(session.role());
        info!(user_id = %actor.id, role = %session.role(), route = %route, "user logged in");

        self.current = Some(session);
        self.audit.write(&ActivityRecord::now(&actor, ActionKind::Login, email, route))?;
        Ok(route)
    }

    /// Log out, sealing the user's activity. Returns the login route.
    ///
    /// Logging out with nobody logged in only clears the store.
    pub fn logout(&mut self) -> CareResult<&'static str> {
        if let Some(session) = self.current.take() {
            let actor = Actor::from_session(&session);
            info!(user_id = %actor.id, "user logged out");
            self.audit.write(&ActivityRecord::now(
                &actor,
                ActionKind::Logout,
                session.user.email.clone(),
                "/login",
            ))?;
            self.audit.finalize(&actor.id)?;
        }
        self.store.clear()?;
        Ok("/login")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{TimeZone, Utc};

    use careslot_contracts::{
        activity::{ActionKind, ActivityRecord},
        error::{CareError, CareResult},
        role::Role,
    };
    use careslot_core::traits::{AuditWriter, SessionStore};

    use super::{FileSessionStore, MemorySessionStore, SessionManager};
    use crate::mock_data;

    // ── Helpers ───────────────────────────────────────────────────────────────

    struct Recorder {
        records: Arc<Mutex<Vec<ActivityRecord>>>,
        finalized: Arc<Mutex<Vec<String>>>,
    }

    impl AuditWriter for Recorder {
        fn write(&self, record: &ActivityRecord) -> CareResult<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        fn finalize(&self, session_id: &str) -> CareResult<()> {
            self.finalized.lock().unwrap().push(session_id.to_string());
            Ok(())
        }
    }

    struct Harness {
        manager: SessionManager,
        records: Arc<Mutex<Vec<ActivityRecord>>>,
        finalized: Arc<Mutex<Vec<String>>>,
    }

    fn harness_with(store: Box<dyn SessionStore>) -> Harness {
        let records = Arc::new(Mutex::new(vec![]));
        let finalized = Arc::new(Mutex::new(vec![]));
        let audit = Recorder { records: records.clone(), finalized: finalized.clone() };
        Harness {
            manager: SessionManager::new(store, Box::new(audit), mock_data::users()),
            records,
            finalized,
        }
    }

    fn harness() -> Harness {
        harness_with(Box::new(MemorySessionStore::new()))
    }

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 20, 8, 30, 0).unwrap()
    }

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("careslot-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    // ── Login ─────────────────────────────────────────────────────────────────

    #[test]
    fn login_routes_by_role() {
        let cases = [
            ("admin@healthprovider.com", "/dashboard"),
            ("doctor@healthprovider.com", "/provider-dashboard"),
            ("frontoffice@healthprovider.com", "/staff-dashboard"),
            ("backoffice@healthprovider.com", "/staff-dashboard"),
            ("patient@example.com", "/patient-dashboard"),
        ];
        for (email, route) in cases {
            let mut h = harness();
            assert_eq!(h.manager.login(email, "secret", now()).unwrap(), route);
        }
    }

    #[test]
    fn email_match_is_case_insensitive() {
        let mut h = harness();
        h.manager.login("  Doctor@HealthProvider.com ", "x", now()).unwrap();
        assert_eq!(h.manager.role(), Some(Role::ClinicalStaff));
        assert!(h.manager.has_role(&[Role::Admin, Role::ClinicalStaff]));
        assert!(!h.manager.has_role(&[Role::Patient]));
    }

    #[test]
    fn empty_password_is_missing_information() {
        let mut h = harness();
        let err = h.manager.login("admin@healthprovider.com", "", now()).unwrap_err();
        assert!(matches!(err, CareError::MissingInformation { action: ActionKind::Login, .. }));
        assert!(h.manager.current().is_none());
        assert!(h.records.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_email_is_rejected() {
        let mut h = harness();
        match h.manager.login("nobody@example.com", "pw", now()) {
            Err(CareError::InvalidCredentials { email }) => assert_eq!(email, "nobody@example.com"),
            other => panic!("expected InvalidCredentials, got {:?}", other),
        }
        assert_eq!(h.manager.actor().id, "anonymous");
    }

    #[test]
    fn login_is_audited() {
        let mut h = harness();
        h.manager.login("patient@example.com", "pw", now()).unwrap();
        let records = h.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, ActionKind::Login);
        assert_eq!(records[0].actor, "p1");
        assert_eq!(records[0].role, Some(Role::Patient));
    }

    // ── Logout ────────────────────────────────────────────────────────────────

    #[test]
    fn logout_clears_and_seals() {
        let mut h = harness();
        h.manager.login("admin@healthprovider.com", "pw", now()).unwrap();
        assert_eq!(h.manager.logout().unwrap(), "/login");

        assert!(h.manager.current().is_none());
        assert!(!h.manager.has_role(&[Role::Admin]));
        assert_eq!(h.records.lock().unwrap().last().unwrap().action, ActionKind::Logout);
        assert_eq!(*h.finalized.lock().unwrap(), vec!["1".to_string()]);
    }

    #[test]
    fn logout_when_anonymous_is_quiet() {
        let mut h = harness();
        assert_eq!(h.manager.logout().unwrap(), "/login");
        assert!(h.records.lock().unwrap().is_empty());
        assert!(h.finalized.lock().unwrap().is_empty());
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    #[test]
    fn file_store_survives_restart() {
        let dir = temp_dir("restore");
        {
            let mut h = harness_with(Box::new(FileSessionStore::new(&dir, "healthcareUser")));
            h.manager.login("doctor@healthprovider.com", "pw", now()).unwrap();
        }
        assert!(dir.join("healthcareUser.json").exists());

        let mut h = harness_with(Box::new(FileSessionStore::new(&dir, "healthcareUser")));
        let restored = h.manager.restore().unwrap().cloned().unwrap();
        assert_eq!(restored.user.email, "doctor@healthprovider.com");
        assert_eq!(restored.last_login_time, now());

        h.manager.logout().unwrap();
        assert!(!dir.join("healthcareUser.json").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn stored_record_is_flat_camel_case_json() {
        let dir = temp_dir("format");
        let mut h = harness_with(Box::new(FileSessionStore::new(&dir, "healthcareUser")));
        h.manager.login("doctor@healthprovider.com", "pw", now()).unwrap();

        let raw = std::fs::read_to_string(dir.join("healthcareUser.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["email"], "doctor@healthprovider.com");
        assert_eq!(json["role"], "clinicalStaff");
        assert_eq!(json["facilityId"], "facility-001");
        assert!(json["lastLoginTime"].is_string());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_record_starts_logged_out() {
        let dir = temp_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("healthcareUser.json"), "{not json").unwrap();

        let mut h = harness_with(Box::new(FileSessionStore::new(&dir, "healthcareUser")));
        assert!(h.manager.restore().unwrap().is_none());
        assert!(!dir.join("healthcareUser.json").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn legacy_doctor_role_restores() {
        let dir = temp_dir("legacy");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("healthcareUser.json"),
            concat!(
                r#"{"id":"4","name":"Dr. Smith","email":"doctor@healthprovider.com","#,
                r#""role":"doctor","lastLoginTime":"2025-05-20T08:30:00Z"}"#,
            ),
        )
        .unwrap();

        let mut h = harness_with(Box::new(FileSessionStore::new(&dir, "healthcareUser")));
        h.manager.restore().unwrap();
        assert_eq!(h.manager.role(), Some(Role::ClinicalStaff));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
