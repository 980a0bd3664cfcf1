//! Wiring for one running clinic.
//!
//! `ReferenceClinic` assembles the booking desk, session manager and route
//! guard around a single shared activity trail, so every action any of them
//! performs lands in one hash chain.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use careslot_audit::InMemoryActivityTrail;
use careslot_contracts::{
    access::{AccessRequest, RouteDecision},
    activity::{ActionKind, ActivityRecord, Actor},
    appointment::Appointment,
    catalog::ProviderId,
    error::CareResult,
};
use careslot_core::{
    availability,
    traits::{AccessPolicy, AuditWriter, SessionStore},
    visibility, BookingDesk,
};
use careslot_policy::TomlAccessPolicy;

use crate::{
    config::ClinicConfig,
    mock_data,
    no_show::NoShowForecast,
    session::{MemorySessionStore, SessionManager},
    store::InMemoryAppointmentStore,
};

/// The route table shipped with the reference clinic.
pub const CLINIC_POLICY: &str = include_str!("../policies/clinic.toml");

pub struct ReferenceClinic {
    config: ClinicConfig,
    pub desk: BookingDesk,
    pub sessions: SessionManager,
    policy: Box<dyn AccessPolicy>,
    trail: Arc<InMemoryActivityTrail>,
}

impl ReferenceClinic {
    pub fn new(
        config: ClinicConfig,
        policy: Box<dyn AccessPolicy>,
        store: InMemoryAppointmentStore,
        session_store: Box<dyn SessionStore>,
    ) -> CareResult<Self> {
        let master_slots = config.slots.labels()?;
        let trail = Arc::new(InMemoryActivityTrail::new("reference-clinic"));

        let desk = BookingDesk::new(
            mock_data::catalog(),
            Box::new(store),
            Box::new(Arc::clone(&trail)),
            master_slots,
        );
        let sessions =
            SessionManager::new(session_store, Box::new(Arc::clone(&trail)), mock_data::users());

        Ok(Self { config, desk, sessions, policy, trail })
    }

    /// Embedded route table, seeded appointments, in-memory sessions.
    pub fn in_memory(config: ClinicConfig) -> CareResult<Self> {
        let policy = TomlAccessPolicy::from_toml_str(CLINIC_POLICY)?;
        Self::new(
            config,
            Box::new(policy),
            InMemoryAppointmentStore::seeded(),
            Box::new(MemorySessionStore::new()),
        )
    }

    pub fn config(&self) -> &ClinicConfig {
        &self.config
    }

    pub fn trail(&self) -> &InMemoryActivityTrail {
        &self.trail
    }

    pub fn actor(&self) -> Actor {
        self.sessions.actor()
    }

    /// Run `path` through the route guard as the current user. Denials are
    /// written to the activity trail.
    pub fn navigate(&self, path: &str) -> CareResult<RouteDecision> {
        let decision = self.policy.decide(&AccessRequest::new(path, self.sessions.role()))?;
        if let RouteDecision::Denied { to, reason } = &decision {
            let actor = self.actor();
            info!(actor = %actor.id, path = %path, to = %to, "access denied");
            let record =
                ActivityRecord::now(&actor, ActionKind::AccessDenied, path, reason.clone());
            self.trail.write(&record)?;
        }
        Ok(decision)
    }

    /// Appointments the current user may see. Empty when logged out.
    pub fn visible_appointments(&self) -> CareResult<Vec<Appointment>> {
        let Some(user) = self.sessions.user() else {
            return Ok(Vec::new());
        };
        let all = self.desk.appointments()?;
        Ok(visibility::visible_appointments(user, &all).into_iter().cloned().collect())
    }

    /// The provider the booking form starts with.
    pub fn default_provider(&self) -> Option<ProviderId> {
        self.sessions.user().and_then(visibility::default_provider)
    }

    /// First date on or after `from` the provider can be booked.
    pub fn next_available_date(
        &self,
        provider: &ProviderId,
        from: NaiveDate,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        let provider = self.desk.catalog().provider(provider)?;
        availability::next_available_date(from, provider, today, self.config.booking.horizon_days)
    }

    pub fn forecast(&self, appointment: Option<&Appointment>) -> NoShowForecast {
        NoShowForecast::for_appointment(appointment)
    }
}
