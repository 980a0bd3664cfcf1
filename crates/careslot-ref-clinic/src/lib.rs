//! # careslot-ref-clinic
//!
//! Reference clinic for CARESLOT: a complete practice wired from the core
//! crates with mock data.
//!
//! - [`mock_data`]: providers, locations, visit types, booked appointments, users
//! - [`store`]: in-memory appointment store with atomic slot checks
//! - [`session`]: session manager plus memory and file session stores
//! - [`config`]: clinic TOML configuration and the slot template
//! - [`no_show`]: the mocked no-show forecast
//! - [`clinic`]: `ReferenceClinic`, which ties it all to one activity trail
//! - [`scenarios`]: printed walkthroughs used by the demo CLI
//!
//! All data is hardcoded and fictional. No external systems are contacted.

pub mod clinic;
pub mod config;
pub mod mock_data;
pub mod no_show;
pub mod scenarios;
pub mod session;
pub mod store;

pub use clinic::{ReferenceClinic, CLINIC_POLICY};
pub use config::ClinicConfig;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use careslot_contracts::{
        access::RouteDecision,
        activity::ActionKind,
        appointment::{AppointmentId, BookingRequest, PatientId, ReminderChannel},
        catalog::{AppointmentTypeId, LocationId, ProviderId},
        error::CareError,
        role::Role,
    };

    use crate::{
        session::MemorySessionStore, store::InMemoryAppointmentStore, ClinicConfig, ReferenceClinic,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn clinic() -> ReferenceClinic {
        ReferenceClinic::in_memory(ClinicConfig::embedded().unwrap()).unwrap()
    }

    fn empty_clinic() -> ReferenceClinic {
        let policy =
            careslot_policy::TomlAccessPolicy::from_toml_str(crate::CLINIC_POLICY).unwrap();
        ReferenceClinic::new(
            ClinicConfig::embedded().unwrap(),
            Box::new(policy),
            InMemoryAppointmentStore::new(),
            Box::new(MemorySessionStore::new()),
        )
        .unwrap()
    }

    fn request(date: &str, slot: &str) -> BookingRequest {
        BookingRequest {
            date: Some(d(date)),
            provider_id: Some(ProviderId::new("1")),
            location_id: Some(LocationId::new("1")),
            type_id: Some(AppointmentTypeId::new("1")),
            time_slot: Some(slot.to_string()),
            patient_id: PatientId::new("p1"),
            patient_name: "John Doe".to_string(),
            reminder: ReminderChannel::Email,
            notes: None,
        }
    }

    fn login(clinic: &mut ReferenceClinic, email: &str) {
        clinic.sessions.login(email, "pw", Utc::now()).unwrap();
    }

    // ── Route table ───────────────────────────────────────────────────────────

    #[test]
    fn shipped_policy_redirects_by_role() {
        let mut clinic = clinic();

        login(&mut clinic, "patient@example.com");
        match clinic.navigate("/admin/patients").unwrap() {
            RouteDecision::Denied { to, .. } => assert_eq!(to, "/patient-dashboard"),
            other => panic!("expected Denied, got {:?}", other),
        }
        clinic.sessions.logout().unwrap();

        login(&mut clinic, "admin@healthprovider.com");
        match clinic.navigate("/patient-dashboard").unwrap() {
            RouteDecision::Denied { to, .. } => assert_eq!(to, "/unauthorized"),
            other => panic!("expected Denied, got {:?}", other),
        }
        assert!(clinic.navigate("/admin/patients").unwrap().is_allowed());
        assert!(clinic.navigate("/patient-billing").unwrap().is_allowed());
    }

    #[test]
    fn shipped_policy_route_membership() {
        let mut clinic = clinic();
        let expectations = [
            ("frontoffice@healthprovider.com", "/staff-dashboard", true),
            ("frontoffice@healthprovider.com", "/patient-billing", false),
            ("backoffice@healthprovider.com", "/patient-billing", true),
            ("backoffice@healthprovider.com", "/appointment-scheduling", false),
            ("doctor@healthprovider.com", "/provider-dashboard", true),
            ("doctor@healthprovider.com", "/appointments", true),
            ("patient@example.com", "/appointment-scheduling", true),
            ("patient@example.com", "/appointments", false),
        ];
        for (email, path, allowed) in expectations {
            login(&mut clinic, email);
            assert_eq!(
                clinic.navigate(path).unwrap().is_allowed(),
                allowed,
                "{email} on {path}"
            );
            clinic.sessions.logout().unwrap();
        }
    }

    #[test]
    fn shipped_policy_public_alias_and_unknown() {
        let clinic = clinic();
        assert!(clinic.navigate("/").unwrap().is_allowed());
        assert!(clinic.navigate("/login").unwrap().is_allowed());
        assert_eq!(
            clinic.navigate("/appointments").unwrap(),
            RouteDecision::Login { to: "/login".to_string(), from: "/appointments".to_string() }
        );
        assert_eq!(
            clinic.navigate("/patients").unwrap(),
            RouteDecision::Redirect { to: "/patient-dashboard".to_string() }
        );
        assert!(matches!(
            clinic.navigate("/nope").unwrap(),
            RouteDecision::NotFound { .. }
        ));
    }

    #[test]
    fn only_denials_are_audited_on_navigation() {
        let mut clinic = clinic();
        login(&mut clinic, "patient@example.com");
        clinic.navigate("/patient-dashboard").unwrap();
        clinic.navigate("/patients").unwrap();
        clinic.navigate("/dashboard").unwrap();

        assert_eq!(clinic.trail().count(ActionKind::AccessDenied).unwrap(), 1);
        let last = clinic.trail().recent(1).unwrap();
        assert_eq!(last[0].subject, "/dashboard");
        assert_eq!(last[0].role, Some(Role::Patient));
    }

    // ── Booking through the clinic ────────────────────────────────────────────

    #[test]
    fn booking_confirmation_names_provider_location_and_date() {
        let mut clinic = empty_clinic();
        login(&mut clinic, "frontoffice@healthprovider.com");
        let actor = clinic.actor();

        let confirmation = clinic
            .desk
            .book(&request("2025-05-21", "09:00 AM"), &actor, d("2025-05-01"))
            .unwrap();
        let text = &confirmation.notice.description;
        assert!(text.contains("Dr. James Smith"));
        assert!(text.contains("Main Hospital"));
        assert!(text.contains("Wednesday, May 21st, 2025"));
    }

    #[test]
    fn seeded_slot_is_taken() {
        let mut clinic = clinic();
        login(&mut clinic, "frontoffice@healthprovider.com");
        let actor = clinic.actor();
        assert!(matches!(
            clinic.desk.book(&request("2025-05-21", "09:00 AM"), &actor, d("2025-05-01")),
            Err(CareError::SlotUnavailable { .. })
        ));

        let open = clinic
            .desk
            .available_time_slots(Some(d("2025-05-21")), Some(&ProviderId::new("1")))
            .unwrap();
        assert_eq!(open.len(), 11);
        assert_eq!(open[0], "09:30 AM");
    }

    #[test]
    fn cancelling_frees_slot_and_keeps_trail_intact() {
        let mut clinic = clinic();
        login(&mut clinic, "admin@healthprovider.com");
        let actor = clinic.actor();

        clinic.desk.cancel(&AppointmentId::new("1"), &actor).unwrap();
        clinic
            .desk
            .book(&request("2025-05-21", "09:00 AM"), &actor, d("2025-05-01"))
            .unwrap();
        clinic.sessions.logout().unwrap();

        let trail = clinic.trail();
        assert!(trail.verify_integrity());
        let actions: Vec<ActionKind> = trail.records().unwrap().iter().map(|r| r.action).collect();
        assert_eq!(
            actions,
            vec![ActionKind::Login, ActionKind::Cancel, ActionKind::Book, ActionKind::Logout]
        );
        assert_eq!(trail.seals().unwrap().len(), 1);
    }

    #[test]
    fn cancelled_appointment_is_final() {
        let mut clinic = clinic();
        login(&mut clinic, "admin@healthprovider.com");
        let actor = clinic.actor();
        let id = AppointmentId::new("1");

        clinic.desk.cancel(&id, &actor).unwrap();
        assert!(matches!(
            clinic.desk.cancel(&id, &actor),
            Err(CareError::AppointmentCancelled { .. })
        ));
        let today = d("2025-05-01");
        assert!(matches!(
            clinic.desk.reschedule(&id, Some(d("2025-05-26")), Some("10:00 AM"), &actor, today),
            Err(CareError::AppointmentCancelled { .. })
        ));

        assert_eq!(clinic.trail().count(ActionKind::Cancel).unwrap(), 1);
        assert_eq!(clinic.trail().count(ActionKind::Reschedule).unwrap(), 0);
        let provider = ProviderId::new("1");
        let open =
            clinic.desk.available_time_slots(Some(d("2025-05-26")), Some(&provider)).unwrap();
        assert!(open.contains(&"10:00 AM".to_string()));
    }

    // ── Visibility ────────────────────────────────────────────────────────────

    #[test]
    fn appointment_lists_follow_role() {
        let mut clinic = clinic();
        assert!(clinic.visible_appointments().unwrap().is_empty());

        login(&mut clinic, "patient@example.com");
        let mine = clinic.visible_appointments().unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].patient_name, "John Doe");
        clinic.sessions.logout().unwrap();

        login(&mut clinic, "doctor@healthprovider.com");
        assert_eq!(clinic.visible_appointments().unwrap().len(), 1);
        assert_eq!(clinic.default_provider(), Some(ProviderId::new("1")));
        clinic.sessions.logout().unwrap();

        login(&mut clinic, "backoffice@healthprovider.com");
        assert_eq!(clinic.visible_appointments().unwrap().len(), 2);
        assert_eq!(clinic.default_provider(), None);
    }

    #[test]
    fn next_available_date_skips_off_days() {
        let clinic = clinic();
        // 2025-05-23 is a Friday; provider 1 works Monday to Wednesday.
        assert_eq!(
            clinic.next_available_date(&ProviderId::new("1"), d("2025-05-23"), d("2025-05-01")),
            Some(d("2025-05-26"))
        );
        assert_eq!(
            clinic.next_available_date(&ProviderId::new("99"), d("2025-05-23"), d("2025-05-01")),
            None
        );
    }
}
