//! # careslot-contracts
//!
//! Shared types, errors, and contracts for the CARESLOT scheduling runtime.
//!
//! Every crate in the workspace imports from here. No business logic lives in
//! this crate, only data definitions, error types, and trivial accessors.

pub mod access;
pub mod activity;
pub mod appointment;
pub mod catalog;
pub mod error;
pub mod notice;
pub mod role;
pub mod session;

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc, Weekday};

    use super::*;
    use access::RouteDecision;
    use activity::ActionKind;
    use appointment::{Appointment, AppointmentId, AppointmentStatus, PatientId};
    use catalog::{AppointmentTypeId, LocationId, Provider, ProviderId};
    use error::CareError;
    use notice::NoticeVariant;
    use role::Role;
    use session::{Session, User, UserId};

    fn appointment(status: AppointmentStatus) -> Appointment {
        Appointment {
            id: AppointmentId::new("1"),
            patient_id: PatientId::new("p1"),
            patient_name: "John Doe".to_string(),
            provider_id: ProviderId::new("1"),
            location_id: LocationId::new("1"),
            date: NaiveDate::from_ymd_opt(2025, 5, 21).unwrap(),
            time: "09:00 AM".to_string(),
            type_id: AppointmentTypeId::new("1"),
            status,
            notes: None,
        }
    }

    // ── Role ─────────────────────────────────────────────────────────────────

    #[test]
    fn role_accepts_legacy_doctor_value() {
        let role: Role = serde_json::from_str("\"doctor\"").unwrap();
        assert_eq!(role, Role::ClinicalStaff);

        // Always written back under the current name.
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"clinicalStaff\"");
    }

    #[test]
    fn role_wire_names_are_camel_case() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }

    #[test]
    fn role_rejects_unknown_value() {
        assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
    }

    // ── Provider ─────────────────────────────────────────────────────────────

    #[test]
    fn provider_works_on_counts_from_sunday() {
        let provider = Provider {
            id: ProviderId::new("1"),
            name: "Dr. James Smith".to_string(),
            specialty: "Cardiology".to_string(),
            available_days: vec![0, 3],
            location: None,
        };

        assert!(provider.works_on(Weekday::Sun));
        assert!(provider.works_on(Weekday::Wed));
        assert!(!provider.works_on(Weekday::Mon));
        assert!(!provider.works_on(Weekday::Sat));
    }

    // ── Appointment ──────────────────────────────────────────────────────────

    #[test]
    fn appointment_date_serializes_as_iso_date() {
        let json = serde_json::to_value(appointment(AppointmentStatus::Confirmed)).unwrap();
        assert_eq!(json["date"], "2025-05-21");
        assert_eq!(json["status"], "confirmed");
    }

    #[test]
    fn cancelled_appointment_releases_its_slot() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 21).unwrap();
        let provider = ProviderId::new("1");

        assert!(appointment(AppointmentStatus::Confirmed).occupies(&provider, date, "09:00 AM"));
        assert!(appointment(AppointmentStatus::Pending).occupies(&provider, date, "09:00 AM"));
        assert!(!appointment(AppointmentStatus::Cancelled).occupies(&provider, date, "09:00 AM"));
        assert!(!appointment(AppointmentStatus::Confirmed).occupies(&provider, date, "09:30 AM"));
    }

    #[test]
    fn generated_appointment_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| AppointmentId::generate().0).collect();
        assert_eq!(ids.len(), 50);
    }

    // ── Session ──────────────────────────────────────────────────────────────

    #[test]
    fn session_serializes_as_flat_user_record() {
        let session = Session::start(
            User {
                id: UserId::new("4"),
                name: "Dr. Smith".to_string(),
                email: "doctor@healthprovider.com".to_string(),
                role: Role::ClinicalStaff,
                facility_id: Some("facility-001".to_string()),
                specialization: Some("Cardiology".to_string()),
                provider_id: Some(ProviderId::new("1")),
            },
            Utc.with_ymd_and_hms(2026, 1, 5, 8, 30, 0).unwrap(),
        );

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["id"], "4");
        assert_eq!(json["role"], "clinicalStaff");
        assert_eq!(json["facilityId"], "facility-001");
        assert!(json["lastLoginTime"].as_str().unwrap().starts_with("2026-01-05T08:30:00"));

        let decoded: Session = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, session);
    }

    #[test]
    fn session_has_role_is_membership() {
        let session = Session::start(
            User {
                id: UserId::new("p1"),
                name: "John Doe".to_string(),
                email: "patient@example.com".to_string(),
                role: Role::Patient,
                facility_id: None,
                specialization: None,
                provider_id: None,
            },
            Utc::now(),
        );

        assert!(session.has_role(&[Role::Admin, Role::Patient]));
        assert!(!session.has_role(&[Role::Admin]));
        assert!(!session.has_role(&[]));
    }

    // ── RouteDecision ────────────────────────────────────────────────────────

    #[test]
    fn route_decision_destination() {
        assert_eq!(RouteDecision::Allow.destination("/dashboard"), "/dashboard");
        assert_eq!(
            RouteDecision::Login {
                to: "/login".to_string(),
                from: "/dashboard".to_string(),
            }
            .destination("/dashboard"),
            "/login"
        );
        let alias = RouteDecision::Redirect { to: "/patient-dashboard".to_string() };
        assert_eq!(alias.destination("/patients"), "/patient-dashboard");
        assert!(!alias.is_denied());

        let denied = RouteDecision::Denied {
            to: "/unauthorized".to_string(),
            reason: "nope".to_string(),
        };
        assert_eq!(denied.destination("/dashboard"), "/unauthorized");
        assert!(!denied.is_allowed());
        assert!(denied.is_denied());
    }

    // ── CareError ────────────────────────────────────────────────────────────

    #[test]
    fn error_missing_information_lists_fields() {
        let err = CareError::missing(ActionKind::Book, vec!["provider", "time slot"]);
        let msg = err.to_string();
        assert!(msg.contains("book"));
        assert!(msg.contains("provider, time slot"));
    }

    #[test]
    fn error_slot_unavailable_display() {
        let err = CareError::SlotUnavailable {
            provider: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 5, 21).unwrap(),
            slot: "09:00 AM".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("09:00 AM"));
        assert!(msg.contains("2025-05-21"));
    }

    #[test]
    fn missing_information_notice_matches_action() {
        let book = CareError::missing(ActionKind::Book, vec!["date"]).notice();
        assert_eq!(book.title, "Missing Information");
        assert_eq!(
            book.description,
            "Please fill out all required fields to book an appointment."
        );
        assert_eq!(book.variant, NoticeVariant::Destructive);

        let reschedule = CareError::missing(ActionKind::Reschedule, vec!["date"]).notice();
        assert_eq!(
            reschedule.description,
            "Please select a new date and time for your appointment."
        );
    }

    #[test]
    fn every_error_notice_is_destructive() {
        let errors = vec![
            CareError::InvalidCredentials { email: "x@y.z".to_string() },
            CareError::AppointmentNotFound { id: "9".to_string() },
            CareError::AppointmentCancelled { id: "1".to_string() },
            CareError::ConfigError { reason: "bad".to_string() },
            CareError::SessionStoreFailed { reason: "disk".to_string() },
            CareError::AuditWriteFailed { reason: "lock".to_string() },
        ];
        for err in errors {
            assert!(err.notice().is_destructive(), "{err} should be destructive");
        }
    }
}
