//! Role visibility policy.
//!
//! Which tabs, form features, navigation entries, and appointments a role
//! sees. Every function here is a pure function of the role (or user) and
//! static tables.
//!
//! Route-level access lives in `careslot-policy`; this module only answers
//! the in-page questions. `is_authorized` is plain membership: admins get no
//! blanket access.

use serde::{Deserialize, Serialize};

use careslot_contracts::{
    appointment::Appointment,
    catalog::ProviderId,
    role::Role,
    session::User,
};

/// Views on the appointments page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Calendar,
    List,
    History,
}

impl Tab {
    pub fn id(self) -> &'static str {
        match self {
            Tab::Calendar => "calendar",
            Tab::List => "list",
            Tab::History => "history",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Calendar => "Calendar View",
            Tab::List => "List View",
            Tab::History => "Appointment History",
        }
    }
}

/// Optional controls on the appointment screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    LocationSelector,
    StatusFilter,
    ExportSchedule,
    ViewSwitcher,
    CalendarIntegration,
    NoShowForecast,
}

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub to: &'static str,
}

/// Tabs `role` may open, in display order.
pub fn available_tabs(role: Role) -> Vec<Tab> {
    match role {
        Role::Admin => vec![Tab::Calendar, Tab::List, Tab::History],
        Role::ClinicalStaff => vec![Tab::Calendar, Tab::List],
        Role::FrontOffice | Role::BackOffice | Role::Patient => vec![Tab::Calendar, Tab::History],
    }
}

/// Where `role` lands after login.
pub fn landing_route(role: Role) -> &'static str {
    match role {
        Role::Admin => "/dashboard",
        Role::ClinicalStaff => "/provider-dashboard",
        Role::FrontOffice | Role::BackOffice => "/staff-dashboard",
        Role::Patient => "/patient-dashboard",
    }
}

/// True iff `role` is one of `allowed`.
pub fn is_authorized(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

pub fn has_feature(role: Role, feature: Feature) -> bool {
    use Role::*;
    match feature {
        Feature::LocationSelector => matches!(role, Admin | Patient),
        Feature::StatusFilter
        | Feature::ViewSwitcher
        | Feature::CalendarIntegration
        | Feature::NoShowForecast => matches!(role, Admin | ClinicalStaff),
        Feature::ExportSchedule => role != Patient,
    }
}

/// Every feature `role` has.
pub fn features(role: Role) -> Vec<Feature> {
    [
        Feature::LocationSelector,
        Feature::StatusFilter,
        Feature::ExportSchedule,
        Feature::ViewSwitcher,
        Feature::CalendarIntegration,
        Feature::NoShowForecast,
    ]
    .into_iter()
    .filter(|f| has_feature(role, *f))
    .collect()
}

/// Sidebar entries for `role`.
pub fn navigation(role: Role) -> Vec<NavItem> {
    let mut items = vec![
        NavItem { name: "Dashboard", to: "/dashboard" },
        NavItem { name: "Appointments", to: "/appointments" },
    ];

    match role {
        Role::Admin => items.push(NavItem { name: "Patient Management", to: "/admin/patients" }),
        Role::ClinicalStaff => items.push(NavItem { name: "Patients", to: "/patients" }),
        _ => {}
    }

    items.push(NavItem { name: "Profile", to: "/profile" });
    items.push(NavItem { name: "Settings", to: "/settings" });
    items
}

/// Page title and subtitle on the calendar view.
pub fn calendar_heading(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Admin => ("Appointment Management", "Manage schedules across all providers"),
        Role::ClinicalStaff => ("My Appointments", "View your upcoming appointments"),
        _ => ("Book an Appointment", "Find available appointment slots"),
    }
}

/// Label of the button that opens the booking dialog.
pub fn booking_action_label(role: Role) -> &'static str {
    if role == Role::Patient {
        "Book Appointment"
    } else {
        "Schedule Appointment"
    }
}

/// The appointments `user` may see.
///
/// Patients see their own, clinical staff see their linked provider's (none
/// without a link), everyone else sees all.
pub fn visible_appointments<'a>(
    user: &User,
    appointments: &'a [Appointment],
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|a| match user.role {
            Role::Patient => a.patient_id.0 == user.id.0,
            Role::ClinicalStaff => user.provider_id.as_ref() == Some(&a.provider_id),
            Role::Admin | Role::FrontOffice | Role::BackOffice => true,
        })
        .collect()
}

/// Provider pre-selected in the booking form for `user`.
pub fn default_provider(user: &User) -> Option<ProviderId> {
    match user.role {
        Role::ClinicalStaff => user.provider_id.clone(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use careslot_contracts::{
        appointment::{AppointmentId, AppointmentStatus, PatientId},
        catalog::{AppointmentTypeId, LocationId},
        session::UserId,
    };

    use super::*;

    fn user(id: &str, role: Role, provider: Option<&str>) -> User {
        User {
            id: UserId::new(id),
            name: id.to_string(),
            email: format!("{id}@example.com"),
            role,
            facility_id: None,
            specialization: None,
            provider_id: provider.map(ProviderId::new),
        }
    }

    fn appointment(id: &str, patient: &str, provider: &str) -> Appointment {
        Appointment {
            id: AppointmentId::new(id),
            patient_id: PatientId::new(patient),
            patient_name: patient.to_string(),
            provider_id: ProviderId::new(provider),
            location_id: LocationId::new("1"),
            date: NaiveDate::from_ymd_opt(2025, 5, 21).unwrap(),
            time: "09:00 AM".to_string(),
            type_id: AppointmentTypeId::new("1"),
            status: AppointmentStatus::Confirmed,
            notes: None,
        }
    }

    // ── Tabs ─────────────────────────────────────────────────────────────────

    #[test]
    fn tabs_per_role_are_exact() {
        assert_eq!(available_tabs(Role::Admin), vec![Tab::Calendar, Tab::List, Tab::History]);
        assert_eq!(available_tabs(Role::ClinicalStaff), vec![Tab::Calendar, Tab::List]);
        assert_eq!(available_tabs(Role::Patient), vec![Tab::Calendar, Tab::History]);
        assert_eq!(available_tabs(Role::FrontOffice), vec![Tab::Calendar, Tab::History]);
        assert_eq!(available_tabs(Role::BackOffice), vec![Tab::Calendar, Tab::History]);
    }

    #[test]
    fn staff_and_patient_tab_sets_are_not_nested() {
        let doctor = available_tabs(Role::ClinicalStaff);
        let patient = available_tabs(Role::Patient);
        assert!(doctor.contains(&Tab::List) && !patient.contains(&Tab::List));
        assert!(patient.contains(&Tab::History) && !doctor.contains(&Tab::History));
    }

    // ── Landing and authorization ────────────────────────────────────────────

    #[test]
    fn landing_routes() {
        assert_eq!(landing_route(Role::Admin), "/dashboard");
        assert_eq!(landing_route(Role::ClinicalStaff), "/provider-dashboard");
        assert_eq!(landing_route(Role::FrontOffice), "/staff-dashboard");
        assert_eq!(landing_route(Role::BackOffice), "/staff-dashboard");
        assert_eq!(landing_route(Role::Patient), "/patient-dashboard");
    }

    #[test]
    fn admin_is_not_authorized_by_default() {
        assert!(!is_authorized(Role::Admin, &[Role::Patient]));
        assert!(is_authorized(Role::Admin, &[Role::Admin, Role::Patient]));
        assert!(!is_authorized(Role::Patient, &[]));
    }

    // ── Features ─────────────────────────────────────────────────────────────

    #[test]
    fn location_selector_for_admin_and_patient_only() {
        assert!(has_feature(Role::Admin, Feature::LocationSelector));
        assert!(has_feature(Role::Patient, Feature::LocationSelector));
        assert!(!has_feature(Role::ClinicalStaff, Feature::LocationSelector));
        assert!(!has_feature(Role::FrontOffice, Feature::LocationSelector));
    }

    #[test]
    fn patients_cannot_export_or_filter() {
        let patient = features(Role::Patient);
        assert_eq!(patient, vec![Feature::LocationSelector]);
        assert!(features(Role::BackOffice).contains(&Feature::ExportSchedule));
    }

    #[test]
    fn clinical_staff_features() {
        assert_eq!(
            features(Role::ClinicalStaff),
            vec![
                Feature::StatusFilter,
                Feature::ExportSchedule,
                Feature::ViewSwitcher,
                Feature::CalendarIntegration,
                Feature::NoShowForecast,
            ]
        );
    }

    // ── Navigation ───────────────────────────────────────────────────────────

    #[test]
    fn navigation_adds_patient_links_per_role() {
        let admin: Vec<&str> = navigation(Role::Admin).iter().map(|n| n.to).collect();
        assert_eq!(
            admin,
            vec!["/dashboard", "/appointments", "/admin/patients", "/profile", "/settings"]
        );

        let doctor: Vec<&str> = navigation(Role::ClinicalStaff).iter().map(|n| n.to).collect();
        assert!(doctor.contains(&"/patients"));

        assert_eq!(navigation(Role::Patient).len(), 4);
    }

    #[test]
    fn headings_and_labels() {
        assert_eq!(calendar_heading(Role::Admin).0, "Appointment Management");
        assert_eq!(calendar_heading(Role::ClinicalStaff).0, "My Appointments");
        assert_eq!(calendar_heading(Role::Patient).0, "Book an Appointment");
        assert_eq!(booking_action_label(Role::Patient), "Book Appointment");
        assert_eq!(booking_action_label(Role::FrontOffice), "Schedule Appointment");
    }

    // ── Appointment visibility ───────────────────────────────────────────────

    #[test]
    fn appointments_filtered_by_role() {
        let all = vec![
            appointment("1", "p1", "1"),
            appointment("2", "p2", "2"),
            appointment("3", "p1", "2"),
        ];

        let ids = |u: &User| -> Vec<String> {
            visible_appointments(u, &all).iter().map(|a| a.id.0.clone()).collect()
        };

        assert_eq!(ids(&user("p1", Role::Patient, None)), vec!["1", "3"]);
        assert_eq!(ids(&user("4", Role::ClinicalStaff, Some("2"))), vec!["2", "3"]);
        assert!(ids(&user("5", Role::ClinicalStaff, None)).is_empty());
        assert_eq!(ids(&user("1", Role::Admin, None)).len(), 3);
        assert_eq!(ids(&user("2", Role::FrontOffice, None)).len(), 3);
    }

    #[test]
    fn default_provider_only_for_clinical_staff() {
        assert_eq!(
            default_provider(&user("4", Role::ClinicalStaff, Some("1"))),
            Some(ProviderId::new("1"))
        );
        assert_eq!(default_provider(&user("1", Role::Admin, Some("1"))), None);
    }
}
